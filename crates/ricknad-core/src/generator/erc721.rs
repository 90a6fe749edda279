//! ERC-721 assembler.
//!
//! The only assembler with nontrivial branching: every combination of
//! {enumerable, uriStorage, royalties} needs a different set of
//! Solidity-required `override(...)` disambiguation stubs.

use super::rules::{file_prologue, natspec, ContractParts, FeatureRule};
use super::TemplateInput;
use crate::types::Feature;

const RULES: &[FeatureRule] = &[
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC721/extensions/ERC721Enumerable.sol\";"],
        add_inheritance: &["ERC721Enumerable"],
        ..FeatureRule::empty(Feature::Enumerable)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC721/extensions/ERC721URIStorage.sol\";"],
        add_inheritance: &["ERC721URIStorage"],
        ..FeatureRule::empty(Feature::Metadata)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC721/extensions/ERC721Royalty.sol\";"],
        add_inheritance: &["ERC721Royalty"],
        constructor_stmts: &["_setDefaultRoyalty(msg.sender, 500);"],
        ..FeatureRule::empty(Feature::Royalties)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/security/Pausable.sol\";"],
        add_inheritance: &["Pausable"],
        functions: &["    function pause() public onlyOwner {\n        _pause();\n    }\n\n    function unpause() public onlyOwner {\n        _unpause();\n    }"],
        ..FeatureRule::empty(Feature::Pausable)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/access/Ownable.sol\";"],
        add_inheritance: &["Ownable"],
        ..FeatureRule::empty(Feature::Ownable)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC721/extensions/ERC721Burnable.sol\";"],
        add_inheritance: &["ERC721Burnable"],
        ..FeatureRule::empty(Feature::Burnable)
    },
];

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let symbol = input.symbol;
    let mut parts = ContractParts::new(
        &["import \"@openzeppelin/contracts/token/ERC721/ERC721.sol\";"],
        &["ERC721"],
    );
    parts.apply(input.features, RULES);
    parts
        .variables
        .push("uint256 public nextTokenId;".to_string());

    let uri_storage = parts.has_inheritance("ERC721URIStorage");
    let enumerable = parts.has_inheritance("ERC721Enumerable");
    let royalties = parts.has_inheritance("ERC721Royalty");

    if input.features.contains(Feature::Mintable) {
        let body = if uri_storage {
            "    function mint(address to, string memory uri) public onlyOwner {\n        uint256 tokenId = nextTokenId;\n        _safeMint(to, tokenId);\n        _setTokenURI(tokenId, uri);\n        nextTokenId++;\n    }"
        } else {
            "    function mint(address to) public onlyOwner {\n        _safeMint(to, nextTokenId);\n        nextTokenId++;\n    }"
        };
        parts.functions.push(body.to_string());
    }

    append_override_stubs(&mut parts, enumerable, uri_storage, royalties);

    let variables = format!("    {}\n\n", parts.variables.join("\n    "));
    let ctor_stmts = if parts.constructor_stmts.is_empty() {
        String::new()
    } else {
        format!("        {}\n", parts.constructor_stmts.join("\n        "))
    };
    let functions = if parts.functions.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", parts.functions.join("\n\n"))
    };

    format!(
        "{prologue}\n{doc}\ncontract {name} {inherits}{{\n{variables}    constructor() ERC721(\"{name}\", \"{symbol}\") {{\n{ctor_stmts}    }}\n{functions}}}\n",
        prologue = file_prologue(&parts.imports),
        doc = natspec("ERC721 NFT Contract", name, input.prompt, input.seed, input.timestamp),
        inherits = parts.inherits_clause(),
    )
}

/// Emits the `override(...)` stubs Solidity requires under multiple
/// inheritance. The override list of each stub is computed from which of
/// the three extensions are present.
fn append_override_stubs(
    parts: &mut ContractParts,
    enumerable: bool,
    uri_storage: bool,
    royalties: bool,
) {
    if enumerable {
        parts.functions.push(
            "    function _beforeTokenTransfer(address from, address to, uint256 tokenId, uint256 batchSize)\n        internal override(ERC721, ERC721Enumerable)\n    {\n        super._beforeTokenTransfer(from, to, tokenId, batchSize);\n    }"
                .to_string(),
        );
    }

    if uri_storage || royalties {
        let mut burn_overrides = vec!["ERC721"];
        if uri_storage {
            burn_overrides.push("ERC721URIStorage");
        }
        if royalties {
            burn_overrides.push("ERC721Royalty");
        }
        parts.functions.push(format!(
            "    function _burn(uint256 tokenId) internal override({}) {{\n        super._burn(tokenId);\n    }}",
            burn_overrides.join(", ")
        ));
    }

    if uri_storage {
        parts.functions.push(
            "    function tokenURI(uint256 tokenId) public view override(ERC721, ERC721URIStorage) returns (string memory) {\n        return super.tokenURI(tokenId);\n    }"
                .to_string(),
        );
    }

    if enumerable || uri_storage || royalties {
        let mut iface_overrides = vec!["ERC721"];
        if enumerable {
            iface_overrides.push("ERC721Enumerable");
        }
        if uri_storage {
            iface_overrides.push("ERC721URIStorage");
        }
        if royalties {
            iface_overrides.push("ERC721Royalty");
        }
        parts.functions.push(format!(
            "    function supportsInterface(bytes4 interfaceId) public view override({}) returns (bool) {{\n        return super.supportsInterface(interfaceId);\n    }}",
            iface_overrides.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn code_for(prompt: &str) -> String {
        let c = classify(prompt);
        assemble(&TemplateInput {
            name: &c.name,
            symbol: c.params.symbol.as_deref().unwrap_or("NFT"),
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn test_plain_nft_has_no_override_stubs() {
        let code = code_for("an nft");
        assert!(code.contains("contract MonadNFT is ERC721 {"));
        assert!(!code.contains("override("));
    }

    #[test]
    fn test_uri_storage_mint_takes_uri() {
        let code = code_for("mintable nft with metadata");
        assert!(code.contains("ERC721URIStorage"));
        assert!(code.contains("function mint(address to, string memory uri)"));
        assert!(code.contains("_setTokenURI(tokenId, uri);"));
        assert!(code.contains("override(ERC721, ERC721URIStorage)"));
    }

    #[test]
    fn test_all_three_extensions_widen_override_lists() {
        let code = code_for("enumerable nft with metadata and royalties");
        assert!(code.contains(
            "override(ERC721, ERC721Enumerable, ERC721URIStorage, ERC721Royalty)"
        ));
        assert!(code
            .contains("_burn(uint256 tokenId) internal override(ERC721, ERC721URIStorage, ERC721Royalty)"));
        assert!(code.contains("override(ERC721, ERC721Enumerable)"));
        assert!(code.contains("_setDefaultRoyalty(msg.sender, 500);"));
    }

    #[test]
    fn test_enumerable_only() {
        let code = code_for("enumerable nft collection");
        assert!(code.contains("_beforeTokenTransfer"));
        assert!(code.contains(
            "supportsInterface(bytes4 interfaceId) public view override(ERC721, ERC721Enumerable)"
        ));
        assert!(!code.contains("_burn("));
    }
}
