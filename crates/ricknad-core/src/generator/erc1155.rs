//! ERC-1155 multi-token assembler.

use super::rules::{file_prologue, natspec, ContractParts, FeatureRule};
use super::TemplateInput;
use crate::types::Feature;

const RULES: &[FeatureRule] = &[
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
        add_imports: &["import \"@openzeppelin/contracts/token/ERC1155/extensions/ERC1155Burnable.sol\";"],
        add_inheritance: &["ERC1155Burnable"],
        ..FeatureRule::empty(Feature::Burnable)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/common/ERC2981.sol\";"],
        add_inheritance: &["ERC2981"],
        constructor_stmts: &["_setDefaultRoyalty(msg.sender, 500);"],
        ..FeatureRule::empty(Feature::Royalties)
    },
    FeatureRule {
        functions: &["    function setURI(string memory newuri) public onlyOwner {\n        _setURI(newuri);\n    }"],
        ..FeatureRule::empty(Feature::Metadata)
    },
];

const BASE_URI: &str = "https://metadata.monad.xyz/{id}.json";

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let mut parts = ContractParts::new(
        &["import \"@openzeppelin/contracts/token/ERC1155/ERC1155.sol\";"],
        &["ERC1155"],
    );
    parts.apply(input.features, RULES);

    if input.features.contains(Feature::Mintable) {
        parts.functions.push(
            "    function mint(address to, uint256 id, uint256 amount, bytes memory data) public onlyOwner {\n        _mint(to, id, amount, data);\n    }"
                .to_string(),
        );
    }
    if input.features.contains(Feature::Batchable) || input.features.contains(Feature::Mintable) {
        parts.functions.push(
            "    function mintBatch(address to, uint256[] memory ids, uint256[] memory amounts, bytes memory data) public onlyOwner {\n        _mintBatch(to, ids, amounts, data);\n    }"
                .to_string(),
        );
    }
    if parts.has_inheritance("ERC2981") {
        parts.functions.push(
            "    function supportsInterface(bytes4 interfaceId) public view override(ERC1155, ERC2981) returns (bool) {\n        return super.supportsInterface(interfaceId);\n    }"
                .to_string(),
        );
    }

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
        "{prologue}\n{doc}\ncontract {name} {inherits}{{\n    constructor() ERC1155(\"{BASE_URI}\") {{\n{ctor_stmts}    }}\n{functions}}}\n",
        prologue = file_prologue(&parts.imports),
        doc = natspec(
            "ERC1155 Multi-Token Contract",
            name,
            input.prompt,
            input.seed,
            input.timestamp
        ),
        inherits = parts.inherits_clause(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn code_for(prompt: &str) -> String {
        let c = classify(prompt);
        assemble(&TemplateInput {
            name: &c.name,
            symbol: c.params.symbol.as_deref().unwrap_or("MMT"),
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn test_plain_multi_token() {
        let code = code_for("erc1155");
        assert!(code.contains("contract MonadMultiToken is ERC1155 {"));
        assert!(code.contains(&format!("ERC1155(\"{BASE_URI}\")")));
        assert!(!code.contains("function mint("));
    }

    #[test]
    fn test_mintable_gets_single_and_batch_mint() {
        let code = code_for("mintable erc1155 multi token");
        assert!(code.contains("function mint(address to, uint256 id, uint256 amount"));
        assert!(code.contains("function mintBatch(address to, uint256[] memory ids"));
    }

    #[test]
    fn test_royalties_add_erc2981_and_interface_stub() {
        let code = code_for("erc1155 with royalties");
        assert!(code.contains("is ERC1155, ERC2981 {"));
        assert!(code.contains("override(ERC1155, ERC2981)"));
        assert!(code.contains("_setDefaultRoyalty(msg.sender, 500);"));
    }
}
