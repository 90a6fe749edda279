//! ERC-4626 tokenized vault assembler.

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
];

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let symbol = input.symbol;
    let mut parts = ContractParts::new(
        &[
            "import \"@openzeppelin/contracts/token/ERC20/extensions/ERC4626.sol\";",
            "import \"@openzeppelin/contracts/token/ERC20/IERC20.sol\";",
        ],
        &["ERC4626"],
    );
    parts.apply(input.features, RULES);

    let functions = if parts.functions.is_empty() {
        String::new()
    } else {
        format!("\n{}\n", parts.functions.join("\n\n"))
    };

    format!(
        "{prologue}\n{doc}\ncontract {name} {inherits}{{\n    constructor(IERC20 asset_) ERC4626(asset_) ERC20(\"{name}\", \"{symbol}\") {{}}\n\n    function totalAssets() public view override returns (uint256) {{\n        return super.totalAssets();\n    }}\n{functions}}}\n",
        prologue = file_prologue(&parts.imports),
        doc = natspec(
            "ERC4626 Tokenized Vault",
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

    #[test]
    fn test_vault_constructor_wires_asset() {
        let prompt = "an erc4626 vault called YieldBox";
        let c = classify(prompt);
        let code = assemble(&TemplateInput {
            name: &c.name,
            symbol: c.params.symbol.as_deref().unwrap_or("MVLT"),
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        });
        assert!(code.contains("contract YieldBox is ERC4626 {"));
        assert!(code.contains("constructor(IERC20 asset_) ERC4626(asset_) ERC20(\"YieldBox\", \"YIELD\")"));
    }
}
