//! ERC-20 assemblers: the standard token and the UUPS-upgradeable variant.

use super::rules::{file_prologue, natspec, ContractParts, FeatureRule};
use super::TemplateInput;
use crate::types::Feature;

/// Feature rules in ERC-20 priority order. `roles` replaces `Ownable`;
/// `capped` replaces the `ERC20` base with `ERC20Capped`.
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
        add_imports: &["import \"@openzeppelin/contracts/access/AccessControl.sol\";"],
        remove_inheritance: &["Ownable"],
        add_inheritance: &["AccessControl"],
        variables: &[
            "bytes32 public constant MINTER_ROLE = keccak256(\"MINTER_ROLE\");",
            "bytes32 public constant BURNER_ROLE = keccak256(\"BURNER_ROLE\");",
        ],
        constructor_stmts: &[
            "_grantRole(DEFAULT_ADMIN_ROLE, msg.sender);",
            "_grantRole(MINTER_ROLE, msg.sender);",
            "_grantRole(BURNER_ROLE, msg.sender);",
        ],
        ..FeatureRule::empty(Feature::Roles)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC20/extensions/ERC20Burnable.sol\";"],
        add_inheritance: &["ERC20Burnable"],
        ..FeatureRule::empty(Feature::Burnable)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC20/extensions/ERC20Capped.sol\";"],
        remove_inheritance: &["ERC20"],
        add_inheritance: &["ERC20Capped"],
        prepend_inheritance: true,
        ..FeatureRule::empty(Feature::Capped)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC20/extensions/ERC20Permit.sol\";"],
        add_inheritance: &["ERC20Permit"],
        ..FeatureRule::empty(Feature::Permit)
    },
    FeatureRule {
        add_imports: &["import \"@openzeppelin/contracts/token/ERC20/extensions/ERC20Votes.sol\";"],
        add_inheritance: &["ERC20Votes"],
        ..FeatureRule::empty(Feature::Votes)
    },
];

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let symbol = input.symbol;
    let mut parts = ContractParts::new(
        &["import \"@openzeppelin/contracts/token/ERC20/ERC20.sol\";"],
        &["ERC20"],
    );
    parts.apply(input.features, RULES);

    let cap_amount = input.params.supply.unwrap_or(1_000_000);
    if input.features.contains(Feature::Capped) {
        parts
            .variables
            .push("uint256 public immutable supplyCap;".to_string());
        parts
            .constructor_stmts
            .push(format!("supplyCap = {cap_amount} * 10 ** decimals();"));
    }

    // Mint body depends on the access-control rule that won.
    if input.features.contains(Feature::Mintable) {
        let body = if input.features.contains(Feature::Roles) {
            "    function mint(address to, uint256 amount) public {\n        require(hasRole(MINTER_ROLE, msg.sender), \"Must have minter role to mint\");\n        _mint(to, amount);\n    }"
        } else {
            "    function mint(address to, uint256 amount) public onlyOwner {\n        _mint(to, amount);\n    }"
        };
        parts.functions.push(body.to_string());
    }

    // Constructor modifier list. No cross-feature validation happens here:
    // capped + permit assembles conflicting modifiers, same as the web
    // dashboard does.
    let mut modifiers = vec![format!("ERC20(\"{name}\", \"{symbol}\")")];
    if input.features.contains(Feature::Capped) {
        modifiers.push(format!("ERC20Capped({cap_amount} * 10 ** decimals())"));
    }
    if input.features.contains(Feature::Permit) {
        modifiers.push(format!("ERC20Permit(\"{name}\")"));
    }

    let variables = if parts.variables.is_empty() {
        String::new()
    } else {
        format!("    {}\n\n", parts.variables.join("\n    "))
    };
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
        "{prologue}\n{doc}\ncontract {name} {inherits}{{\n{variables}    constructor(uint256 initialSupply) {modifiers} {{\n{ctor_stmts}        _mint(msg.sender, initialSupply);\n    }}\n{functions}}}\n",
        prologue = file_prologue(&parts.imports),
        doc = natspec("ERC20 Token Contract", name, input.prompt, input.seed, input.timestamp),
        inherits = parts.inherits_clause(),
        modifiers = modifiers.join(" "),
    )
}

/// UUPS-upgradeable ERC-20. Fixed extension set; the initializer replaces
/// the constructor, so the feature rule table above does not apply.
pub(super) fn assemble_upgradeable(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let symbol = input.symbol;
    let imports = [
        "import \"@openzeppelin/contracts-upgradeable/token/ERC20/ERC20Upgradeable.sol\";",
        "import \"@openzeppelin/contracts-upgradeable/token/ERC20/extensions/ERC20BurnableUpgradeable.sol\";",
        "import \"@openzeppelin/contracts-upgradeable/access/OwnableUpgradeable.sol\";",
        "import \"@openzeppelin/contracts-upgradeable/proxy/utils/Initializable.sol\";",
        "import \"@openzeppelin/contracts-upgradeable/proxy/utils/UUPSUpgradeable.sol\";",
    ]
    .map(String::from);

    format!(
        "{prologue}\n{doc}\ncontract {name} is Initializable, ERC20Upgradeable, ERC20BurnableUpgradeable, OwnableUpgradeable, UUPSUpgradeable {{\n    /// @custom:oz-upgrades-unsafe-allow constructor\n    constructor() {{\n        _disableInitializers();\n    }}\n\n    function initialize() public initializer {{\n        __ERC20_init(\"{name}\", \"{symbol}\");\n        __ERC20Burnable_init();\n        __Ownable_init(msg.sender);\n        __UUPSUpgradeable_init();\n    }}\n\n    function mint(address to, uint256 amount) public onlyOwner {{\n        _mint(to, amount);\n    }}\n\n    function _authorizeUpgrade(address newImplementation) internal onlyOwner override {{}}\n}}\n",
        prologue = file_prologue(&imports),
        doc = natspec(
            "ERC20 Token Contract (UUPS Upgradeable)",
            name,
            input.prompt,
            input.seed,
            input.timestamp
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn input_for<'a>(
        classification: &'a crate::classifier::Classification,
        prompt: &'a str,
    ) -> TemplateInput<'a> {
        TemplateInput {
            name: &classification.name,
            symbol: classification.params.symbol.as_deref().unwrap_or("TKN"),
            features: &classification.features,
            params: &classification.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        }
    }

    #[test]
    fn test_plain_erc20() {
        let prompt = "simple erc20";
        let c = classify(prompt);
        let code = assemble(&input_for(&c, prompt));
        assert!(code.contains("contract MonadToken is ERC20 {"));
        assert!(code.contains("pragma solidity ^0.8.20;"));
        assert!(code.contains("_mint(msg.sender, initialSupply);"));
        assert!(!code.contains("function mint("));
    }

    #[test]
    fn test_mint_and_burn_inheritance() {
        let prompt = "create an ERC20 token called MonadCoin with mint and burn";
        let c = classify(prompt);
        let code = assemble(&input_for(&c, prompt));
        assert!(code.contains("contract MonadCoin is ERC20, ERC20Burnable {"));
        assert!(code.contains("function mint(address to, uint256 amount) public onlyOwner"));
        assert!(code.contains("ERC20Burnable.sol"));
    }

    #[test]
    fn test_capped_replaces_base() {
        let prompt = "erc20 with a cap, supply: 5 million";
        let c = classify(prompt);
        let code = assemble(&input_for(&c, prompt));
        assert!(code.contains("contract MonadToken is ERC20Capped {"));
        assert!(code.contains("ERC20Capped(5000000 * 10 ** decimals())"));
        assert!(code.contains("supplyCap = 5000000 * 10 ** decimals();"));
        assert!(!code.contains("is ERC20 {"));
    }

    #[test]
    fn test_roles_replace_ownable_and_gate_mint() {
        let prompt = "mintable erc20 token with owner and role based access control";
        let c = classify(prompt);
        let code = assemble(&input_for(&c, prompt));
        assert!(code.contains("AccessControl"));
        assert!(!code.contains(", Ownable"));
        assert!(code.contains("hasRole(MINTER_ROLE, msg.sender)"));
        assert!(code.contains("_grantRole(DEFAULT_ADMIN_ROLE, msg.sender);"));
    }

    #[test]
    fn test_upgradeable_variant() {
        let prompt = "upgradeable erc20 token called Phoenix";
        let c = classify(prompt);
        let code = assemble_upgradeable(&input_for(&c, prompt));
        assert!(code.contains("contract Phoenix is Initializable, ERC20Upgradeable"));
        assert!(code.contains("__UUPSUpgradeable_init();"));
        assert!(code.contains("_disableInitializers();"));
    }
}
