//! Generic UUPS-upgradeable contract assembler (non-token).

use super::rules::{file_prologue, natspec};
use super::TemplateInput;
use crate::types::Feature;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let pausable = input.features.contains(Feature::Pausable);

    let mut imports = vec![
        "import \"@openzeppelin/contracts-upgradeable/proxy/utils/Initializable.sol\";".to_string(),
        "import \"@openzeppelin/contracts-upgradeable/proxy/utils/UUPSUpgradeable.sol\";".to_string(),
        "import \"@openzeppelin/contracts-upgradeable/access/OwnableUpgradeable.sol\";".to_string(),
    ];
    let mut inheritance = vec!["Initializable", "OwnableUpgradeable", "UUPSUpgradeable"];
    let mut init_stmts = vec!["__Ownable_init(msg.sender);", "__UUPSUpgradeable_init();"];
    let mut functions = vec![
        "    function setValue(uint256 newValue) public onlyOwner {\n        value = newValue;\n    }"
            .to_string(),
        "    function _authorizeUpgrade(address newImplementation) internal onlyOwner override {}"
            .to_string(),
    ];

    if pausable {
        imports.push(
            "import \"@openzeppelin/contracts-upgradeable/security/PausableUpgradeable.sol\";"
                .to_string(),
        );
        inheritance.insert(1, "PausableUpgradeable");
        init_stmts.insert(0, "__Pausable_init();");
        functions.insert(
            0,
            "    function pause() public onlyOwner {\n        _pause();\n    }\n\n    function unpause() public onlyOwner {\n        _unpause();\n    }"
                .to_string(),
        );
    }

    format!(
        "{prologue}\n{doc}\ncontract {name} is {inherits} {{\n    uint256 public value;\n\n    /// @custom:oz-upgrades-unsafe-allow constructor\n    constructor() {{\n        _disableInitializers();\n    }}\n\n    function initialize() public initializer {{\n        {init}\n    }}\n\n{functions}\n}}\n",
        prologue = file_prologue(&imports),
        doc = natspec(
            "Upgradeable Contract (UUPS)",
            name,
            input.prompt,
            input.seed,
            input.timestamp
        ),
        inherits = inheritance.join(", "),
        init = init_stmts.join("\n        "),
        functions = functions.join("\n\n"),
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
            symbol: "UPG",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn test_uups_skeleton() {
        let code = code_for("an upgradeable contract");
        assert!(code.contains(
            "contract MonadUpgradeable is Initializable, OwnableUpgradeable, UUPSUpgradeable {"
        ));
        assert!(code.contains("_disableInitializers();"));
        assert!(code.contains("function _authorizeUpgrade(address newImplementation)"));
        assert!(!code.contains("Pausable"));
    }

    #[test]
    fn test_pausable_upgradeable() {
        let code = code_for("a pausable upgradeable proxy");
        assert!(code.contains("PausableUpgradeable"));
        assert!(code.contains("__Pausable_init();"));
        assert!(code.contains("function pause() public onlyOwner"));
    }
}
