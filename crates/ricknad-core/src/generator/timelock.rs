//! Timelock controller assembler.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let imports = ["import \"@openzeppelin/contracts/governance/TimelockController.sol\";"]
        .map(String::from);

    format!(
        r#"{prologue}
{doc}
contract {name} is TimelockController {{
    constructor(
        uint256 minDelay,
        address[] memory proposers,
        address[] memory executors,
        address admin
    ) TimelockController(minDelay, proposers, executors, admin) {{}}
}}
"#,
        prologue = file_prologue(&imports),
        doc = natspec("Timelock Controller", name, input.prompt, input.seed, input.timestamp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_timelock_wraps_controller() {
        let prompt = "a timelock for the treasury";
        let c = classify(prompt);
        let code = assemble(&TemplateInput {
            name: &c.name,
            symbol: "TL",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        });
        assert!(code.contains("contract MonadTimelock is TimelockController {"));
        assert!(code.contains("TimelockController(minDelay, proposers, executors, admin)"));
    }
}
