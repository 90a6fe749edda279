//! Governor (DAO) assembler.
//!
//! Always emits the full OpenZeppelin Governor extension stack. When the
//! `timelock` feature is present the contract additionally inherits
//! `GovernorTimelockControl`, which forces a second set of override stubs.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;
use crate::types::Feature;

const DEFAULT_QUORUM_PCT: u32 = 4;
const DEFAULT_VOTING_DAYS: u32 = 7;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let quorum = input.params.quorum.unwrap_or(DEFAULT_QUORUM_PCT);
    let voting_days = input.params.voting_period_days.unwrap_or(DEFAULT_VOTING_DAYS);
    let timelocked = input.features.contains(Feature::Timelock);

    let mut imports = vec![
        "import \"@openzeppelin/contracts/governance/Governor.sol\";".to_string(),
        "import \"@openzeppelin/contracts/governance/extensions/GovernorSettings.sol\";".to_string(),
        "import \"@openzeppelin/contracts/governance/extensions/GovernorCountingSimple.sol\";".to_string(),
        "import \"@openzeppelin/contracts/governance/extensions/GovernorVotes.sol\";".to_string(),
        "import \"@openzeppelin/contracts/governance/extensions/GovernorVotesQuorumFraction.sol\";".to_string(),
    ];
    let mut inheritance = vec![
        "Governor",
        "GovernorSettings",
        "GovernorCountingSimple",
        "GovernorVotes",
        "GovernorVotesQuorumFraction",
    ];
    let mut ctor_params = vec!["IVotes _token"];
    let mut ctor_modifiers = vec![
        format!("Governor(\"{name}\")"),
        format!("GovernorSettings(1 days, {voting_days} days, 0)"),
        "GovernorVotes(_token)".to_string(),
        format!("GovernorVotesQuorumFraction({quorum})"),
    ];

    if timelocked {
        imports.push(
            "import \"@openzeppelin/contracts/governance/extensions/GovernorTimelockControl.sol\";"
                .to_string(),
        );
        inheritance.push("GovernorTimelockControl");
        ctor_params.push("TimelockController _timelock");
        ctor_modifiers.push("GovernorTimelockControl(_timelock)".to_string());
    }

    let timelock_overrides = if timelocked {
        r#"
    function state(uint256 proposalId)
        public view override(Governor, GovernorTimelockControl)
        returns (ProposalState)
    {
        return super.state(proposalId);
    }

    function _execute(uint256 proposalId, address[] memory targets, uint256[] memory values, bytes[] memory calldatas, bytes32 descriptionHash)
        internal override(Governor, GovernorTimelockControl)
    {
        super._execute(proposalId, targets, values, calldatas, descriptionHash);
    }

    function _cancel(address[] memory targets, uint256[] memory values, bytes[] memory calldatas, bytes32 descriptionHash)
        internal override(Governor, GovernorTimelockControl)
        returns (uint256)
    {
        return super._cancel(targets, values, calldatas, descriptionHash);
    }

    function _executor()
        internal view override(Governor, GovernorTimelockControl)
        returns (address)
    {
        return super._executor();
    }

    function supportsInterface(bytes4 interfaceId)
        public view override(Governor, GovernorTimelockControl)
        returns (bool)
    {
        return super.supportsInterface(interfaceId);
    }
"#
    } else {
        ""
    };

    format!(
        r#"{prologue}
{doc}
contract {name} is {inherits} {{
    constructor({params})
        {modifiers}
    {{}}

    function votingDelay() public view override(Governor, GovernorSettings) returns (uint256) {{
        return super.votingDelay();
    }}

    function votingPeriod() public view override(Governor, GovernorSettings) returns (uint256) {{
        return super.votingPeriod();
    }}

    function proposalThreshold() public view override(Governor, GovernorSettings) returns (uint256) {{
        return super.proposalThreshold();
    }}
{timelock_overrides}}}
"#,
        prologue = file_prologue(&imports),
        doc = natspec("Governance Contract", name, input.prompt, input.seed, input.timestamp),
        inherits = inheritance.join(", "),
        params = ctor_params.join(", "),
        modifiers = ctor_modifiers.join("\n        "),
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
            symbol: "GOV",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn test_default_governor() {
        let code = code_for("a dao");
        assert!(code.contains("contract MonadDAO is Governor, GovernorSettings"));
        assert!(code.contains("GovernorVotesQuorumFraction(4)"));
        assert!(code.contains("GovernorSettings(1 days, 7 days, 0)"));
        assert!(!code.contains("GovernorTimelockControl"));
    }

    #[test]
    fn test_quorum_and_voting_period_params() {
        let code = code_for("dao with quorum: 40 and voting period: 2 weeks");
        assert!(code.contains("GovernorVotesQuorumFraction(40)"));
        assert!(code.contains("GovernorSettings(1 days, 14 days, 0)"));
    }

    #[test]
    fn test_timelock_feature_adds_control_and_overrides() {
        let code = code_for("dao governance with a timelock");
        assert!(code.contains("GovernorTimelockControl"));
        assert!(code.contains("TimelockController _timelock"));
        assert!(code.contains("override(Governor, GovernorTimelockControl)"));
        assert!(code.contains("function _executor()"));
    }
}
