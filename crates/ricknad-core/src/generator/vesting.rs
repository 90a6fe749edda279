//! Token vesting assembler: linear release with a cliff.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let imports = [
        "import \"@openzeppelin/contracts/token/ERC20/IERC20.sol\";",
        "import \"@openzeppelin/contracts/access/Ownable.sol\";",
    ]
    .map(String::from);

    format!(
        r#"{prologue}
{doc}
contract {name} is Ownable {{
    IERC20 public immutable token;

    struct VestingSchedule {{
        uint256 totalAmount;
        uint256 released;
        uint64 start;
        uint64 cliff;
        uint64 duration;
    }}

    mapping(address => VestingSchedule) public schedules;

    event ScheduleCreated(address indexed beneficiary, uint256 amount, uint64 start, uint64 cliff, uint64 duration);
    event TokensReleased(address indexed beneficiary, uint256 amount);

    constructor(address _token) {{
        token = IERC20(_token);
    }}

    function createSchedule(
        address beneficiary,
        uint256 amount,
        uint64 start,
        uint64 cliffDuration,
        uint64 duration
    ) external onlyOwner {{
        require(beneficiary != address(0), "Zero beneficiary");
        require(amount > 0, "Zero amount");
        require(cliffDuration <= duration, "Cliff exceeds duration");
        require(schedules[beneficiary].totalAmount == 0, "Schedule exists");

        schedules[beneficiary] = VestingSchedule({{
            totalAmount: amount,
            released: 0,
            start: start,
            cliff: start + cliffDuration,
            duration: duration
        }});
        token.transferFrom(msg.sender, address(this), amount);
        emit ScheduleCreated(beneficiary, amount, start, start + cliffDuration, duration);
    }}

    function vestedAmount(address beneficiary, uint64 timestamp) public view returns (uint256) {{
        VestingSchedule storage schedule = schedules[beneficiary];
        if (timestamp < schedule.cliff) {{
            return 0;
        }}
        if (timestamp >= schedule.start + schedule.duration) {{
            return schedule.totalAmount;
        }}
        return (schedule.totalAmount * (timestamp - schedule.start)) / schedule.duration;
    }}

    function releasable(address beneficiary) public view returns (uint256) {{
        return vestedAmount(beneficiary, uint64(block.timestamp)) - schedules[beneficiary].released;
    }}

    function release() external {{
        uint256 amount = releasable(msg.sender);
        require(amount > 0, "Nothing to release");
        schedules[msg.sender].released += amount;
        token.transfer(msg.sender, amount);
        emit TokensReleased(msg.sender, amount);
    }}
}}
"#,
        prologue = file_prologue(&imports),
        doc = natspec("Token Vesting Contract", name, input.prompt, input.seed, input.timestamp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_vesting_has_cliff_schedule() {
        let prompt = "vesting contract for the team";
        let c = classify(prompt);
        let code = assemble(&TemplateInput {
            name: &c.name,
            symbol: "VST",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        });
        assert!(code.contains("struct VestingSchedule"));
        assert!(code.contains("function release() external"));
        assert!(code.contains("if (timestamp < schedule.cliff)"));
    }
}
