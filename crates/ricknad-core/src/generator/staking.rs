//! Staking pool assembler.
//!
//! The largest fixed template: a synthetix-style reward accumulator with
//! `rewardPerToken` / `earned` accounting. The lock period and reward rate
//! come from prompt parameters with fixed defaults.

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

const DEFAULT_LOCK_DAYS: u32 = 30;
const DEFAULT_REWARD_RATE_PCT: f64 = 10.0;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let lock_days = input.params.staking_period_days.unwrap_or(DEFAULT_LOCK_DAYS);
    let reward_rate = input.params.reward_rate.unwrap_or(DEFAULT_REWARD_RATE_PCT);

    let mut parts = ContractParts::new(
        &[
            "import \"@openzeppelin/contracts/token/ERC20/IERC20.sol\";",
            "import \"@openzeppelin/contracts/security/ReentrancyGuard.sol\";",
        ],
        &["ReentrancyGuard"],
    );
    parts.apply(input.features, RULES);

    let stake_guard = if input.features.contains(Feature::Pausable) {
        " whenNotPaused"
    } else {
        ""
    };

    format!(
        r#"{prologue}
{doc}
contract {name} {inherits}{{
    IERC20 public immutable stakingToken;
    IERC20 public immutable rewardToken;

    uint256 public constant LOCK_PERIOD = {lock_days} days;
    uint256 public constant REWARD_RATE = {reward_rate_bps}; // basis points per year

    uint256 public totalStaked;
    uint256 public rewardPerTokenStored;
    uint256 public lastUpdateTime;

    mapping(address => uint256) public balances;
    mapping(address => uint256) public stakedAt;
    mapping(address => uint256) public userRewardPerTokenPaid;
    mapping(address => uint256) public rewards;

    event Staked(address indexed user, uint256 amount);
    event Withdrawn(address indexed user, uint256 amount);
    event RewardPaid(address indexed user, uint256 reward);

    constructor(address _stakingToken, address _rewardToken) {{
        stakingToken = IERC20(_stakingToken);
        rewardToken = IERC20(_rewardToken);
    }}

    modifier updateReward(address account) {{
        rewardPerTokenStored = rewardPerToken();
        lastUpdateTime = block.timestamp;
        if (account != address(0)) {{
            rewards[account] = earned(account);
            userRewardPerTokenPaid[account] = rewardPerTokenStored;
        }}
        _;
    }}

    function rewardPerToken() public view returns (uint256) {{
        if (totalStaked == 0) {{
            return rewardPerTokenStored;
        }}
        return rewardPerTokenStored
            + ((block.timestamp - lastUpdateTime) * REWARD_RATE * 1e18) / (365 days * 10000 * totalStaked);
    }}

    function earned(address account) public view returns (uint256) {{
        return (balances[account] * (rewardPerToken() - userRewardPerTokenPaid[account])) / 1e18
            + rewards[account];
    }}

    function stake(uint256 amount) external nonReentrant{stake_guard} updateReward(msg.sender) {{
        require(amount > 0, "Cannot stake 0");
        totalStaked += amount;
        balances[msg.sender] += amount;
        stakedAt[msg.sender] = block.timestamp;
        stakingToken.transferFrom(msg.sender, address(this), amount);
        emit Staked(msg.sender, amount);
    }}

    function withdraw(uint256 amount) external nonReentrant updateReward(msg.sender) {{
        require(amount > 0, "Cannot withdraw 0");
        require(block.timestamp >= stakedAt[msg.sender] + LOCK_PERIOD, "Still locked");
        totalStaked -= amount;
        balances[msg.sender] -= amount;
        stakingToken.transfer(msg.sender, amount);
        emit Withdrawn(msg.sender, amount);
    }}

    function getReward() external nonReentrant updateReward(msg.sender) {{
        uint256 reward = rewards[msg.sender];
        if (reward > 0) {{
            rewards[msg.sender] = 0;
            rewardToken.transfer(msg.sender, reward);
            emit RewardPaid(msg.sender, reward);
        }}
    }}
{extra}}}
"#,
        prologue = file_prologue(&parts.imports),
        doc = natspec("Staking Contract", name, input.prompt, input.seed, input.timestamp),
        inherits = parts.inherits_clause(),
        reward_rate_bps = (reward_rate * 100.0) as u64,
        extra = if parts.functions.is_empty() {
            String::new()
        } else {
            format!("\n{}\n", parts.functions.join("\n\n"))
        },
    )
}
