//! Escrow assembler: buyer/seller/arbiter with deposit, release, refund.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let imports: [String; 0] = [];

    format!(
        r#"{prologue}
{doc}
contract {name} {{
    enum State {{ AwaitingDeposit, AwaitingDelivery, Complete, Refunded }}

    address public immutable buyer;
    address public immutable seller;
    address public immutable arbiter;
    uint256 public amount;
    State public state;

    event Deposited(uint256 amount);
    event Released(uint256 amount);
    event Refunded(uint256 amount);

    constructor(address _buyer, address _seller, address _arbiter) {{
        buyer = _buyer;
        seller = _seller;
        arbiter = _arbiter;
        state = State.AwaitingDeposit;
    }}

    function deposit() external payable {{
        require(msg.sender == buyer, "Only buyer can deposit");
        require(state == State.AwaitingDeposit, "Already funded");
        require(msg.value > 0, "Zero deposit");
        amount = msg.value;
        state = State.AwaitingDelivery;
        emit Deposited(msg.value);
    }}

    function release() external {{
        require(msg.sender == buyer || msg.sender == arbiter, "Not authorized");
        require(state == State.AwaitingDelivery, "Nothing to release");
        state = State.Complete;
        uint256 payout = amount;
        amount = 0;
        (bool success, ) = seller.call{{value: payout}}("");
        require(success, "Transfer failed");
        emit Released(payout);
    }}

    function refund() external {{
        require(msg.sender == seller || msg.sender == arbiter, "Not authorized");
        require(state == State.AwaitingDelivery, "Nothing to refund");
        state = State.Refunded;
        uint256 payout = amount;
        amount = 0;
        (bool success, ) = buyer.call{{value: payout}}("");
        require(success, "Transfer failed");
        emit Refunded(payout);
    }}
}}
"#,
        prologue = file_prologue(&imports),
        doc = natspec("Escrow Contract", name, input.prompt, input.seed, input.timestamp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    #[test]
    fn test_escrow_state_machine() {
        let prompt = "an escrow between buyer and seller";
        let c = classify(prompt);
        let code = assemble(&TemplateInput {
            name: &c.name,
            symbol: "ESC",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        });
        assert!(code.contains("contract MonadEscrow {"));
        assert!(code.contains("function deposit() external payable"));
        assert!(code.contains("function release() external"));
        assert!(code.contains("function refund() external"));
        assert!(code.contains("enum State"));
    }
}
