//! Multi-signature wallet assembler.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;

const DEFAULT_REQUIRED: u32 = 2;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let required = input
        .params
        .threshold
        .map(|(required, _)| required)
        .unwrap_or(DEFAULT_REQUIRED);
    let imports: [String; 0] = [];

    format!(
        r#"{prologue}
{doc}
contract {name} {{
    uint256 public constant REQUIRED_CONFIRMATIONS = {required};

    address[] public owners;
    mapping(address => bool) public isOwner;

    struct Transaction {{
        address to;
        uint256 value;
        bytes data;
        bool executed;
        uint256 confirmations;
    }}

    Transaction[] public transactions;
    mapping(uint256 => mapping(address => bool)) public confirmed;

    event TransactionSubmitted(uint256 indexed txId, address indexed proposer);
    event TransactionConfirmed(uint256 indexed txId, address indexed owner);
    event TransactionExecuted(uint256 indexed txId);

    modifier onlyOwner() {{
        require(isOwner[msg.sender], "Not an owner");
        _;
    }}

    constructor(address[] memory _owners) {{
        require(_owners.length >= REQUIRED_CONFIRMATIONS, "Not enough owners");
        for (uint256 i = 0; i < _owners.length; i++) {{
            address owner = _owners[i];
            require(owner != address(0), "Zero owner");
            require(!isOwner[owner], "Duplicate owner");
            isOwner[owner] = true;
            owners.push(owner);
        }}
    }}

    receive() external payable {{}}

    function submitTransaction(address to, uint256 value, bytes memory data)
        external onlyOwner returns (uint256 txId)
    {{
        txId = transactions.length;
        transactions.push(Transaction({{
            to: to,
            value: value,
            data: data,
            executed: false,
            confirmations: 0
        }}));
        emit TransactionSubmitted(txId, msg.sender);
    }}

    function confirmTransaction(uint256 txId) external onlyOwner {{
        require(txId < transactions.length, "Unknown transaction");
        require(!confirmed[txId][msg.sender], "Already confirmed");
        require(!transactions[txId].executed, "Already executed");
        confirmed[txId][msg.sender] = true;
        transactions[txId].confirmations += 1;
        emit TransactionConfirmed(txId, msg.sender);
    }}

    function executeTransaction(uint256 txId) external onlyOwner {{
        Transaction storage txn = transactions[txId];
        require(!txn.executed, "Already executed");
        require(txn.confirmations >= REQUIRED_CONFIRMATIONS, "Not enough confirmations");
        txn.executed = true;
        (bool success, ) = txn.to.call{{value: txn.value}}(txn.data);
        require(success, "Execution failed");
        emit TransactionExecuted(txId);
    }}
}}
"#,
        prologue = file_prologue(&imports),
        doc = natspec(
            "Multi-Signature Wallet",
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

    fn code_for(prompt: &str) -> String {
        let c = classify(prompt);
        assemble(&TemplateInput {
            name: &c.name,
            symbol: "MSW",
            features: &c.features,
            params: &c.params,
            prompt,
            seed: 7,
            timestamp: "2024-01-01T00:00:00Z",
        })
    }

    #[test]
    fn test_threshold_from_prompt() {
        let code = code_for("make a 3 of 5 multisig wallet");
        assert!(code.contains("REQUIRED_CONFIRMATIONS = 3;"));
        assert!(code.contains("function submitTransaction("));
        assert!(code.contains("function confirmTransaction("));
        assert!(code.contains("function executeTransaction("));
    }

    #[test]
    fn test_default_threshold() {
        let code = code_for("a multisig for the team treasury");
        assert!(code.contains("REQUIRED_CONFIRMATIONS = 2;"));
        assert!(code.contains("contract MonadMultiSig {"));
    }
}
