//! Mock compilation: pseudo-ABI extraction and a fixed bytecode blob.
//!
//! Nothing here parses Solidity. The "compiler" scans the source with
//! regexes and fabricates an ABI shaped like real solc output: a constructor
//! entry first, two event entries, then one entry per matched function
//! signature. The bytecode is a constant known-deployable sample, identical
//! for every contract.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::CompileError;

lazy_static! {
    static ref CONTRACT_RE: Regex = Regex::new(r"contract\s+(\w+)").unwrap();
    static ref EVENT_RE: Regex = Regex::new(r"event\s+(\w+)").unwrap();
    static ref FUNCTION_RE: Regex = Regex::new(
        r"function\s+(\w+)\s*\(([^)]*)\)\s*(public|private|internal|external)?\s*(view|pure)?\s*(?:returns\s*\(([^)]*)\))?"
    )
    .unwrap();
}

/// Deployable add(a, b) runtime, emitted verbatim for every compilation.
const BYTECODE_SAMPLE: &str = "608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b506004361061002b5760003560e01c8063771602f714610030575b600080fd5b61004a6004803603810190610045919061009d565b610060565b60405161005791906100d9565b60405180910390f35b6000818361006e91906100f4565b905092915050565b600080fd5b6000819050919050565b61008a8161007d565b811461009557600080fd5b50565b6000813590506100a781610081565b92915050565b600080604083850312156100b4576100b3610079565b5b60006100c285828601610098565b92505060206100d385828601610098565b9150509250929050565b6100e38161007d565b82525050565b60006020820190506100fe60008301846100dc565b92915050565b7f4e487b710000000000000000000000000000000000000000000000000000000060e052604160045260246000fd5b600061013f8261007d565b915061014a8361007d565b9250827fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff0382111561017f5761017e610105565b5b82820190509291505056fea264697066735822122024d33be7c73c099cedba7e11787e893151b39c977d9712cce3a0db7f94ba066764736f6c634300080d0033";

/// Output of a (mock) compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledArtifact {
    pub abi: Vec<Value>,
    pub bytecode: String,
}

/// Compilation backend. The mock is the only implementation today; a real
/// solc bridge would slot in behind the same trait.
pub trait Compile {
    fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError>;
}

/// Regex-based pseudo-compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCompiler;

impl MockCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl Compile for MockCompiler {
    fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError> {
        if source.trim().is_empty() {
            return Err(CompileError::EmptySource);
        }
        if !CONTRACT_RE.is_match(source) {
            return Err(CompileError::NoContractDefinition);
        }

        let mut abi = vec![json!({
            "inputs": [],
            "stateMutability": "nonpayable",
            "type": "constructor"
        })];

        // First declared event, or a canned one when the source has none.
        let event_name = EVENT_RE
            .captures(source)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| "DataUpdated".to_string());
        abi.push(json!({
            "anonymous": false,
            "inputs": [
                { "indexed": true, "internalType": "address", "name": "user", "type": "address" },
                { "indexed": false, "internalType": "uint256", "name": "count", "type": "uint256" },
                { "indexed": false, "internalType": "string", "name": "text", "type": "string" }
            ],
            "name": event_name,
            "type": "event"
        }));
        abi.push(json!({
            "anonymous": false,
            "inputs": [
                { "indexed": true, "internalType": "address", "name": "previousOwner", "type": "address" },
                { "indexed": true, "internalType": "address", "name": "newOwner", "type": "address" }
            ],
            "name": "OwnershipTransferred",
            "type": "event"
        }));

        for caps in FUNCTION_RE.captures_iter(source) {
            let name = &caps[1];
            let inputs = split_params(caps.get(2).map_or("", |m| m.as_str()), true);
            let mutability = caps
                .get(4)
                .map_or("nonpayable", |m| m.as_str());
            let outputs = caps
                .get(5)
                .map_or_else(Vec::new, |m| split_params(m.as_str(), false));

            abi.push(json!({
                "inputs": inputs,
                "name": name,
                "outputs": outputs,
                "stateMutability": mutability,
                "type": "function"
            }));
        }

        Ok(CompiledArtifact {
            abi,
            bytecode: BYTECODE_SAMPLE.to_string(),
        })
    }
}

/// Splits `uint256 amount, address to` into ABI parameter objects. Unnamed
/// parameters get positional placeholder names when `named` is set.
fn split_params(raw: &str, named: bool) -> Vec<Value> {
    raw.split(',')
        .filter(|p| !p.trim().is_empty())
        .enumerate()
        .map(|(i, param)| {
            let mut parts = param.trim().split_whitespace();
            let ty = parts.next().unwrap_or("uint256");
            // Skip data-location keywords between type and name.
            let name = parts
                .find(|p| !matches!(*p, "memory" | "calldata" | "storage"))
                .map(str::to_string)
                .unwrap_or_else(|| {
                    if named {
                        format!("param{i}")
                    } else {
                        String::new()
                    }
                });
            json!({ "internalType": ty, "name": name, "type": ty })
        })
        .collect()
}
