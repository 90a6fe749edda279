//! Fallback assembler for prompts no keyword group matched.
//!
//! Mines candidate words from the prompt and turns them into state variables
//! with getters and setters, so even an unrecognized prompt gets a contract
//! that visibly reflects it. Like every assembler, the seed and timestamp
//! appear only in the NatSpec header; the initializer value is fixed.

use super::rules::{file_prologue, natspec};
use super::TemplateInput;
use crate::types::Feature;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "make", "create", "build", "contract",
    "smart", "please", "want", "need", "some", "from", "into", "have",
];

/// Up to three prompt words usable as Solidity identifiers.
fn variable_names(prompt: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for word in prompt.split(|c: char| !c.is_ascii_alphabetic()) {
        let lower = word.to_lowercase();
        if lower.len() < 4 || STOPWORDS.contains(&lower.as_str()) || names.contains(&lower) {
            continue;
        }
        names.push(lower);
        if names.len() == 3 {
            break;
        }
    }
    if names.is_empty() {
        names.push("value".to_string());
    }
    names
}

const INITIAL_VALUE: u32 = 42;

pub(super) fn assemble(input: &TemplateInput<'_>) -> String {
    let name = input.name;
    let ownable = input.features.contains(Feature::Ownable);
    let names = variable_names(input.prompt);

    let mut imports = Vec::new();
    let inherits = if ownable {
        imports.push("import \"@openzeppelin/contracts/access/Ownable.sol\";".to_string());
        "is Ownable "
    } else {
        ""
    };
    let guard = if ownable { " onlyOwner" } else { "" };

    let variables = names
        .iter()
        .map(|n| format!("    uint256 public {n};"))
        .collect::<Vec<_>>()
        .join("\n");
    let ctor_stmts = names
        .iter()
        .map(|n| format!("        {n} = {INITIAL_VALUE};"))
        .collect::<Vec<_>>()
        .join("\n");
    let setters = names
        .iter()
        .map(|n| {
            let setter = format!("set{}{}", n[..1].to_uppercase(), &n[1..]);
            format!(
                "    function {setter}(uint256 newValue) public{guard} {{\n        {n} = newValue;\n    }}"
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{prologue}\n{doc}\ncontract {name} {inherits}{{\n{variables}\n\n    constructor() {{\n{ctor_stmts}\n    }}\n\n{setters}\n}}\n",
        prologue = file_prologue(&imports),
        doc = natspec("Custom Contract", name, input.prompt, input.seed, input.timestamp),
    )
}
