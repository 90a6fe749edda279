use anyhow::Context;
use rand::Rng;
use std::path::Path;

use ricknad_core::{classify, generator};

/// One-shot generation: classify once, assemble, print (or write) the source.
pub fn run(prompt: &str, json: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let classification = classify(prompt);
    let seed = rand::thread_rng().gen_range(0..10_000);
    let timestamp = chrono::Utc::now().to_rfc3339();
    let contract = generator::assemble(&classification, prompt, seed, &timestamp);

    if let Some(path) = output {
        std::fs::write(path, &contract.code)
            .with_context(|| format!("writing {path:?}"))?;
        eprintln!("Wrote {} to {path:?}", contract.name);
    }

    if json {
        let artifact = serde_json::json!({
            "name": contract.name,
            "type": contract.contract_type,
            "features": classification.features,
            "params": classification.params,
            "code": contract.code,
        });
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else if output.is_none() {
        println!("{}", contract.code);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_gets_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.sol");
        run("an erc20 token called Filed", false, Some(&path)).unwrap();

        let source = std::fs::read_to_string(&path).unwrap();
        assert!(source.contains("contract Filed is ERC20"));
        assert!(source.contains("pragma solidity"));
    }
}
