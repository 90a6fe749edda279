use anyhow::Context;
use rand::RngCore;
use std::io::{self, BufRead, Write};
use std::path::Path;
use uuid::Uuid;

use ricknad_core::{
    generator, verify_contract, Compile, CompiledArtifact, ContractStore, ConversationState,
    DeployedContract, DeploymentStatus, GeneratedContract, MockCompiler, NetworkConfig,
};

struct Turn {
    id: Uuid,
    role: &'static str,
    content: String,
}

/// Interactive loop threading one `ConversationState` across turns.
///
/// Plain input is a generation prompt; slash commands drive the mock
/// compile / deploy / verify pipeline on the latest contract.
pub fn run(data_dir: &Path, network: &NetworkConfig) -> anyhow::Result<()> {
    let store = ContractStore::new(data_dir).context("opening contract store")?;
    let mut state = ConversationState::new();
    let mut transcript: Vec<Turn> = Vec::new();
    let mut artifact: Option<CompiledArtifact> = None;
    let mut last_address: Option<String> = None;

    println!("Ricknad chat on {} (chain {})", network.name, network.chain_id);
    println!("Describe a contract, or use /compile /deploy /verify /contracts /history /quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let reply = match input {
            "/quit" | "/exit" => break,
            "/history" => {
                for turn in &transcript {
                    println!("[{}] {}: {}", turn.id, turn.role, turn.content);
                }
                continue;
            }
            "/contracts" => {
                for contract in store.list()? {
                    println!(
                        "{}  {}  ({})",
                        contract.address, contract.name, contract.contract_type
                    );
                }
                continue;
            }
            "/compile" => match state.current_contract() {
                None => "Nothing to compile yet. Describe a contract first.".to_string(),
                Some(contract) => match MockCompiler::new().compile(&contract.code) {
                    Ok(compiled) => {
                        let entries = compiled.abi.len();
                        artifact = Some(compiled);
                        format!(
                            "Contract compiled successfully ({entries} ABI entries). You can now /deploy it to the {}.",
                            network.name
                        )
                    }
                    Err(err) => format!("Failed to compile contract: {err}"),
                },
            },
            "/deploy" => match (state.current_contract(), artifact.as_ref()) {
                (Some(contract), Some(compiled)) => {
                    let address = random_hex(20);
                    tracing::info!(
                        address = %address,
                        contract = %contract.name,
                        "simulated deployment"
                    );
                    let record =
                        deployment_record(contract, compiled, &address, random_hex(32));
                    store.record(record)?;
                    last_address = Some(address.clone());
                    format!(
                        "Contract deployed at {address}\nExplorer: {}",
                        network.explorer_address_url(&address)
                    )
                }
                _ => "Missing required data for deployment. Run /compile first.".to_string(),
            },
            "/verify" => match last_address.as_deref() {
                None => "No deployed contract in this session.".to_string(),
                Some(address) => {
                    tracing::debug!(address, "verifying contract");
                    match verify_contract(&store, network, address) {
                        Ok(outcome) => outcome.message,
                        Err(err) => format!("Verification failed: {err}"),
                    }
                }
            },
            prompt => {
                transcript.push(Turn {
                    id: Uuid::new_v4(),
                    role: "user",
                    content: prompt.to_string(),
                });
                let contract = generator::generate(prompt, &mut state);
                artifact = None;
                println!("{}", contract.code);
                format!(
                    "Generated {} ({}). /compile when ready.",
                    contract.name, contract.contract_type
                )
            }
        };

        transcript.push(Turn {
            id: Uuid::new_v4(),
            role: "assistant",
            content: reply.clone(),
        });
        println!("{reply}");
    }

    Ok(())
}

fn deployment_record(
    contract: &GeneratedContract,
    compiled: &CompiledArtifact,
    address: &str,
    tx: String,
) -> DeployedContract {
    DeployedContract {
        name: contract.name.clone(),
        address: address.to_string(),
        abi: compiled.abi.clone(),
        bytecode: compiled.bytecode.clone(),
        deployment_tx: Some(tx),
        timestamp: chrono::Utc::now().timestamp_millis(),
        status: DeploymentStatus::Success,
        contract_type: contract.contract_type,
        source_code: Some(contract.code.clone()),
        verification_status: None,
    }
}

/// `0x`-prefixed random hex string of `bytes` bytes.
fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    let mut out = String::with_capacity(2 + bytes * 2);
    out.push_str("0x");
    for b in buf {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hex_shape() {
        let address = random_hex(20);
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        assert!(address[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_deployment_record_carries_source() {
        let contract = GeneratedContract {
            code: "contract X {}".to_string(),
            name: "X".to_string(),
            contract_type: ricknad_core::ContractType::Custom,
        };
        let compiled = CompiledArtifact {
            abi: vec![],
            bytecode: "6080".to_string(),
        };
        let record = deployment_record(&contract, &compiled, "0xabc", "0xtx".to_string());
        assert_eq!(record.source_code.as_deref(), Some("contract X {}"));
        assert_eq!(record.status, DeploymentStatus::Success);
    }
}
