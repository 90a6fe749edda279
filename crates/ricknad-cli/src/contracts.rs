use anyhow::Context;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use ricknad_core::ContractStore;

#[derive(Subcommand)]
pub enum ContractsCommand {
    /// List deployed contracts, most recent first
    List {
        /// Print the raw JSON records
        #[arg(long)]
        json: bool,
    },

    /// Remove a contract from the store
    Remove {
        /// Address of the contract to remove
        address: String,
    },

    /// Merge an exported JSON document into the store
    Import {
        /// Path to an exported contracts file
        file: PathBuf,
    },

    /// Export the store as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Search contracts by name or address
    Search {
        /// Case-insensitive substring
        query: String,
    },
}

pub fn run(command: ContractsCommand, data_dir: &Path) -> anyhow::Result<()> {
    let store = ContractStore::new(data_dir).context("opening contract store")?;

    match command {
        ContractsCommand::List { json } => {
            let contracts = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&contracts)?);
            } else if contracts.is_empty() {
                println!("No contracts deployed yet.");
            } else {
                for contract in contracts {
                    let verified = store.verification_status(&contract.address)?;
                    println!(
                        "{}  {}  ({})  verification: {}",
                        contract.address, contract.name, contract.contract_type, verified
                    );
                }
            }
        }
        ContractsCommand::Remove { address } => {
            let removed = store
                .remove(&address)
                .with_context(|| format!("removing {address}"))?;
            println!("Removed {} ({})", removed.name, removed.address);
        }
        ContractsCommand::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {file:?}"))?;
            let added = store.import_json(&json).context("importing contracts")?;
            println!("Imported {added} contract(s)");
        }
        ContractsCommand::Export { output } => {
            let json = store.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {path:?}"))?;
                    println!("Exported to {path:?}");
                }
                None => println!("{json}"),
            }
        }
        ContractsCommand::Search { query } => {
            for contract in store.search(&query)? {
                println!(
                    "{}  {}  ({})",
                    contract.address, contract.name, contract.contract_type
                );
            }
        }
    }

    Ok(())
}
