use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ricknad_core::{Compile, ContractStore, MockCompiler, NetworkConfig};

mod chat;
mod contracts;
mod generate;

/// Ricknad CLI - Monad testnet contract generator and registry
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the deployed-contract store
    #[arg(long, value_name = "DIR", default_value = ".ricknad", global = true)]
    data_dir: PathBuf,

    /// Network configuration file
    #[arg(long, value_name = "FILE", default_value = "ricknad.toml", global = true)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Solidity contract from a prompt
    Generate {
        /// Free-text description of the contract
        prompt: String,

        /// Print the full artifact as JSON instead of the source
        #[arg(long)]
        json: bool,

        /// Write the Solidity source to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run the mock compiler over a Solidity file
    Compile {
        /// Path to a .sol file
        file: PathBuf,
    },

    /// Start an interactive generation session
    Chat,

    /// Inspect and manage the deployed-contract store
    Contracts {
        #[command(subcommand)]
        command: contracts::ContractsCommand,
    },

    /// Verify a deployed contract (simulated Sourcify submission)
    Verify {
        /// Contract address to verify
        address: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let network = NetworkConfig::load(&cli.config)
        .with_context(|| format!("loading config from {:?}", cli.config))?;

    match cli.command {
        Commands::Generate {
            prompt,
            json,
            output,
        } => generate::run(&prompt, json, output.as_deref()),
        Commands::Compile { file } => {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {:?}", file))?;
            let artifact = MockCompiler::new()
                .compile(&source)
                .context("mock compilation failed")?;
            println!("{}", serde_json::to_string_pretty(&artifact.abi)?);
            eprintln!("bytecode: {} bytes (hex)", artifact.bytecode.len() / 2);
            Ok(())
        }
        Commands::Chat => chat::run(&cli.data_dir, &network),
        Commands::Contracts { command } => contracts::run(command, &cli.data_dir),
        Commands::Verify { address } => {
            let store = ContractStore::new(&cli.data_dir)?;
            let outcome = ricknad_core::verify_contract(&store, &network, &address)
                .with_context(|| format!("verifying {address}"))?;
            println!("{}", outcome.message);
            if let Some(url) = outcome.url {
                println!("Explorer: {url}");
            }
            Ok(())
        }
    }
}
