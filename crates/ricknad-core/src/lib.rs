//! Ricknad Core - Rule-based Solidity generation for the Monad testnet
//!
//! Ricknad turns free-text prompts into deployable Solidity contract
//! templates and tracks what got deployed. No language model is involved:
//! the "AI" is a keyword classifier in front of a table of archetype
//! assemblers, which is why generation is instant, deterministic, and
//! offline.
//!
//! # Architecture
//!
//! The engine is a pipeline of small, independently testable stages:
//!
//! 1. **Classifier** (`classifier`): prompt -> archetype + features + params
//! 2. **Generator** (`generator`): classification -> Solidity source text
//! 3. **Conversation** (`context`): capped per-session prompt/contract history
//! 4. **Mock compiler** (`abi`): source -> pseudo-ABI + fixed bytecode
//! 5. **Store** (`storage`): JSON persistence of deployed contracts
//! 6. **Verification** (`verification`): simulated Sourcify submission
//!
//! # Quick Start
//!
//! ```
//! use ricknad_core::context::ConversationState;
//! use ricknad_core::generator::generate;
//!
//! let mut state = ConversationState::new();
//! let contract = generate(
//!     "create an ERC20 token called MonadCoin with mint and burn",
//!     &mut state,
//! );
//!
//! assert!(contract.code.contains("contract MonadCoin"));
//! assert!(contract.code.contains("pragma solidity"));
//!
//! // Follow-up prompts inherit the archetype from the conversation.
//! let follow_up = generate("make it pausable too", &mut state);
//! assert_eq!(follow_up.contract_type, contract.contract_type);
//! ```
//!
//! # Design Principles
//!
//! 1. **Totality**: every prompt yields a contract; the classifier never fails
//! 2. **Determinism**: same classification, same source (modulo the NatSpec
//!    seed and timestamp lines)
//! 3. **Faithful mocking**: ABI and verification output keep the shape of the
//!    real artifacts so downstream tooling cannot tell the difference

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod abi;
pub mod classifier;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod storage;
pub mod types;
pub mod verification;

// Re-export commonly used types for convenience
pub use abi::{Compile, CompiledArtifact, MockCompiler};
pub use classifier::{classify, classify_with_context, Classification, ContractParams};
pub use config::NetworkConfig;
pub use context::ConversationState;
pub use error::{Result, ResultExt, RicknadError};
pub use generator::generate;
pub use storage::ContractStore;
pub use types::{
    ContractType, DeployedContract, DeploymentStatus, Feature, FeatureSet, GeneratedContract,
    Timestamp, VerificationStatus,
};
pub use verification::{verify_contract, VerificationOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_prompt_to_verified_contract() {
        let mut state = ConversationState::new();
        let contract = generate("a pausable erc20 token called Pipeline", &mut state);
        assert_eq!(contract.name, "Pipeline");

        let artifact = MockCompiler::new().compile(&contract.code).unwrap();
        assert_eq!(artifact.abi[0]["type"], "constructor");

        let dir = tempfile::tempdir().unwrap();
        let store = ContractStore::new(dir.path()).unwrap();
        store
            .record(DeployedContract {
                name: contract.name.clone(),
                address: "0x1234".to_string(),
                abi: artifact.abi,
                bytecode: artifact.bytecode,
                deployment_tx: None,
                timestamp: 1_700_000_000_000,
                status: DeploymentStatus::Success,
                contract_type: contract.contract_type,
                source_code: Some(contract.code.clone()),
                verification_status: None,
            })
            .unwrap();

        let network = NetworkConfig::default();
        let outcome = verify_contract(&store, &network, "0x1234").unwrap();
        assert_eq!(outcome.status, VerificationStatus::Success);
        assert_eq!(
            store.verification_status("0x1234").unwrap(),
            VerificationStatus::Success
        );
    }
}
