//! Simulated Sourcify verification.
//!
//! Builds the metadata document Sourcify expects, then short-circuits the
//! network call: verification always succeeds and the resulting status is
//! persisted through the contract store. The metadata builder is real and
//! would feed an actual Sourcify submission unchanged.

use serde_json::{json, Value};

use crate::config::NetworkConfig;
use crate::error::StoreError;
use crate::storage::ContractStore;
use crate::types::VerificationStatus;

/// Compiler version stamped into metadata when the caller has no better idea.
pub const DEFAULT_COMPILER_VERSION: &str = "0.8.17";

/// Result of a verification attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    pub message: String,
    pub url: Option<String>,
}

/// Sourcify-format metadata for one single-source contract.
pub fn sourcify_metadata(
    contract_name: &str,
    source_code: &str,
    abi: &[Value],
    compiler_version: &str,
) -> Value {
    json!({
        "compiler": { "version": compiler_version },
        "language": "Solidity",
        "output": { "abi": abi },
        "sources": {
            (format!("{contract_name}.sol")): { "content": source_code }
        },
        "settings": {
            "optimizer": { "enabled": true, "runs": 200 }
        }
    })
}

/// Verifies a stored contract and persists the outcome.
///
/// Looks the contract up by address, builds its metadata, and records a
/// `success` status. Unknown addresses fail before any status is written.
pub fn verify_contract(
    store: &ContractStore,
    network: &NetworkConfig,
    address: &str,
) -> Result<VerificationOutcome, StoreError> {
    let contract = store
        .find(address)?
        .ok_or_else(|| StoreError::UnknownAddress(address.to_string()))?;

    store.set_verification_status(address, VerificationStatus::Pending)?;

    let source = contract.source_code.as_deref().unwrap_or("");
    let metadata = sourcify_metadata(
        &contract.name,
        source,
        &contract.abi,
        DEFAULT_COMPILER_VERSION,
    );
    tracing::debug!(
        address = %contract.address,
        sources = metadata["sources"].as_object().map_or(0, |s| s.len()),
        "submitting verification metadata"
    );

    // Simulated submission: the hosted verifier is not contacted.
    store.set_verification_status(address, VerificationStatus::Success)?;

    Ok(VerificationOutcome {
        status: VerificationStatus::Success,
        message: "Contract verified successfully on Sourcify!".to_string(),
        url: Some(network.explorer_address_url(&contract.address)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContractType, DeployedContract, DeploymentStatus};

    fn deployed(address: &str) -> DeployedContract {
        DeployedContract {
            name: "MonadCoin".to_string(),
            address: address.to_string(),
            abi: vec![json!({"type": "constructor", "inputs": []})],
            bytecode: "6080".to_string(),
            deployment_tx: None,
            timestamp: 1_700_000_000_000,
            status: DeploymentStatus::Success,
            contract_type: ContractType::Erc20,
            source_code: Some("contract MonadCoin {}".to_string()),
            verification_status: None,
        }
    }

    #[test]
    fn test_metadata_shape() {
        let metadata = sourcify_metadata("MonadCoin", "contract MonadCoin {}", &[], "0.8.17");
        assert_eq!(metadata["compiler"]["version"], "0.8.17");
        assert_eq!(metadata["language"], "Solidity");
        assert_eq!(
            metadata["sources"]["MonadCoin.sol"]["content"],
            "contract MonadCoin {}"
        );
        assert_eq!(metadata["settings"]["optimizer"]["runs"], 200);
    }

    #[test]
    fn test_verify_persists_success_and_links_explorer() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContractStore::new(dir.path()).unwrap();
        store.record(deployed("0xAbC123")).unwrap();

        let network = NetworkConfig::default();
        let outcome = verify_contract(&store, &network, "0xabc123").unwrap();

        assert_eq!(outcome.status, VerificationStatus::Success);
        assert_eq!(
            outcome.url.as_deref(),
            Some("https://testnet.monadexplorer.com/address/0xAbC123")
        );
        assert_eq!(
            store.verification_status("0xABC123").unwrap(),
            VerificationStatus::Success
        );
    }

    #[test]
    fn test_verify_unknown_address_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContractStore::new(dir.path()).unwrap();
        let network = NetworkConfig::default();

        assert!(matches!(
            verify_contract(&store, &network, "0xdead"),
            Err(StoreError::UnknownAddress(_))
        ));
        assert_eq!(
            store.verification_status("0xdead").unwrap(),
            VerificationStatus::Unverified
        );
    }
}
