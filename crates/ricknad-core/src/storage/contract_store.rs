//! JSON-file store for deployed contracts and their verification statuses.
//!
//! Two documents under the data directory, named after the browser
//! local-storage keys of the web dashboard so an exported file imports
//! cleanly on either side. Every mutation rewrites the whole document; record
//! counts stay small (the chat caps history well below anything a rewrite
//! would struggle with).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::types::{DeployedContract, VerificationStatus};

/// Deployed-contract list document.
pub const DEPLOYED_CONTRACTS_FILE: &str = "ricknad_deployed_contracts.json";
/// Address -> verification record document.
pub const VERIFIED_CONTRACTS_FILE: &str = "ricknad_verified_contracts.json";

/// One entry of the verified-contracts document: the status plus when it
/// was written, matching the web dashboard's `{status, timestamp}` records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct VerificationRecord {
    status: VerificationStatus,
    /// Unix epoch milliseconds.
    timestamp: i64,
}

/// Handle on one data directory. Cheap to clone; all state lives on disk.
#[derive(Debug, Clone)]
pub struct ContractStore {
    data_dir: PathBuf,
}

impl ContractStore {
    /// Opens (and creates if needed) the data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::CreateDir {
            path: data_dir.display().to_string(),
            source,
        })?;
        Ok(Self { data_dir })
    }

    /// All recorded contracts, most recent first. A missing document is an
    /// empty store, not an error.
    pub fn list(&self) -> Result<Vec<DeployedContract>, StoreError> {
        read_json_or_default(&self.deployed_path())
    }

    /// Prepends a contract to the list and rewrites the document.
    pub fn record(&self, contract: DeployedContract) -> Result<(), StoreError> {
        let mut contracts = self.list()?;
        tracing::debug!(address = %contract.address, name = %contract.name, "recording contract");
        contracts.insert(0, contract);
        self.write_deployed(&contracts)
    }

    /// Looks a contract up by address, case-insensitively.
    pub fn find(&self, address: &str) -> Result<Option<DeployedContract>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.address.eq_ignore_ascii_case(address)))
    }

    /// Removes the contract at `address` and returns it.
    pub fn remove(&self, address: &str) -> Result<DeployedContract, StoreError> {
        let mut contracts = self.list()?;
        let index = contracts
            .iter()
            .position(|c| c.address.eq_ignore_ascii_case(address))
            .ok_or_else(|| StoreError::UnknownAddress(address.to_string()))?;
        let removed = contracts.remove(index);
        self.write_deployed(&contracts)?;
        tracing::debug!(address = %removed.address, "removed contract");
        Ok(removed)
    }

    /// Contracts whose name or address contains `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Result<Vec<DeployedContract>, StoreError> {
        let needle = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.address.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Serializes the full list for transfer to another store (or the
    /// web dashboard's local storage).
    pub fn export_json(&self) -> Result<String, StoreError> {
        let contracts = self.list()?;
        serde_json::to_string_pretty(&contracts).map_err(|source| StoreError::Corrupt {
            path: self.deployed_path().display().to_string(),
            source,
        })
    }

    /// Merges an exported document into this store. Records whose address is
    /// already present are skipped; returns how many were added.
    pub fn import_json(&self, json: &str) -> Result<usize, StoreError> {
        let imported: Vec<DeployedContract> =
            serde_json::from_str(json).map_err(|_| StoreError::InvalidImport)?;

        let mut contracts = self.list()?;
        let mut added = 0;
        for contract in imported {
            let exists = contracts
                .iter()
                .any(|c| c.address.eq_ignore_ascii_case(&contract.address));
            if !exists {
                contracts.insert(added, contract);
                added += 1;
            }
        }
        if added > 0 {
            self.write_deployed(&contracts)?;
        }
        tracing::debug!(added, "imported contracts");
        Ok(added)
    }

    /// Verification status for `address`; unknown addresses are unverified.
    pub fn verification_status(&self, address: &str) -> Result<VerificationStatus, StoreError> {
        let records = self.read_verified()?;
        Ok(records
            .get(&address.to_lowercase())
            .map(|record| record.status)
            .unwrap_or_default())
    }

    /// Persists a verification status, keyed by lowercased address and
    /// stamped with the write time.
    pub fn set_verification_status(
        &self,
        address: &str,
        status: VerificationStatus,
    ) -> Result<(), StoreError> {
        let mut records = self.read_verified()?;
        records.insert(
            address.to_lowercase(),
            VerificationRecord {
                status,
                timestamp: crate::types::now().timestamp_millis(),
            },
        );
        write_json(&self.verified_path(), &records)
    }

    fn deployed_path(&self) -> PathBuf {
        self.data_dir.join(DEPLOYED_CONTRACTS_FILE)
    }

    fn verified_path(&self) -> PathBuf {
        self.data_dir.join(VERIFIED_CONTRACTS_FILE)
    }

    fn write_deployed(&self, contracts: &[DeployedContract]) -> Result<(), StoreError> {
        write_json(&self.deployed_path(), &contracts)
    }

    fn read_verified(&self) -> Result<BTreeMap<String, VerificationRecord>, StoreError> {
        read_json_or_default(&self.verified_path())
    }
}

fn read_json_or_default<T>(path: &Path) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContractType, DeploymentStatus};

    fn contract(name: &str, address: &str) -> DeployedContract {
        DeployedContract {
            name: name.to_string(),
            address: address.to_string(),
            abi: vec![],
            bytecode: "6080".to_string(),
            deployment_tx: None,
            timestamp: 1_700_000_000_000,
            status: DeploymentStatus::Success,
            contract_type: ContractType::Erc20,
            source_code: None,
            verification_status: None,
        }
    }

    fn store() -> (tempfile::TempDir, ContractStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ContractStore::new(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_record_prepends() {
        let (_dir, store) = store();
        store.record(contract("First", "0xaaa")).unwrap();
        store.record(contract("Second", "0xbbb")).unwrap();

        let contracts = store.list().unwrap();
        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].name, "Second");
        assert_eq!(contracts[1].name, "First");
    }

    #[test]
    fn test_remove_is_case_insensitive() {
        let (_dir, store) = store();
        store.record(contract("Token", "0xAbCd")).unwrap();

        let removed = store.remove("0xABCD").unwrap();
        assert_eq!(removed.name, "Token");
        assert!(store.list().unwrap().is_empty());

        assert!(matches!(
            store.remove("0xABCD"),
            Err(StoreError::UnknownAddress(_))
        ));
    }

    #[test]
    fn test_search_matches_name_and_address() {
        let (_dir, store) = store();
        store.record(contract("MonadCoin", "0x1111")).unwrap();
        store.record(contract("Vault", "0x2222")).unwrap();

        assert_eq!(store.search("monad").unwrap().len(), 1);
        assert_eq!(store.search("0x2").unwrap().len(), 1);
        assert_eq!(store.search("zzz").unwrap().len(), 0);
    }

    #[test]
    fn test_export_import_round_trip_skips_duplicates() {
        let (_dir, source) = store();
        source.record(contract("A", "0xaaa")).unwrap();
        source.record(contract("B", "0xbbb")).unwrap();
        let exported = source.export_json().unwrap();

        let (_dir2, target) = store();
        target.record(contract("B", "0xBBB")).unwrap();

        let added = target.import_json(&exported).unwrap();
        assert_eq!(added, 1);
        assert_eq!(target.list().unwrap().len(), 2);
    }

    #[test]
    fn test_import_rejects_non_array() {
        let (_dir, store) = store();
        assert!(matches!(
            store.import_json("{\"not\": \"an array\"}"),
            Err(StoreError::InvalidImport)
        ));
    }

    #[test]
    fn test_verification_status_defaults_and_persists() {
        let (_dir, store) = store();
        assert_eq!(
            store.verification_status("0xabc").unwrap(),
            VerificationStatus::Unverified
        );

        store
            .set_verification_status("0xABC", VerificationStatus::Success)
            .unwrap();
        assert_eq!(
            store.verification_status("0xabc").unwrap(),
            VerificationStatus::Success
        );
    }

    #[test]
    fn test_verified_document_stores_status_and_timestamp() {
        let (dir, store) = store();
        store
            .set_verification_status("0xAbC", VerificationStatus::Success)
            .unwrap();

        let raw = fs::read_to_string(dir.path().join(VERIFIED_CONTRACTS_FILE)).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["0xabc"]["status"], "success");
        assert!(doc["0xabc"]["timestamp"].is_i64());
    }

    #[test]
    fn test_corrupt_document_is_reported() {
        let (dir, store) = store();
        fs::write(dir.path().join(DEPLOYED_CONTRACTS_FILE), "{ nope").unwrap();
        assert!(matches!(store.list(), Err(StoreError::Corrupt { .. })));
    }
}
