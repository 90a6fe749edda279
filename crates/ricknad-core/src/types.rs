//! Core types for Ricknad
//!
//! The fundamental value types shared across the engine:
//! - Contract archetypes and feature flags
//! - Generated and deployed contract records
//! - Deployment / verification statuses
//! - Timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Contract archetype selected by the classifier.
///
/// Closed enum; exactly one archetype is selected per request by first-match
/// priority over the keyword groups, and archetypes never blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    Erc20,
    Erc20Upgradeable,
    Erc721,
    Erc1155,
    Erc4626,
    Staking,
    Governance,
    Timelock,
    Vesting,
    Multisig,
    Escrow,
    Upgradeable,
    Custom,
}

impl ContractType {
    /// Default contract name used when the prompt carries no explicit name.
    pub fn default_name(self) -> &'static str {
        match self {
            ContractType::Erc20 | ContractType::Erc20Upgradeable => "MonadToken",
            ContractType::Erc721 => "MonadNFT",
            ContractType::Erc1155 => "MonadMultiToken",
            ContractType::Erc4626 => "MonadVault",
            ContractType::Staking => "MonadStaking",
            ContractType::Governance => "MonadDAO",
            ContractType::Timelock => "MonadTimelock",
            ContractType::Vesting => "MonadVesting",
            ContractType::Multisig => "MonadMultiSig",
            ContractType::Escrow => "MonadEscrow",
            ContractType::Upgradeable => "MonadUpgradeable",
            ContractType::Custom => "GeneratedContract",
        }
    }

    /// Human-readable label shown in the chat transcript and contract list.
    pub fn label(self) -> &'static str {
        match self {
            ContractType::Erc20 => "ERC-20 Token",
            ContractType::Erc20Upgradeable => "ERC-20 Token (Upgradeable)",
            ContractType::Erc721 => "ERC-721 NFT",
            ContractType::Erc1155 => "ERC-1155 Multi-Token",
            ContractType::Erc4626 => "ERC-4626 Vault",
            ContractType::Staking => "Staking Contract",
            ContractType::Governance => "Governance",
            ContractType::Timelock => "Timelock",
            ContractType::Vesting => "Token Vesting",
            ContractType::Multisig => "Multi-Signature Wallet",
            ContractType::Escrow => "Escrow",
            ContractType::Upgradeable => "Upgradeable Contract",
            ContractType::Custom => "Custom Contract",
        }
    }

    /// Whether the archetype carries an ERC-20/721 style (name, symbol) pair.
    pub fn has_symbol(self) -> bool {
        matches!(
            self,
            ContractType::Erc20
                | ContractType::Erc20Upgradeable
                | ContractType::Erc721
                | ContractType::Erc1155
                | ContractType::Erc4626
        )
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Optional capability flag that modifies a template's output.
///
/// Features are extracted independently of the archetype; a feature the
/// selected assembler has no rule for is simply ignored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Pausable,
    Ownable,
    Mintable,
    Burnable,
    Capped,
    Roles,
    Timelock,
    Batchable,
    Uups,
    Royalties,
    Permit,
    Metadata,
    Enumerable,
    Soulbound,
    Snapshot,
    Votes,
}

impl Feature {
    /// Lowercase wire name, e.g. for chat output.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Pausable => "pausable",
            Feature::Ownable => "ownable",
            Feature::Mintable => "mintable",
            Feature::Burnable => "burnable",
            Feature::Capped => "capped",
            Feature::Roles => "roles",
            Feature::Timelock => "timelock",
            Feature::Batchable => "batchable",
            Feature::Uups => "uups",
            Feature::Royalties => "royalties",
            Feature::Permit => "permit",
            Feature::Metadata => "metadata",
            Feature::Enumerable => "enumerable",
            Feature::Soulbound => "soulbound",
            Feature::Snapshot => "snapshot",
            Feature::Votes => "votes",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of features extracted from a prompt.
///
/// Membership is monotonic (a matched feature is never removed) and features
/// may co-occur without conflict checks. Backed by a `BTreeSet` so iteration
/// order is deterministic regardless of extraction order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    /// Empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature. Idempotent.
    pub fn insert(&mut self, feature: Feature) {
        self.0.insert(feature);
    }

    /// Whether the feature was extracted.
    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    /// True when no feature matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of extracted features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates features in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A contract produced by the generator. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContract {
    /// Complete Solidity source text.
    pub code: String,
    /// Contract name (extracted from the prompt or the archetype default).
    pub name: String,
    /// Archetype selected by the classifier.
    #[serde(rename = "type")]
    pub contract_type: ContractType,
}

/// Deployment outcome recorded alongside a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Success,
    Pending,
    Failed,
}

/// Verification status per contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Pending,
    Success,
    Failure,
}

impl VerificationStatus {
    /// Whether the verifier reached a terminal outcome.
    pub fn is_terminal(self) -> bool {
        matches!(self, VerificationStatus::Success | VerificationStatus::Failure)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Unverified => "unverified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Success => "success",
            VerificationStatus::Failure => "failure",
        };
        f.write_str(s)
    }
}

/// Persisted record of a deployed contract.
///
/// Serialized field names match the browser local-storage layout of the
/// web dashboard so exported JSON stays interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedContract {
    pub name: String,
    pub address: String,
    pub abi: Vec<serde_json::Value>,
    pub bytecode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_tx: Option<String>,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub status: DeploymentStatus,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<VerificationStatus>,
}

/// Timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Create a timestamp for the current moment
pub fn now() -> Timestamp {
    Utc::now()
}
