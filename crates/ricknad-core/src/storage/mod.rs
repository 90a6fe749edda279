//! Persistence for deployed-contract records.

mod contract_store;

pub use contract_store::{ContractStore, DEPLOYED_CONTRACTS_FILE, VERIFIED_CONTRACTS_FILE};
