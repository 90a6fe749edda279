//! Error types for Ricknad Core
//!
//! This module defines all error types used throughout the Ricknad core engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.
//!
//! The generator itself (classifier + assemblers) is total and never returns an
//! error; everything here belongs to the store, the configuration loader, and
//! the mock compiler.

use thiserror::Error;

/// Result type alias for Ricknad operations
pub type Result<T> = std::result::Result<T, RicknadError>;

/// Main error type for Ricknad operations
#[derive(Error, Debug)]
pub enum RicknadError {
    /// Contract store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Mock compilation errors
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<RicknadError>,
    },
}

/// Errors related to the deployed-contract store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot create data directory '{path}': {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot read store file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot write store file '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Store file '{path}' is not valid JSON: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("Imported document is not an array of deployed contracts")]
    InvalidImport,

    #[error("No contract recorded at address {0}")]
    UnknownAddress(String),
}

/// Errors produced by the mock compiler.
///
/// The mock never parses Solidity for real; these cover only the inputs it
/// refuses to scan at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Source is empty")]
    EmptySource,

    #[error("Source contains no contract definition")]
    NoContractDefinition,
}

/// Errors related to configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Config file '{path}' is not valid TOML: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl RicknadError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = RicknadError::from(CompileError::EmptySource);
        let err = err.context("Failed to compile chat contract");

        assert!(err.to_string().contains("Failed to compile chat contract"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(StoreError::InvalidImport.into());
        let result = result.context("Import failed");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Import failed"));
    }
}
