//! Declarative feature rules and the generic reducer applying them.
//!
//! Each archetype owns an ordered rule table. A rule says what a feature
//! contributes to the assembled contract: imports, inheritance entries
//! (including entries it *replaces*, e.g. `capped` swaps `ERC20` for
//! `ERC20Capped`, `roles` swaps `Ownable` for `AccessControl`), state
//! variables, constructor statements, and function bodies. The reducer walks
//! the table in archetype priority order, not feature-set order.
//!
//! Fragments whose text depends on other features (the ERC-20 mint body
//! changes under `roles`) stay in the assembler functions.

use crate::types::{Feature, FeatureSet};

/// One feature's contribution to an archetype's template.
#[derive(Debug, Clone, Copy)]
pub(super) struct FeatureRule {
    pub feature: Feature,
    pub add_imports: &'static [&'static str],
    /// Inheritance entries this feature replaces (removed before adding).
    pub remove_inheritance: &'static [&'static str],
    pub add_inheritance: &'static [&'static str],
    /// Insert added inheritance at the front (base-contract substitutions).
    pub prepend_inheritance: bool,
    pub variables: &'static [&'static str],
    pub constructor_stmts: &'static [&'static str],
    pub functions: &'static [&'static str],
}

impl FeatureRule {
    /// Rule with no contributions; combine with struct update syntax.
    pub(super) const fn empty(feature: Feature) -> Self {
        Self {
            feature,
            add_imports: &[],
            remove_inheritance: &[],
            add_inheritance: &[],
            prepend_inheritance: false,
            variables: &[],
            constructor_stmts: &[],
            functions: &[],
        }
    }
}

/// Accumulated string fragments for one contract under assembly.
#[derive(Debug, Clone, Default)]
pub(super) struct ContractParts {
    pub imports: Vec<String>,
    pub inheritance: Vec<String>,
    pub variables: Vec<String>,
    pub constructor_stmts: Vec<String>,
    pub functions: Vec<String>,
}

impl ContractParts {
    pub(super) fn new(base_imports: &[&str], base_inheritance: &[&str]) -> Self {
        Self {
            imports: base_imports.iter().map(|s| s.to_string()).collect(),
            inheritance: base_inheritance.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Applies every rule whose feature is present, in table order.
    pub(super) fn apply(&mut self, features: &FeatureSet, rules: &[FeatureRule]) {
        for rule in rules {
            if !features.contains(rule.feature) {
                continue;
            }
            self.imports
                .extend(rule.add_imports.iter().map(|s| s.to_string()));
            self.inheritance
                .retain(|entry| !rule.remove_inheritance.contains(&entry.as_str()));
            if rule.prepend_inheritance {
                for (i, entry) in rule.add_inheritance.iter().enumerate() {
                    self.inheritance.insert(i, entry.to_string());
                }
            } else {
                self.inheritance
                    .extend(rule.add_inheritance.iter().map(|s| s.to_string()));
            }
            self.variables
                .extend(rule.variables.iter().map(|s| s.to_string()));
            self.constructor_stmts
                .extend(rule.constructor_stmts.iter().map(|s| s.to_string()));
            self.functions
                .extend(rule.functions.iter().map(|s| s.to_string()));
        }
    }

    /// `is A, B, C` clause, or empty when nothing is inherited.
    pub(super) fn inherits_clause(&self) -> String {
        if self.inheritance.is_empty() {
            String::new()
        } else {
            format!("is {} ", self.inheritance.join(", "))
        }
    }

    pub(super) fn has_inheritance(&self, entry: &str) -> bool {
        self.inheritance.iter().any(|e| e == entry)
    }
}

pub(super) const SPDX: &str = "// SPDX-License-Identifier: MIT";
pub(super) const PRAGMA: &str = "pragma solidity ^0.8.20;";

/// SPDX line, pragma, and import block.
pub(super) fn file_prologue(imports: &[String]) -> String {
    if imports.is_empty() {
        format!("{SPDX}\n{PRAGMA}\n")
    } else {
        format!("{SPDX}\n{PRAGMA}\n\n{}\n", imports.join("\n"))
    }
}

/// NatSpec block carrying the prompt, generation time, and seed.
///
/// Documentation only: the embedded values have no functional effect, so
/// regenerating with a different seed/timestamp changes nothing else.
pub(super) fn natspec(kind: &str, name: &str, prompt: &str, seed: u32, timestamp: &str) -> String {
    format!(
        "/**\n * @title {name}\n * @dev {kind} auto-generated from: \"{prompt}\"\n * @custom:generated-at {timestamp}\n * @custom:seed {seed}\n */"
    )
}
