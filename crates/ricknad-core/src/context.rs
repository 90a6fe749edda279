//! Conversation state
//!
//! Explicit per-session memory threaded through generation calls. The web
//! dashboard kept this as a module-level singleton; here it is a plain
//! value the caller owns, which keeps the generator pure and testable.
//!
//! History is capped: at most 5 prior contracts and 10 prior prompts are
//! retained, oldest dropped first.

use serde::{Deserialize, Serialize};

use crate::types::{ContractType, GeneratedContract};

const MAX_CONTRACTS: usize = 5;
const MAX_PROMPTS: usize = 10;

/// Session memory for the generator: previous contracts and user intents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    previous_contracts: Vec<GeneratedContract>,
    current_contract: Option<GeneratedContract>,
    prompts: Vec<String>,
}

impl ConversationState {
    /// Fresh session with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed generation turn.
    ///
    /// The previous current contract (if any) moves into history; both
    /// history lists are trimmed to their caps.
    pub fn record(&mut self, prompt: impl Into<String>, contract: GeneratedContract) {
        self.prompts.push(prompt.into());
        if self.prompts.len() > MAX_PROMPTS {
            self.prompts.remove(0);
        }

        if let Some(previous) = self.current_contract.take() {
            self.previous_contracts.push(previous);
            if self.previous_contracts.len() > MAX_CONTRACTS {
                self.previous_contracts.remove(0);
            }
        }
        self.current_contract = Some(contract);
    }

    /// The contract produced by the most recent turn.
    pub fn current_contract(&self) -> Option<&GeneratedContract> {
        self.current_contract.as_ref()
    }

    /// Archetype of the most recent contract, used as the classifier
    /// fallback when a follow-up prompt names no archetype.
    pub fn last_type(&self) -> Option<ContractType> {
        self.current_contract.as_ref().map(|c| c.contract_type)
    }

    /// Prompts recorded this session, oldest first.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Contracts displaced from the current slot, oldest first.
    pub fn previous_contracts(&self) -> &[GeneratedContract] {
        &self.previous_contracts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(name: &str) -> GeneratedContract {
        GeneratedContract {
            code: format!("contract {name} {{}}"),
            name: name.to_string(),
            contract_type: ContractType::Erc20,
        }
    }

    #[test]
    fn test_record_moves_current_to_history() {
        let mut state = ConversationState::new();
        state.record("first", contract("A"));
        state.record("second", contract("B"));

        assert_eq!(state.current_contract().unwrap().name, "B");
        assert_eq!(state.previous_contracts().len(), 1);
        assert_eq!(state.previous_contracts()[0].name, "A");
        assert_eq!(state.prompts(), &["first", "second"]);
    }

    #[test]
    fn test_history_caps() {
        let mut state = ConversationState::new();
        for i in 0..20 {
            state.record(format!("prompt {i}"), contract(&format!("C{i}")));
        }

        assert_eq!(state.prompts().len(), 10);
        assert_eq!(state.previous_contracts().len(), 5);
        // Oldest dropped first
        assert_eq!(state.prompts()[0], "prompt 10");
        assert_eq!(state.previous_contracts()[0].name, "C14");
        assert_eq!(state.current_contract().unwrap().name, "C19");
    }

    #[test]
    fn test_last_type_empty_session() {
        assert!(ConversationState::new().last_type().is_none());
    }
}
