//! Template assembler
//!
//! One assembler per archetype, all driven by the same classifier output.
//! Assemblers are pure string builders: given the same inputs they produce
//! the same source, and the `seed`/`timestamp` values only appear inside the
//! NatSpec header comment. No compilation, parsing, or validation happens
//! here; feature combinations the templates never guarded against (e.g.
//! `capped` + `permit` on ERC-20) still assemble without complaint.

mod custom;
mod erc1155;
mod erc20;
mod erc4626;
mod erc721;
mod escrow;
mod governance;
mod multisig;
mod rules;
mod staking;
mod timelock;
mod upgradeable;
mod vesting;

use rand::Rng;

use crate::classifier::{classify_with_context, Classification, ContractParams};
use crate::context::ConversationState;
use crate::types::{ContractType, FeatureSet, GeneratedContract};

/// Everything an assembler needs to render one contract.
#[derive(Debug, Clone, Copy)]
pub struct TemplateInput<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub features: &'a FeatureSet,
    pub params: &'a ContractParams,
    pub prompt: &'a str,
    pub seed: u32,
    pub timestamp: &'a str,
}

/// Classifies a prompt and assembles the matching contract, recording the
/// turn in the conversation state.
///
/// This is the top-level entry point the chat surface calls once per user
/// message. Total: any prompt yields a contract.
pub fn generate(prompt: &str, state: &mut ConversationState) -> GeneratedContract {
    let classification = classify_with_context(prompt, Some(state));
    let seed = rand::thread_rng().gen_range(0..10_000);
    let timestamp = crate::types::now().to_rfc3339();

    let contract = assemble(&classification, prompt, seed, &timestamp);
    tracing::debug!(
        contract_type = %contract.contract_type,
        name = %contract.name,
        features = classification.features.len(),
        "assembled contract"
    );
    state.record(prompt, contract.clone());
    contract
}

/// Dispatches to the archetype's assembler. Deterministic for fixed inputs.
pub fn assemble(
    classification: &Classification,
    prompt: &str,
    seed: u32,
    timestamp: &str,
) -> GeneratedContract {
    let symbol = classification
        .params
        .symbol
        .clone()
        .unwrap_or_else(|| "TKN".to_string());
    let input = TemplateInput {
        name: &classification.name,
        symbol: &symbol,
        features: &classification.features,
        params: &classification.params,
        prompt,
        seed,
        timestamp,
    };

    let code = match classification.contract_type {
        ContractType::Erc20 => erc20::assemble(&input),
        ContractType::Erc20Upgradeable => erc20::assemble_upgradeable(&input),
        ContractType::Erc721 => erc721::assemble(&input),
        ContractType::Erc1155 => erc1155::assemble(&input),
        ContractType::Erc4626 => erc4626::assemble(&input),
        ContractType::Staking => staking::assemble(&input),
        ContractType::Governance => governance::assemble(&input),
        ContractType::Timelock => timelock::assemble(&input),
        ContractType::Vesting => vesting::assemble(&input),
        ContractType::Multisig => multisig::assemble(&input),
        ContractType::Escrow => escrow::assemble(&input),
        ContractType::Upgradeable => upgradeable::assemble(&input),
        ContractType::Custom => custom::assemble(&input),
    };

    GeneratedContract {
        code,
        name: classification.name.clone(),
        contract_type: classification.contract_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;

    fn assemble_prompt(prompt: &str) -> GeneratedContract {
        assemble(&classify(prompt), prompt, 42, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_every_archetype_assembles_without_features() {
        let prompts: &[(&str, ContractType)] = &[
            ("erc20", ContractType::Erc20),
            ("erc20 proxy", ContractType::Erc20Upgradeable),
            ("nft", ContractType::Erc721),
            ("erc1155", ContractType::Erc1155),
            ("erc4626", ContractType::Erc4626),
            ("staking", ContractType::Staking),
            ("dao", ContractType::Governance),
            ("timelock", ContractType::Timelock),
            ("vesting", ContractType::Vesting),
            ("multisig", ContractType::Multisig),
            ("escrow", ContractType::Escrow),
            ("upgradeable", ContractType::Upgradeable),
            ("", ContractType::Custom),
        ];

        for (prompt, expected) in prompts {
            let contract = assemble_prompt(prompt);
            assert_eq!(contract.contract_type, *expected, "prompt: {prompt:?}");
            assert!(
                contract.code.contains("pragma solidity"),
                "missing pragma for {prompt:?}"
            );
            assert!(
                contract.code.contains(&format!("contract {}", contract.name)),
                "missing contract declaration for {prompt:?}"
            );
        }
    }

    #[test]
    fn test_idempotent_modulo_seed_and_timestamp() {
        let strip = |code: &str| {
            code.lines()
                .filter(|l| {
                    !l.contains("@custom:generated-at") && !l.contains("@custom:seed")
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        // Every archetype, including the custom fallback.
        let prompts = [
            "pausable mintable erc20 called Stable",
            "enumerable nft with royalties",
            "a staking pool",
            "dao with a timelock",
            "3 of 5 multisig",
            "a registry for widgets",
        ];
        for prompt in prompts {
            let classification = classify(prompt);
            let a = assemble(&classification, prompt, 1, "2024-01-01T00:00:00Z");
            let b = assemble(&classification, prompt, 2, "2025-06-30T12:00:00Z");
            assert_eq!(strip(&a.code), strip(&b.code), "prompt: {prompt:?}");
            assert_ne!(a.code, b.code, "prompt: {prompt:?}");
        }
    }

    #[test]
    fn test_generate_records_turn() {
        let mut state = ConversationState::new();
        let contract = generate("an erc20 token called Looped", &mut state);
        assert_eq!(contract.name, "Looped");
        assert_eq!(state.current_contract().unwrap().name, "Looped");
        assert_eq!(state.prompts().len(), 1);
    }
}
