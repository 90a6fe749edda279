//! Prompt classifier
//!
//! Maps a free-text prompt to a contract archetype, a feature set, a
//! contract name, and any numeric parameters the prompt carries. Total over
//! all string inputs: never fails, never panics, and unmatched input yields
//! the `custom` archetype with an empty feature set.
//!
//! Archetype selection is first-match priority over an ordered sequence of
//! keyword groups. Feature extraction is an independent scan of the same
//! lowercased prompt, so it is monotonic and word-order independent.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::ConversationState;
use crate::types::{ContractType, Feature, FeatureSet};

lazy_static! {
    /// `named X`, `called X`, `name: X` — bare identifier or quoted string.
    static ref NAME_RE: Regex = Regex::new(
        r#"(?i)\b(?:named|called|name:?)\s+(?:"([^"]+)"|'([^']+)'|([A-Za-z][A-Za-z0-9_]*))"#
    )
    .unwrap();
    static ref SYMBOL_RE: Regex =
        Regex::new(r#"(?i)\bsymbol[:\s]+["']?([A-Za-z0-9]{1,10})"#).unwrap();
    static ref SUPPLY_RE: Regex =
        Regex::new(r#"(?i)\b(?:supply|cap)[:\s]+["']?([0-9][0-9,.]*)"#).unwrap();
    static ref STAKING_PERIOD_RE: Regex =
        Regex::new(r#"(?i)\b(?:period|duration|lock)[:\s]+["']?([0-9]+)\s*(days?|weeks?|months?)"#)
            .unwrap();
    static ref REWARD_RE: Regex =
        Regex::new(r#"(?i)\b(?:reward|apy|apr|interest)[:\s]+["']?([0-9]+(?:\.[0-9]+)?)%?"#)
            .unwrap();
    static ref QUORUM_RE: Regex =
        Regex::new(r#"(?i)\bquorum[:\s]+["']?([0-9]+)%?"#).unwrap();
    static ref VOTING_PERIOD_RE: Regex =
        Regex::new(r#"(?i)\b(?:voting\s?period|vote\s?period)[:\s]+["']?([0-9]+)\s*(days?|weeks?)"#)
            .unwrap();
    /// `3 of 5`, `3/5`, `3 out of 5` — multisig confirmation threshold.
    static ref THRESHOLD_RE: Regex =
        Regex::new(r"\b([0-9]+)\s*(?:of|/|out of)\s*([0-9]+)\b").unwrap();
}

/// Numeric parameters extracted from the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractParams {
    /// Token symbol for ERC-20/721/1155/4626 archetypes.
    pub symbol: Option<String>,
    /// Token supply cap (whole tokens, million/billion suffixes applied).
    pub supply: Option<u128>,
    /// Staking lock period in days.
    pub staking_period_days: Option<u32>,
    /// Staking reward rate in percent.
    pub reward_rate: Option<f64>,
    /// Governance quorum in percent.
    pub quorum: Option<u32>,
    /// Governance voting period in days.
    pub voting_period_days: Option<u32>,
    /// Multisig confirmation threshold as (required, total owners).
    pub threshold: Option<(u32, u32)>,
}

/// Result of classifying a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub contract_type: ContractType,
    pub features: FeatureSet,
    pub name: String,
    pub params: ContractParams,
}

/// Classifies a prompt with no conversation history.
pub fn classify(prompt: &str) -> Classification {
    classify_with_context(prompt, None)
}

/// Classifies a prompt, falling back to the most recent contract type when
/// no keyword group matches and the session has history.
pub fn classify_with_context(
    prompt: &str,
    state: Option<&ConversationState>,
) -> Classification {
    let lc = prompt.to_lowercase();

    let contract_type = select_type(&lc)
        .or_else(|| state.and_then(ConversationState::last_type))
        .unwrap_or(ContractType::Custom);
    let features = extract_features(&lc);
    let mut params = extract_params(prompt, &lc);

    let name = extract_name(prompt)
        .unwrap_or_else(|| contract_type.default_name().to_string());

    if contract_type.has_symbol() && params.symbol.is_none() {
        params.symbol = Some(derive_symbol(contract_type, &name));
    }

    Classification {
        contract_type,
        features,
        name,
        params,
    }
}

/// First-match archetype selection over the ordered keyword groups.
fn select_type(lc: &str) -> Option<ContractType> {
    let has = |kw: &str| lc.contains(kw);

    if has("erc721") || has("nft") || has("collectible") {
        Some(ContractType::Erc721)
    } else if has("erc1155") || has("multi-token") || (has("multi") && has("token")) {
        Some(ContractType::Erc1155)
    } else if has("erc20") || has("token") || has("coin") || has("fungible") {
        if has("upgrad") || has("proxy") {
            Some(ContractType::Erc20Upgradeable)
        } else {
            Some(ContractType::Erc20)
        }
    } else if has("erc4626") || has("vault") {
        Some(ContractType::Erc4626)
    } else if has("stake") || has("staking") {
        Some(ContractType::Staking)
    } else if has("dao") || has("governance") || has("proposal") || has("vote") {
        Some(ContractType::Governance)
    } else if has("timelock") {
        Some(ContractType::Timelock)
    } else if has("vest") || has("unlock") {
        Some(ContractType::Vesting)
    } else if has("multisig") || has("multi-sig") || has("multi sig") {
        Some(ContractType::Multisig)
    } else if has("escrow") {
        Some(ContractType::Escrow)
    } else if has("upgrad") || has("proxy") {
        Some(ContractType::Upgradeable)
    } else {
        None
    }
}

/// Independent keyword predicates; every match appends its feature.
///
/// The scan is global and deliberately archetype-agnostic: a staking prompt
/// mentioning "fee" records `royalties` even though the staking assembler
/// has no rule for it.
fn extract_features(lc: &str) -> FeatureSet {
    let has = |kw: &str| lc.contains(kw);
    let mut features = FeatureSet::new();

    if has("pausable") || has("pause") {
        features.insert(Feature::Pausable);
    }
    if has("ownable") || has("owner") || has("admin") {
        features.insert(Feature::Ownable);
    }
    if has("mintable") || has("mint") {
        features.insert(Feature::Mintable);
    }
    if has("burnable") || has("burn") {
        features.insert(Feature::Burnable);
    }
    if has("cap") || (has("supply") && has("limit")) {
        features.insert(Feature::Capped);
    }
    if has("role") || has("access control") || has("permission") {
        features.insert(Feature::Roles);
    }
    if has("time") || has("lock") {
        features.insert(Feature::Timelock);
    }
    if has("batch") {
        features.insert(Feature::Batchable);
    }
    if has("uups") || has("upgrad") || has("proxy") {
        features.insert(Feature::Uups);
    }
    if has("royalt") || has("fee") {
        features.insert(Feature::Royalties);
    }
    if has("permit") || has("gasless") {
        features.insert(Feature::Permit);
    }
    if has("metadata") || has("uri") {
        features.insert(Feature::Metadata);
    }
    if has("enumerable") || has("enumerate") {
        features.insert(Feature::Enumerable);
    }
    if has("soulbound") || has("non-transferable") {
        features.insert(Feature::Soulbound);
    }
    if has("snapshot") {
        features.insert(Feature::Snapshot);
    }
    if has("votes") || has("voting power") {
        features.insert(Feature::Votes);
    }

    features
}

/// Custom contract name from the prompt, if any pattern matches.
fn extract_name(prompt: &str) -> Option<String> {
    NAME_RE.captures(prompt).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

fn extract_params(prompt: &str, lc: &str) -> ContractParams {
    let mut params = ContractParams::default();

    if let Some(caps) = SYMBOL_RE.captures(prompt) {
        params.symbol = Some(caps[1].to_uppercase());
    }

    if let Some(caps) = SUPPLY_RE.captures(prompt) {
        let raw = caps[1].replace(',', "");
        if let Ok(mut supply) = raw.parse::<f64>() {
            if lc.contains("million") {
                supply *= 1_000_000.0;
            }
            if lc.contains("billion") {
                supply *= 1_000_000_000.0;
            }
            if supply.is_finite() && supply >= 0.0 {
                params.supply = Some(supply as u128);
            }
        }
    }

    if lc.contains("staking") || lc.contains("stake") {
        if let Some(caps) = STAKING_PERIOD_RE.captures(prompt) {
            if let Ok(mut period) = caps[1].parse::<u32>() {
                let unit = caps[2].to_lowercase();
                if unit.starts_with("week") {
                    period = period.saturating_mul(7);
                } else if unit.starts_with("month") {
                    period = period.saturating_mul(30);
                }
                params.staking_period_days = Some(period);
            }
        }
        if let Some(caps) = REWARD_RE.captures(prompt) {
            params.reward_rate = caps[1].parse::<f64>().ok();
        }
    }

    if lc.contains("dao") || lc.contains("governance") {
        if let Some(caps) = QUORUM_RE.captures(prompt) {
            params.quorum = caps[1].parse::<u32>().ok();
        }
        if let Some(caps) = VOTING_PERIOD_RE.captures(prompt) {
            if let Ok(mut period) = caps[1].parse::<u32>() {
                if caps[2].to_lowercase().starts_with("week") {
                    period = period.saturating_mul(7);
                }
                params.voting_period_days = Some(period);
            }
        }
    }

    if lc.contains("multisig") || lc.contains("multi-sig") || lc.contains("multi sig") {
        if let Some(caps) = THRESHOLD_RE.captures(lc) {
            if let (Ok(required), Ok(total)) =
                (caps[1].parse::<u32>(), caps[2].parse::<u32>())
            {
                if required > 0 && required <= total {
                    params.threshold = Some((required, total));
                }
            }
        }
    }

    params
}

/// Symbol for token archetypes: fixed default when the name is the archetype
/// default, otherwise derived from the letters of the custom name.
fn derive_symbol(contract_type: ContractType, name: &str) -> String {
    if name == contract_type.default_name() {
        return match contract_type {
            ContractType::Erc20 | ContractType::Erc20Upgradeable => "MTKN",
            ContractType::Erc721 => "MNFT",
            ContractType::Erc1155 => "MMT",
            ContractType::Erc4626 => "MVLT",
            _ => "TKN",
        }
        .to_string();
    }

    let letters: String = name.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    let symbol: String = letters.chars().take(5).collect::<String>().to_uppercase();
    if symbol.is_empty() {
        "TKN".to_string()
    } else {
        symbol
    }
}
