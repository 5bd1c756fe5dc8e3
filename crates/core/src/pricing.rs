use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::TokenCounts;

/// USD prices per million tokens for one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub input_per_1m: f64,
    pub output_per_1m: f64,
    #[serde(default)]
    pub cache_read_per_1m: f64,
    #[serde(default)]
    pub cache_write_per_1m: f64,
}

impl PricingEntry {
    const fn new(input: f64, output: f64, cache_read: f64, cache_write: f64) -> Self {
        Self {
            input_per_1m: input,
            output_per_1m: output,
            cache_read_per_1m: cache_read,
            cache_write_per_1m: cache_write,
        }
    }
}

/// Built-in price list keyed by canonical model identity.
///
/// Immutable once constructed; lookups for unknown models return `None`
/// rather than an error so new models never break estimation.
#[derive(Debug, Clone)]
pub struct PricingTable {
    entries: BTreeMap<&'static str, PricingEntry>,
    aliases: BTreeMap<&'static str, &'static str>,
}

const PRICES: &[(&str, PricingEntry)] = &[
    (
        "claude-opus-4-5-20250514",
        PricingEntry::new(15.0, 75.0, 1.5, 18.75),
    ),
    (
        "claude-opus-4-5-20251101",
        PricingEntry::new(15.0, 75.0, 1.5, 18.75),
    ),
    (
        "claude-sonnet-4-5-20250514",
        PricingEntry::new(3.0, 15.0, 0.3, 3.75),
    ),
    (
        "claude-sonnet-4-5-20241022",
        PricingEntry::new(3.0, 15.0, 0.3, 3.75),
    ),
    (
        "claude-haiku-4-5-20250514",
        PricingEntry::new(0.8, 4.0, 0.08, 1.0),
    ),
    ("gemini-3-pro", PricingEntry::new(1.25, 10.0, 0.125, 1.25)),
    (
        "gemini-3-flash",
        PricingEntry::new(0.075, 0.3, 0.0075, 0.075),
    ),
    (
        "gemini-2.0-flash",
        PricingEntry::new(0.075, 0.3, 0.0075, 0.075),
    ),
    ("gpt-5", PricingEntry::new(5.0, 15.0, 0.5, 5.0)),
    ("gpt-4o", PricingEntry::new(2.5, 10.0, 0.25, 2.5)),
    ("gpt-4o-mini", PricingEntry::new(0.15, 0.6, 0.015, 0.15)),
    ("deepseek-chat", PricingEntry::new(0.27, 1.1, 0.027, 0.27)),
    (
        "deepseek-reasoner",
        PricingEntry::new(0.55, 2.19, 0.055, 0.55),
    ),
];

const ALIASES: &[(&str, &str)] = &[
    ("opus", "claude-opus-4-5-20250514"),
    ("sonnet", "claude-sonnet-4-5-20250514"),
    ("haiku", "claude-haiku-4-5-20250514"),
    ("gemini-pro", "gemini-3-pro"),
    ("gemini-flash", "gemini-3-flash"),
];

impl PricingTable {
    pub fn builtin() -> Self {
        Self {
            entries: PRICES.iter().copied().collect(),
            aliases: ALIASES.iter().copied().collect(),
        }
    }

    /// Collapse vendor aliases and date-stamped variants into the canonical
    /// identity used to key the price list. Unknown names pass through
    /// unchanged, which marks them as unpriced.
    pub fn normalize(&self, raw: &str) -> String {
        let lower = raw.to_ascii_lowercase();
        if let Some(canonical) = self.aliases.get(lower.as_str()) {
            return canonical.to_string();
        }
        if lower.contains("opus") {
            if raw.contains("20251101") {
                return "claude-opus-4-5-20251101".to_string();
            }
            return "claude-opus-4-5-20250514".to_string();
        }
        if lower.contains("sonnet") {
            if raw.contains("20241022") {
                return "claude-sonnet-4-5-20241022".to_string();
            }
            return "claude-sonnet-4-5-20250514".to_string();
        }
        if lower.contains("haiku") {
            return "claude-haiku-4-5-20250514".to_string();
        }
        if lower.contains("gemini") {
            if lower.contains("pro") {
                return "gemini-3-pro".to_string();
            }
            if lower.contains("flash") {
                return "gemini-3-flash".to_string();
            }
        }
        if lower.contains("gpt-5") {
            return "gpt-5".to_string();
        }
        if lower.contains("gpt-4o-mini") {
            return "gpt-4o-mini".to_string();
        }
        if lower.contains("gpt-4o") {
            return "gpt-4o".to_string();
        }
        if lower.contains("deepseek") {
            if lower.contains("reasoner") || lower.contains("r1") {
                return "deepseek-reasoner".to_string();
            }
            return "deepseek-chat".to_string();
        }
        raw.to_string()
    }

    pub fn lookup(&self, model: &str) -> Option<&PricingEntry> {
        let canonical = self.normalize(model);
        self.entries.get(canonical.as_str())
    }

    /// Estimated USD cost for the given counts, 0.0 when the model is
    /// unpriced. Rounded to 4 decimals so repeated ingestion of the same
    /// snapshot stores byte-identical values.
    pub fn estimate(&self, model: &str, counts: TokenCounts) -> f64 {
        let Some(entry) = self.lookup(model) else {
            return 0.0;
        };
        let cost = (counts.input as f64 / 1_000_000.0) * entry.input_per_1m
            + (counts.output as f64 / 1_000_000.0) * entry.output_per_1m
            + (counts.cache_read as f64 / 1_000_000.0) * entry.cache_read_per_1m
            + (counts.cache_write as f64 / 1_000_000.0) * entry.cache_write_per_1m;
        round_cost(cost)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &PricingEntry)> {
        self.entries.iter().map(|(name, entry)| (*name, entry))
    }
}

/// Stored costs are kept at 4 decimal places.
pub fn round_cost(cost: f64) -> f64 {
    (cost * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PricingTable {
        PricingTable::builtin()
    }

    #[test]
    fn normalize_resolves_exact_aliases() {
        let table = table();
        assert_eq!(table.normalize("opus"), "claude-opus-4-5-20250514");
        assert_eq!(table.normalize("Sonnet"), "claude-sonnet-4-5-20250514");
        assert_eq!(table.normalize("gemini-flash"), "gemini-3-flash");
    }

    #[test]
    fn normalize_disambiguates_by_date_stamp() {
        let table = table();
        assert_eq!(
            table.normalize("claude-opus-4-5-20251101"),
            "claude-opus-4-5-20251101"
        );
        assert_eq!(
            table.normalize("some-sonnet-build-20241022"),
            "claude-sonnet-4-5-20241022"
        );
    }

    #[test]
    fn normalize_matches_keywords_through_provider_prefixes() {
        let table = table();
        assert_eq!(
            table.normalize("anthropic/claude-sonnet-4-5"),
            "claude-sonnet-4-5-20250514"
        );
        assert_eq!(table.normalize("openai/gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(table.normalize("deepseek-r1-distill"), "deepseek-reasoner");
    }

    #[test]
    fn normalize_passes_unknown_names_through() {
        let table = table();
        assert_eq!(table.normalize("mystery-model-9"), "mystery-model-9");
        assert!(table.lookup("mystery-model-9").is_none());
    }

    #[test]
    fn estimate_prices_all_four_categories() {
        let table = table();
        let cost = table.estimate(
            "claude-sonnet-4-5-20250514",
            TokenCounts {
                input: 1_000_000,
                output: 500_000,
                cache_read: 0,
                cache_write: 0,
            },
        );
        assert_eq!(cost, 10.5);
    }

    #[test]
    fn estimate_is_additive_across_split_inputs() {
        let table = table();
        let model = "claude-sonnet-4-5-20250514";
        let whole = table.estimate(
            model,
            TokenCounts {
                input: 600_000,
                output: 400_000,
                ..TokenCounts::default()
            },
        );
        let first = table.estimate(
            model,
            TokenCounts {
                input: 600_000,
                ..TokenCounts::default()
            },
        );
        let second = table.estimate(
            model,
            TokenCounts {
                output: 400_000,
                ..TokenCounts::default()
            },
        );
        assert!((whole - (first + second)).abs() < 1e-4);
    }

    #[test]
    fn estimate_returns_zero_for_unpriced_models() {
        let table = table();
        let cost = table.estimate(
            "mystery-model-9",
            TokenCounts {
                input: 1_000_000,
                output: 1_000_000,
                ..TokenCounts::default()
            },
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn estimate_is_stable_across_recomputation() {
        let table = table();
        let counts = TokenCounts {
            input: 123_457,
            output: 98_765,
            cache_read: 11_111,
            cache_write: 3_333,
        };
        let first = table.estimate("claude-opus-4-5-20250514", counts);
        let second = table.estimate("claude-opus-4-5-20250514", counts);
        assert_eq!(first, second);
        assert_eq!(first, round_cost(first));
    }
}
