use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_PLAN_KEY: &str = "claude-3.5-sonnet-1m";

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("unknown pricing plan '{0}'")]
    PlanNotFound(String),
}

/// Per-million-token prices for prompts up to `up_to_tokens`.
///
/// A tier with `up_to_tokens: None` is the catch-all and must be last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingTier {
    pub up_to_tokens: Option<u64>,
    pub input_per_million: f64,
    pub output_per_million: f64,
    pub cache_write_per_million: f64,
    pub cache_read_per_million: f64,
    #[serde(default)]
    pub cache_storage_per_million_hour: f64,
}

/// Pricing configuration for a specific model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPlan {
    pub key: String,
    pub label: String,
    pub provider: String,
    pub model_name: String,
    pub context_window: u64,
    pub tiers: Vec<PricingTier>,
    #[serde(default)]
    pub notes: String,
}

impl PricingPlan {
    /// First tier whose bound covers `tokens` (bounds are inclusive).
    fn tier_for_tokens(&self, tokens: u64) -> &PricingTier {
        self.tiers
            .iter()
            .find(|tier| tier.up_to_tokens.map_or(true, |bound| tokens <= bound))
            .unwrap_or_else(|| &self.tiers[self.tiers.len() - 1])
    }

    pub fn input_price(&self, tokens: u64) -> f64 {
        self.tier_for_tokens(tokens).input_per_million
    }

    pub fn output_price(&self, tokens: u64) -> f64 {
        self.tier_for_tokens(tokens).output_per_million
    }

    pub fn cache_write_price(&self, tokens: u64) -> f64 {
        self.tier_for_tokens(tokens).cache_write_per_million
    }

    pub fn cache_read_price(&self, tokens: u64) -> f64 {
        self.tier_for_tokens(tokens).cache_read_per_million
    }

    pub fn cache_storage_price_per_hour(&self, tokens: u64) -> f64 {
        self.tier_for_tokens(tokens).cache_storage_per_million_hour
    }
}

/// Registry of supported pricing plans.
///
/// Built once at startup and passed by reference; read-only afterward.
pub struct PricingCatalog {
    plans: HashMap<String, PricingPlan>,
    default_key: String,
}

impl PricingCatalog {
    pub fn new(plans: HashMap<String, PricingPlan>, default_key: &str) -> Result<Self, PricingError> {
        if !plans.contains_key(default_key) {
            return Err(PricingError::PlanNotFound(default_key.to_string()));
        }
        Ok(Self {
            plans,
            default_key: default_key.to_string(),
        })
    }

    /// Catalog with the built-in plan set.
    pub fn builtin() -> Self {
        let mut plans = HashMap::new();

        // Claude Sonnet 1M context: long-context surcharge above 200k prompt tokens
        plans.insert(DEFAULT_PLAN_KEY.to_string(), PricingPlan {
            key: DEFAULT_PLAN_KEY.to_string(),
            label: "Anthropic Claude Sonnet".to_string(),
            provider: "Anthropic".to_string(),
            model_name: "Claude Sonnet".to_string(),
            context_window: 1_000_000,
            tiers: vec![
                PricingTier {
                    up_to_tokens: Some(200_000),
                    input_per_million: 3.0,
                    output_per_million: 15.0,
                    cache_write_per_million: 3.75,
                    cache_read_per_million: 0.3,
                    cache_storage_per_million_hour: 0.0,
                },
                PricingTier {
                    up_to_tokens: None,
                    input_per_million: 6.0,
                    output_per_million: 22.5,
                    cache_write_per_million: 7.5,
                    cache_read_per_million: 0.6,
                    cache_storage_per_million_hour: 0.0,
                },
            ],
            notes: "Claude 3.5 Sonnet 1M context pricing.".to_string(),
        });

        // Gemini 2.5 Flash: flat pricing, caching billed as storage per hour
        plans.insert("gemini-2.5-flash".to_string(), PricingPlan {
            key: "gemini-2.5-flash".to_string(),
            label: "Google Gemini 2.5 Flash".to_string(),
            provider: "Google".to_string(),
            model_name: "Gemini 2.5 Flash".to_string(),
            context_window: 1_000_000,
            tiers: vec![PricingTier {
                up_to_tokens: None,
                input_per_million: 0.30,
                output_per_million: 2.5,
                cache_write_per_million: 0.30,
                cache_read_per_million: 0.03,
                cache_storage_per_million_hour: 1.0,
            }],
            notes: "Assumes cached tokens bill at $0.03/M on reuse, cache creation at \
                    regular input pricing, and storage at $1.00/M per hour."
                .to_string(),
        });

        Self {
            plans,
            default_key: DEFAULT_PLAN_KEY.to_string(),
        }
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Plans sorted by display label.
    pub fn available_plans(&self) -> Vec<&PricingPlan> {
        let mut plans: Vec<&PricingPlan> = self.plans.values().collect();
        plans.sort_by(|a, b| a.label.cmp(&b.label));
        plans
    }

    /// Plan for the provided key, or the default plan when `None`.
    pub fn get_plan(&self, plan_key: Option<&str>) -> Result<&PricingPlan, PricingError> {
        let key = plan_key.unwrap_or(&self.default_key);
        self.plans
            .get(key)
            .ok_or_else(|| PricingError::PlanNotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_resolves() {
        let catalog = PricingCatalog::builtin();
        let plan = catalog.get_plan(None).unwrap();
        assert_eq!(plan.key, DEFAULT_PLAN_KEY);
        assert_eq!(plan.context_window, 1_000_000);
    }

    #[test]
    fn unknown_plan_fails() {
        let catalog = PricingCatalog::builtin();
        match catalog.get_plan(Some("no-such-plan")) {
            Err(PricingError::PlanNotFound(key)) => assert_eq!(key, "no-such-plan"),
            _ => panic!("expected PlanNotFound error"),
        }
    }

    #[test]
    fn new_rejects_missing_default_key() {
        let result = PricingCatalog::new(HashMap::new(), "absent");
        assert!(matches!(result, Err(PricingError::PlanNotFound(_))));
    }

    #[test]
    fn tier_boundary_is_inclusive() {
        let catalog = PricingCatalog::builtin();
        let plan = catalog.get_plan(None).unwrap();
        // At exactly the bound the lower tier applies; one past it the
        // overflow tier applies.
        assert_eq!(plan.input_price(200_000), 3.0);
        assert_eq!(plan.output_price(200_000), 15.0);
        assert_eq!(plan.input_price(200_001), 6.0);
        assert_eq!(plan.output_price(200_001), 22.5);
    }

    #[test]
    fn single_tier_plan_covers_all_counts() {
        let catalog = PricingCatalog::builtin();
        let plan = catalog.get_plan(Some("gemini-2.5-flash")).unwrap();
        assert_eq!(plan.input_price(0), 0.30);
        assert_eq!(plan.input_price(5_000_000), 0.30);
        assert_eq!(plan.cache_storage_price_per_hour(1_000), 1.0);
    }
}
