use tracing::debug;

use crate::latency::estimate_latency;
use crate::models::{
    CalculationResult, CostBreakdown, LatencyBreakdown, Params, PricingCatalog, PricingError,
    Scenario, ScenarioMetrics,
};

use super::Calculator;

const MILLION: f64 = 1_000_000.0;

/// Share of cached knowledge-base tokens still contributing to TTFT; the
/// rest is served from the provider's prompt cache.
const CACHED_TTFT_TOKEN_SHARE: f64 = 0.15;

/// Stuff the whole knowledge base into every prompt, no caching.
pub struct LongContextNoCache;

impl Calculator for LongContextNoCache {
    fn calculate(
        &self,
        params: &Params,
        catalog: &PricingCatalog,
    ) -> Result<CalculationResult, PricingError> {
        let plan = catalog.get_plan(Some(&params.plan_key))?;
        let kb = &params.knowledge_base;
        let prompt_tokens = kb.total_tokens() + params.query.query_tokens;
        debug!(prompt_tokens, plan = %plan.key, "long-context (no cache)");

        // Both input and output are priced by the prompt's tier.
        let input_cost = (prompt_tokens as f64 / MILLION) * plan.input_price(prompt_tokens);
        let output_cost =
            (params.query.output_tokens as f64 / MILLION) * plan.output_price(prompt_tokens);
        let cost_per_request = input_cost + output_cost;
        let monthly_cost = cost_per_request * params.monthly_requests() as f64;

        let latency = estimate_latency(prompt_tokens, params.query.output_tokens, false);

        Ok(CalculationResult {
            scenario: Scenario::LongContextNoCache,
            scenario_name: Scenario::LongContextNoCache.label(),
            monthly_cost,
            cost_per_request,
            avg_time_seconds: latency.total,
            input_tokens: prompt_tokens,
            latency: LatencyBreakdown::Llm(latency),
            cost_breakdown: CostBreakdown::LongContext {
                input: input_cost,
                output: output_cost,
            },
            metrics: ScenarioMetrics::LongContext {
                kb_size_pages: kb.pages,
                kb_size_tokens: kb.total_tokens(),
                monthly_requests: params.monthly_requests(),
            },
        })
    }
}

/// Same prompt composition, with the knowledge base held in the prompt cache.
pub struct LongContextWithCache;

impl Calculator for LongContextWithCache {
    fn calculate(
        &self,
        params: &Params,
        catalog: &PricingCatalog,
    ) -> Result<CalculationResult, PricingError> {
        let plan = catalog.get_plan(Some(&params.plan_key))?;
        let kb = &params.knowledge_base;
        let kb_tokens = kb.total_tokens();
        let prompt_tokens = kb_tokens + params.query.query_tokens;
        debug!(prompt_tokens, plan = %plan.key, "long-context (cache)");

        // Monthly recurring: rewrite the cache on every KB update, pay
        // storage for the configured hours.
        let cache_write_cost = (kb_tokens as f64 / MILLION)
            * plan.cache_write_price(kb_tokens)
            * kb.updates_per_month as f64;
        let cache_storage_cost = (kb_tokens as f64 / MILLION)
            * plan.cache_storage_price_per_hour(kb_tokens)
            * kb.cache_storage_hours_per_month as f64;

        // Per request: read the cached KB, pay input only for the query.
        let cache_read_cost = (kb_tokens as f64 / MILLION) * plan.cache_read_price(kb_tokens);
        let query_input_cost =
            (params.query.query_tokens as f64 / MILLION) * plan.input_price(prompt_tokens);
        let output_cost =
            (params.query.output_tokens as f64 / MILLION) * plan.output_price(prompt_tokens);

        let cost_per_request = cache_read_cost + query_input_cost + output_cost;
        let monthly_cost = cache_write_cost
            + cache_storage_cost
            + cost_per_request * params.monthly_requests() as f64;

        // Roughly 15% of cached tokens still weigh on TTFT.
        let cached_ttft_tokens =
            (kb_tokens as f64 * CACHED_TTFT_TOKEN_SHARE) as u64 + params.query.query_tokens;
        let latency = estimate_latency(cached_ttft_tokens, params.query.output_tokens, true);

        Ok(CalculationResult {
            scenario: Scenario::LongContextWithCache,
            scenario_name: Scenario::LongContextWithCache.label(),
            monthly_cost,
            cost_per_request,
            avg_time_seconds: latency.total,
            input_tokens: prompt_tokens,
            latency: LatencyBreakdown::Llm(latency),
            cost_breakdown: CostBreakdown::Cached {
                cache_write: cache_write_cost,
                cache_storage: cache_storage_cost,
                cache_read: cache_read_cost,
                query_input: query_input_cost,
                output: output_cost,
            },
            metrics: ScenarioMetrics::Cached {
                kb_size_pages: kb.pages,
                kb_size_tokens: kb_tokens,
                monthly_requests: params.monthly_requests(),
                cache_writes_per_month: kb.updates_per_month,
                cache_storage_hours_per_month: kb.cache_storage_hours_per_month,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameters::test_params;

    #[test]
    fn no_cache_matches_reference_scenario() {
        // 1000 pages * 600 tok/page + 50 query tokens = 600,050 prompt
        // tokens, which lands in the >200k tier (6.0 input / 22.5 output).
        let catalog = PricingCatalog::builtin();
        let result = LongContextNoCache.calculate(&test_params(), &catalog).unwrap();
        assert_eq!(result.input_tokens, 600_050);
        let expected = 0.600050 * 6.0 + 0.001 * 22.5;
        assert!((result.cost_per_request - expected).abs() < 1e-9);
        assert!((result.monthly_cost - expected * 30_000.0).abs() < 1e-6);
    }

    #[test]
    fn no_cache_small_kb_uses_base_tier() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.knowledge_base.pages = 100; // 60,050 prompt tokens
        let result = LongContextNoCache.calculate(&params, &catalog).unwrap();
        let expected = 0.060050 * 3.0 + 0.001 * 15.0;
        assert!((result.cost_per_request - expected).abs() < 1e-9);
    }

    #[test]
    fn cached_monthly_cost_decomposes() {
        let catalog = PricingCatalog::builtin();
        let params = test_params();
        let result = LongContextWithCache.calculate(&params, &catalog).unwrap();
        let CostBreakdown::Cached {
            cache_write,
            cache_storage,
            cache_read,
            query_input,
            output,
        } = result.cost_breakdown
        else {
            panic!("expected cached breakdown");
        };
        let per_request = cache_read + query_input + output;
        assert!((result.cost_per_request - per_request).abs() < 1e-9 * per_request);
        let monthly = cache_write + cache_storage + per_request * 30_000.0;
        assert!((result.monthly_cost - monthly).abs() < 1e-9 * monthly);
    }

    #[test]
    fn cached_ttft_counts_a_sliver_of_the_kb() {
        let catalog = PricingCatalog::builtin();
        let result = LongContextWithCache.calculate(&test_params(), &catalog).unwrap();
        // 0.15 * 600,000 + 50 = 90,050 tokens -> large TTFT band, cached.
        let (ttft, _) = result.latency.llm_phases();
        assert!((ttft - (0.15 + 0.25 * 4.3)).abs() < 1e-12);
        // Throughput band also follows the reduced token count.
        assert_eq!(result.latency.throughput(), 62.0);
    }

    #[test]
    fn cache_write_scales_with_updates() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.knowledge_base.updates_per_month = 0;
        let result = LongContextWithCache.calculate(&params, &catalog).unwrap();
        let CostBreakdown::Cached { cache_write, .. } = result.cost_breakdown else {
            panic!("expected cached breakdown");
        };
        assert_eq!(cache_write, 0.0);
    }
}
