use tracing::debug;

use crate::latency::estimate_latency;
use crate::models::{
    CalculationResult, CostBreakdown, LatencyBreakdown, Params, PricingCatalog, PricingError,
    Scenario, ScenarioMetrics,
};

use super::Calculator;

const MILLION: f64 = 1_000_000.0;

/// An agent greps for files and feeds them to the LLM, retrying until it
/// finds the right one. Each failed attempt leaves its wrong file in the
/// conversation, so prompts grow with every try.
pub struct GrepBaseline;

impl Calculator for GrepBaseline {
    fn calculate(
        &self,
        params: &Params,
        catalog: &PricingCatalog,
    ) -> Result<CalculationResult, PricingError> {
        let plan = catalog.get_plan(Some(&params.plan_key))?;
        let attempts = params.grep.avg_tries.max(1);
        let failed_attempts = attempts - 1;

        let tokens_per_page = params.knowledge_base.tokens_per_page;
        let false_file_tokens = params.grep.false_file_tokens(tokens_per_page);
        let true_file_tokens = params.grep.true_file_tokens(tokens_per_page);
        let query_tokens = params.query.query_tokens;
        debug!(attempts, false_file_tokens, "grep baseline");

        let mut prompt_tokens_per_attempt: Vec<u64> = (0..failed_attempts)
            .map(|index| query_tokens + (index + 1) * false_file_tokens)
            .collect();
        let final_prompt_tokens =
            query_tokens + failed_attempts * false_file_tokens + true_file_tokens;
        prompt_tokens_per_attempt.push(final_prompt_tokens);

        let total_input_tokens: u64 = prompt_tokens_per_attempt.iter().sum();

        // Every attempt bills input and output at its own prompt's tier.
        let input_cost: f64 = prompt_tokens_per_attempt
            .iter()
            .map(|&tokens| (tokens as f64 / MILLION) * plan.input_price(tokens))
            .sum();
        let output_cost: f64 = prompt_tokens_per_attempt
            .iter()
            .map(|&tokens| (params.query.output_tokens as f64 / MILLION) * plan.output_price(tokens))
            .sum();

        let cost_per_request = input_cost + output_cost;
        let monthly_cost = cost_per_request * params.monthly_requests() as f64;

        // Attempts run sequentially; latencies add up. Reported throughput
        // is the final (successful) attempt's.
        let latencies: Vec<_> = prompt_tokens_per_attempt
            .iter()
            .map(|&tokens| estimate_latency(tokens, params.query.output_tokens, false))
            .collect();
        let ttft: f64 = latencies.iter().map(|lat| lat.ttft).sum();
        let decode: f64 = latencies.iter().map(|lat| lat.decode).sum();
        let latency = crate::latency::LlmLatency {
            ttft,
            decode,
            total: ttft + decode,
            throughput: latencies[latencies.len() - 1].throughput,
        };

        Ok(CalculationResult {
            scenario: Scenario::GrepBaseline,
            scenario_name: Scenario::GrepBaseline.label(),
            monthly_cost,
            cost_per_request,
            avg_time_seconds: latency.total,
            input_tokens: total_input_tokens,
            latency: LatencyBreakdown::Llm(latency),
            cost_breakdown: CostBreakdown::Grep {
                input: input_cost,
                output: output_cost,
            },
            metrics: ScenarioMetrics::Grep {
                monthly_requests: params.monthly_requests(),
                llm_calls: attempts,
                failed_attempts,
                tokens_per_call: prompt_tokens_per_attempt,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameters::test_params;

    #[test]
    fn single_try_reduces_to_one_successful_call() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.grep.avg_tries = 1;
        let result = GrepBaseline.calculate(&params, &catalog).unwrap();

        // Prompt = query + true file = 50 + 6,000 tokens, base tier.
        let prompt = 6_050u64;
        assert_eq!(result.input_tokens, prompt);
        let expected = (prompt as f64 / 1e6) * 3.0 + 0.001 * 15.0;
        assert!((result.cost_per_request - expected).abs() < 1e-12);

        let ScenarioMetrics::Grep {
            llm_calls,
            failed_attempts,
            ref tokens_per_call,
            ..
        } = result.metrics
        else {
            panic!("expected grep metrics");
        };
        assert_eq!(llm_calls, 1);
        assert_eq!(failed_attempts, 0);
        assert_eq!(tokens_per_call, &vec![prompt]);

        let single = estimate_latency(prompt, 1_000, false);
        assert_eq!(result.avg_time_seconds, single.total);
    }

    #[test]
    fn attempts_grow_and_sum() {
        let catalog = PricingCatalog::builtin();
        let params = test_params(); // 4 tries, 6,000 false-file tokens
        let result = GrepBaseline.calculate(&params, &catalog).unwrap();

        let ScenarioMetrics::Grep { ref tokens_per_call, .. } = result.metrics else {
            panic!("expected grep metrics");
        };
        assert_eq!(tokens_per_call, &vec![6_050, 12_050, 18_050, 24_050]);
        assert_eq!(result.input_tokens, 6_050 + 12_050 + 18_050 + 24_050);

        // Each attempt is priced at its own tier (all base tier here).
        let expected_input: f64 = tokens_per_call
            .iter()
            .map(|&t| (t as f64 / 1e6) * 3.0)
            .sum();
        let expected_output = 4.0 * 0.001 * 15.0;
        assert!((result.cost_per_request - (expected_input + expected_output)).abs() < 1e-12);
    }

    #[test]
    fn latency_sums_sequential_attempts() {
        let catalog = PricingCatalog::builtin();
        let params = test_params();
        let result = GrepBaseline.calculate(&params, &catalog).unwrap();

        let expected: f64 = [6_050u64, 12_050, 18_050, 24_050]
            .iter()
            .map(|&t| estimate_latency(t, 1_000, false).total)
            .sum();
        assert!((result.avg_time_seconds - expected).abs() < 1e-12);
        // Throughput reported for the final attempt (24,050 tokens -> 90 tok/s).
        assert_eq!(result.latency.throughput(), 90.0);
    }
}
