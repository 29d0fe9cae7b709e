use tracing::debug;

use crate::latency::estimate_rag_latency;
use crate::models::{
    CalculationResult, CostBreakdown, LatencyBreakdown, Params, PricingCatalog, PricingError,
    Scenario, ScenarioMetrics,
};

use super::Calculator;

const MILLION: f64 = 1_000_000.0;

/// Retrieval-augmented generation backed by a vector database, with
/// reranking of the retrieved candidates.
pub struct RagWithVectorDb;

/// How many documents fit in one rerank call alongside the query, and how
/// many calls the candidate set therefore needs.
fn rerank_batching(params: &Params) -> (u64, u64) {
    let candidates = params.rag.top_k.max(params.rag.rerank_top_k);
    let available = params
        .rag
        .rerank_context_limit()
        .saturating_sub(params.query.query_tokens);
    let docs_per_call = (available / params.rag.tokens_per_chunk).max(1);
    let calls = if candidates == 0 {
        0
    } else {
        candidates.div_ceil(docs_per_call)
    };
    (docs_per_call, calls)
}

impl Calculator for RagWithVectorDb {
    fn calculate(
        &self,
        params: &Params,
        catalog: &PricingCatalog,
    ) -> Result<CalculationResult, PricingError> {
        let plan = catalog.get_plan(Some(&params.plan_key))?;
        let kb = &params.knowledge_base;
        let retrieved_tokens = params.rag.top_k * params.rag.tokens_per_chunk;
        let prompt_tokens = retrieved_tokens + params.query.query_tokens;
        let retrieved_pages = retrieved_tokens as f64 / kb.tokens_per_page as f64;
        let monthly_requests = params.monthly_requests();
        debug!(prompt_tokens, retrieved_tokens, "rag with vector db");

        // LLM costs per request, priced at the (small) RAG prompt's tier.
        let llm_input_cost = (prompt_tokens as f64 / MILLION) * plan.input_price(prompt_tokens);
        let llm_output_cost =
            (params.query.output_tokens as f64 / MILLION) * plan.output_price(prompt_tokens);
        let llm_cost_per_request = llm_input_cost + llm_output_cost;

        // Vector DB side: base fee, embedding refresh on every KB update,
        // and rerank calls batched under the reranker's context limit.
        let embedding_cost_per_reindex =
            (kb.total_tokens() as f64 / MILLION) * params.rag.embedding_price_per_million;
        let monthly_embedding_cost = embedding_cost_per_reindex * kb.updates_per_month as f64;

        let (docs_per_rerank_call, rerank_calls) = rerank_batching(params);
        let rerank_cost_per_request = rerank_calls as f64 * params.rag.rerank_price_per_query;
        let rerank_cost_monthly = rerank_cost_per_request * monthly_requests as f64;

        let vector_db_monthly_cost =
            params.rag.vector_db_base_cost + monthly_embedding_cost + rerank_cost_monthly;
        // Monthly batch costs amortized per request; degenerate zero-traffic
        // input amortizes to zero.
        let vector_db_cost_per_request = if monthly_requests > 0 {
            vector_db_monthly_cost / monthly_requests as f64
        } else {
            0.0
        };

        let cost_per_request = llm_cost_per_request + vector_db_cost_per_request;
        let monthly_cost =
            llm_cost_per_request * monthly_requests as f64 + vector_db_monthly_cost;

        let latency = estimate_rag_latency(
            kb.total_tokens(),
            params.rag.top_k,
            prompt_tokens,
            params.query.output_tokens,
            monthly_requests,
            kb.updates_per_month,
            Some(params.rag.rerank_top_k),
            false,
        );

        Ok(CalculationResult {
            scenario: Scenario::RagVectorDb,
            scenario_name: Scenario::RagVectorDb.label(),
            monthly_cost,
            cost_per_request,
            avg_time_seconds: latency.total,
            input_tokens: prompt_tokens,
            latency: LatencyBreakdown::Rag(latency),
            cost_breakdown: CostBreakdown::Rag {
                llm_input: llm_input_cost,
                llm_output: llm_output_cost,
                vector_db_base: params.rag.vector_db_base_cost,
                embedding: monthly_embedding_cost,
                rerank: rerank_cost_monthly,
                vector_db_per_request: vector_db_cost_per_request,
            },
            metrics: ScenarioMetrics::Rag {
                monthly_requests,
                retrieved_pages,
                chunks_used: params.rag.top_k,
                tokens_per_chunk: params.rag.tokens_per_chunk,
                rerank_calls_per_request: rerank_calls,
                docs_per_rerank_call,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameters::test_params;

    #[test]
    fn rerank_batching_worked_example() {
        // limit 4096, query 50 -> floor(4046 / 800) = 5 docs per call;
        // candidates max(3, 20) = 20 -> ceil(20 / 5) = 4 calls.
        let params = test_params();
        let (docs_per_call, calls) = rerank_batching(&params);
        assert_eq!(docs_per_call, 5);
        assert_eq!(calls, 4);
    }

    #[test]
    fn rerank_batching_clamps_tight_context() {
        let mut params = test_params();
        // Limit smaller than the query: zero availability, still 1 doc/call.
        params.rag.rerank_context_token_limit = Some(40);
        let (docs_per_call, calls) = rerank_batching(&params);
        assert_eq!(docs_per_call, 1);
        assert_eq!(calls, 20);
    }

    #[test]
    fn costs_compose() {
        let catalog = PricingCatalog::builtin();
        let params = test_params();
        let result = RagWithVectorDb.calculate(&params, &catalog).unwrap();

        // Prompt = 3 * 800 + 50 = 2,450 tokens, base tier.
        assert_eq!(result.input_tokens, 2_450);
        let llm = (2_450.0 / 1e6) * 3.0 + 0.001 * 15.0;

        let embedding = (600_000.0 / 1e6) * 0.12 * 4.0;
        let rerank_monthly = 4.0 * 0.002 * 30_000.0;
        let vector_db_monthly = 26.0 + embedding + rerank_monthly;

        let expected_per_request = llm + vector_db_monthly / 30_000.0;
        assert!((result.cost_per_request - expected_per_request).abs() < 1e-9);
        let expected_monthly = llm * 30_000.0 + vector_db_monthly;
        assert!((result.monthly_cost - expected_monthly).abs() < 1e-6);
    }

    #[test]
    fn zero_traffic_amortizes_to_zero() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.requests_per_day = 0;
        let result = RagWithVectorDb.calculate(&params, &catalog).unwrap();
        let CostBreakdown::Rag { vector_db_per_request, llm_input, llm_output, .. } =
            result.cost_breakdown
        else {
            panic!("expected rag breakdown");
        };
        assert_eq!(vector_db_per_request, 0.0);
        assert!((result.cost_per_request - (llm_input + llm_output)).abs() < 1e-12);
        // Monthly cost is just the standing vector DB charges.
        let embedding = (600_000.0 / 1e6) * 0.12 * 4.0;
        assert!((result.monthly_cost - (26.0 + embedding)).abs() < 1e-9);
    }

    #[test]
    fn latency_uses_rerank_fanout_not_top_k() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.rag.rerank_top_k = 60;
        let result = RagWithVectorDb.calculate(&params, &catalog).unwrap();
        let LatencyBreakdown::Rag(lat) = result.latency else {
            panic!("expected rag latency");
        };
        let expected = 0.150 + (60.0 - 24.0) * (0.280 - 0.150) / (96.0 - 24.0);
        assert!((lat.reranking - expected).abs() < 1e-12);
    }
}
