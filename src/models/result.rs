use serde::Serialize;

use crate::latency::{LlmLatency, RagLatency};

/// Identity of one answering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    LongContextNoCache,
    LongContextWithCache,
    GrepBaseline,
    RagVectorDb,
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::LongContextNoCache => "Long Context (No Cache)",
            Scenario::LongContextWithCache => "Long Context (Cache)",
            Scenario::GrepBaseline => "Just Grep",
            Scenario::RagVectorDb => "RAG w/ Vector DB",
        }
    }
}

/// Latency breakdown; RAG carries extra retrieval-side components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LatencyBreakdown {
    Llm(LlmLatency),
    Rag(RagLatency),
}

impl LatencyBreakdown {
    pub fn total(&self) -> f64 {
        match self {
            LatencyBreakdown::Llm(lat) => lat.total,
            LatencyBreakdown::Rag(lat) => lat.total,
        }
    }

    pub fn throughput(&self) -> f64 {
        match self {
            LatencyBreakdown::Llm(lat) => lat.throughput,
            LatencyBreakdown::Rag(lat) => lat.llm.throughput,
        }
    }

    /// (ttft, decode) of the LLM call(s), whichever variant.
    pub fn llm_phases(&self) -> (f64, f64) {
        match self {
            LatencyBreakdown::Llm(lat) => (lat.ttft, lat.decode),
            LatencyBreakdown::Rag(lat) => (lat.llm.ttft, lat.llm.decode),
        }
    }
}

/// Cost components per scenario. Per-request vs monthly semantics follow the
/// scenario: long-context cache write/storage and all RAG vector-DB entries
/// except `vector_db_per_request` are monthly amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CostBreakdown {
    LongContext {
        input: f64,
        output: f64,
    },
    Cached {
        cache_write: f64,
        cache_storage: f64,
        cache_read: f64,
        query_input: f64,
        output: f64,
    },
    Grep {
        input: f64,
        output: f64,
    },
    Rag {
        llm_input: f64,
        llm_output: f64,
        vector_db_base: f64,
        embedding: f64,
        rerank: f64,
        vector_db_per_request: f64,
    },
}

/// Scenario-specific display metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScenarioMetrics {
    LongContext {
        kb_size_pages: u64,
        kb_size_tokens: u64,
        monthly_requests: u64,
    },
    Cached {
        kb_size_pages: u64,
        kb_size_tokens: u64,
        monthly_requests: u64,
        cache_writes_per_month: u64,
        cache_storage_hours_per_month: u64,
    },
    Grep {
        monthly_requests: u64,
        llm_calls: u64,
        failed_attempts: u64,
        tokens_per_call: Vec<u64>,
    },
    Rag {
        monthly_requests: u64,
        retrieved_pages: f64,
        chunks_used: u64,
        tokens_per_chunk: u64,
        rerank_calls_per_request: u64,
        docs_per_rerank_call: u64,
    },
}

/// Standardized result from any calculator; the sole contract between the
/// calculation core and presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub scenario: Scenario,
    pub scenario_name: &'static str,
    pub monthly_cost: f64,
    pub cost_per_request: f64,
    pub avg_time_seconds: f64,
    pub input_tokens: u64,
    pub latency: LatencyBreakdown,
    pub cost_breakdown: CostBreakdown,
    pub metrics: ScenarioMetrics,
}
