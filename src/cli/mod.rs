use clap::{Args, Parser, Subcommand};

use crate::models::{
    GrepParams, KnowledgeBaseParams, Params, QueryParams, RagParams, DEFAULT_PLAN_KEY,
};

#[derive(Parser)]
#[command(name = "rag-compare")]
#[command(about = "Compare long-context and RAG answering strategies by cost and latency")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all four scenarios and print a comparison
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Launch interactive dashboard
    Dashboard {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },

    /// List available pricing plans and their tiers
    Plans {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the assumptions behind the estimates
    Reference {
        /// Topic to show (omit to list topics)
        topic: Option<String>,
    },
}

/// Scenario knobs, defaulted to the reference scenario: a 1,000-page
/// knowledge base of typical density queried 1,000 times a day.
#[derive(Args)]
pub struct ScenarioArgs {
    /// Knowledge base size in pages
    #[arg(long, default_value_t = 1_000)]
    pub pages: u64,

    /// Tokens per page (sparse ~400, typical ~600, dense ~800, image-heavy ~1100)
    #[arg(long, default_value_t = 600)]
    pub tokens_per_page: u64,

    /// Knowledge base updates per month
    #[arg(long, default_value_t = 4)]
    pub updates_per_month: u64,

    /// Hours per month the prompt cache is kept warm
    #[arg(long, default_value_t = 720)]
    pub cache_storage_hours: u64,

    /// Requests per day
    #[arg(long, default_value_t = 1_000)]
    pub requests_per_day: u64,

    /// Query size in tokens
    #[arg(long, default_value_t = 50)]
    pub query_tokens: u64,

    /// Expected output size in tokens
    #[arg(long, default_value_t = 1_000)]
    pub output_tokens: u64,

    /// Pricing plan key (see `plans`)
    #[arg(long, default_value = DEFAULT_PLAN_KEY)]
    pub plan: String,

    /// Average LLM calls before grep finds the right file
    #[arg(long, default_value_t = 4)]
    pub grep_tries: u64,

    /// Documents retrieved per failed grep attempt
    #[arg(long, default_value_t = 1)]
    pub grep_docs_per_try: u64,

    /// Average pages per document
    #[arg(long, default_value_t = 10)]
    pub grep_pages_per_doc: u64,

    /// Chunks retrieved per RAG query
    #[arg(long, default_value_t = 3)]
    pub top_k: u64,

    /// Tokens per retrieved chunk
    #[arg(long, default_value_t = 800)]
    pub tokens_per_chunk: u64,

    /// Embedding price per million tokens
    #[arg(long, default_value_t = 0.12)]
    pub embedding_price: f64,

    /// Price per rerank API call
    #[arg(long, default_value_t = 0.002)]
    pub rerank_price: f64,

    /// Candidate documents sent to the reranker
    #[arg(long, default_value_t = 20)]
    pub rerank_top_k: u64,

    /// Reranker context window in tokens (defaults to 4096)
    #[arg(long)]
    pub rerank_context_limit: Option<u64>,

    /// Vector database base cost per month
    #[arg(long, default_value_t = 26.0)]
    pub vector_db_base_cost: f64,
}

impl ScenarioArgs {
    pub fn into_params(self) -> Params {
        Params {
            knowledge_base: KnowledgeBaseParams {
                pages: self.pages,
                tokens_per_page: self.tokens_per_page,
                updates_per_month: self.updates_per_month,
                cache_storage_hours_per_month: self.cache_storage_hours,
            },
            query: QueryParams {
                query_tokens: self.query_tokens,
                output_tokens: self.output_tokens,
            },
            rag: RagParams {
                top_k: self.top_k,
                tokens_per_chunk: self.tokens_per_chunk,
                embedding_price_per_million: self.embedding_price,
                rerank_price_per_query: self.rerank_price,
                rerank_top_k: self.rerank_top_k,
                rerank_context_token_limit: self.rerank_context_limit,
                vector_db_base_cost: self.vector_db_base_cost,
            },
            grep: GrepParams {
                avg_tries: self.grep_tries,
                avg_docs_retrieved: self.grep_docs_per_try,
                avg_pages_per_document: self.grep_pages_per_doc,
            },
            plan_key: self.plan,
            requests_per_day: self.requests_per_day,
        }
    }
}
