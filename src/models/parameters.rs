use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pricing::PricingCatalog;

pub const DEFAULT_RERANK_CONTEXT_TOKEN_LIMIT: u64 = 4096;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("grep avg_tries must be at least 1")]
    TooFewTries,
    #[error("rag top_k must be at least 1")]
    TopKTooSmall,
    #[error(transparent)]
    Pricing(#[from] super::pricing::PricingError),
}

/// Knowledge base shape and update cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseParams {
    pub pages: u64,
    pub tokens_per_page: u64,
    pub updates_per_month: u64,
    pub cache_storage_hours_per_month: u64,
}

impl KnowledgeBaseParams {
    pub fn total_tokens(&self) -> u64 {
        self.pages * self.tokens_per_page
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParams {
    pub query_tokens: u64,
    pub output_tokens: u64,
}

/// RAG retrieval, embedding, and rerank settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagParams {
    pub top_k: u64,
    pub tokens_per_chunk: u64,
    pub embedding_price_per_million: f64,
    pub rerank_price_per_query: f64,
    pub rerank_top_k: u64,
    pub rerank_context_token_limit: Option<u64>,
    pub vector_db_base_cost: f64,
}

impl RagParams {
    pub fn rerank_context_limit(&self) -> u64 {
        self.rerank_context_token_limit
            .unwrap_or(DEFAULT_RERANK_CONTEXT_TOKEN_LIMIT)
    }
}

/// Grep baseline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrepParams {
    pub avg_tries: u64,
    pub avg_docs_retrieved: u64,
    pub avg_pages_per_document: u64,
}

impl GrepParams {
    /// Tokens pulled into the prompt by one failed retrieval.
    pub fn false_file_tokens(&self, tokens_per_page: u64) -> u64 {
        self.avg_docs_retrieved * self.avg_pages_per_document * tokens_per_page
    }

    /// Tokens of the document that finally answers the query.
    pub fn true_file_tokens(&self, tokens_per_page: u64) -> u64 {
        self.avg_pages_per_document * tokens_per_page
    }
}

/// Full parameter set for one evaluation. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    pub knowledge_base: KnowledgeBaseParams,
    pub query: QueryParams,
    pub rag: RagParams,
    pub grep: GrepParams,
    pub plan_key: String,
    pub requests_per_day: u64,
}

impl Params {
    pub fn monthly_requests(&self) -> u64 {
        self.requests_per_day * 30
    }

    /// Reject structurally invalid inputs before any calculator runs.
    pub fn validate(&self, catalog: &PricingCatalog) -> Result<(), ParamsError> {
        if self.knowledge_base.pages == 0 {
            return Err(ParamsError::NonPositive("knowledge base pages"));
        }
        if self.knowledge_base.tokens_per_page == 0 {
            return Err(ParamsError::NonPositive("tokens per page"));
        }
        if self.query.query_tokens == 0 {
            return Err(ParamsError::NonPositive("query tokens"));
        }
        if self.rag.tokens_per_chunk == 0 {
            return Err(ParamsError::NonPositive("tokens per chunk"));
        }
        if self.grep.avg_tries < 1 {
            return Err(ParamsError::TooFewTries);
        }
        if self.rag.top_k < 1 {
            return Err(ParamsError::TopKTooSmall);
        }
        catalog.get_plan(Some(&self.plan_key))?;
        Ok(())
    }
}

#[cfg(test)]
pub fn test_params() -> Params {
    Params {
        knowledge_base: KnowledgeBaseParams {
            pages: 1000,
            tokens_per_page: 600,
            updates_per_month: 4,
            cache_storage_hours_per_month: 720,
        },
        query: QueryParams {
            query_tokens: 50,
            output_tokens: 1000,
        },
        rag: RagParams {
            top_k: 3,
            tokens_per_chunk: 800,
            embedding_price_per_million: 0.12,
            rerank_price_per_query: 0.002,
            rerank_top_k: 20,
            rerank_context_token_limit: None,
            vector_db_base_cost: 26.0,
        },
        grep: GrepParams {
            avg_tries: 4,
            avg_docs_retrieved: 1,
            avg_pages_per_document: 10,
        },
        plan_key: super::pricing::DEFAULT_PLAN_KEY.to_string(),
        requests_per_day: 1000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_quantities() {
        let params = test_params();
        assert_eq!(params.knowledge_base.total_tokens(), 600_000);
        assert_eq!(params.monthly_requests(), 30_000);
        assert_eq!(params.grep.false_file_tokens(600), 6_000);
        assert_eq!(params.grep.true_file_tokens(600), 6_000);
        assert_eq!(params.rag.rerank_context_limit(), 4096);
    }

    #[test]
    fn validate_accepts_defaults() {
        let catalog = PricingCatalog::builtin();
        assert!(test_params().validate(&catalog).is_ok());
    }

    #[test]
    fn validate_rejects_zero_pages() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.knowledge_base.pages = 0;
        assert!(matches!(
            params.validate(&catalog),
            Err(ParamsError::NonPositive("knowledge base pages"))
        ));
    }

    #[test]
    fn validate_rejects_unknown_plan() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.plan_key = "mystery-model".to_string();
        assert!(matches!(params.validate(&catalog), Err(ParamsError::Pricing(_))));
    }
}
