pub mod parameters;
pub mod pricing;
pub mod result;

pub use parameters::{GrepParams, KnowledgeBaseParams, Params, ParamsError, QueryParams, RagParams};
pub use pricing::{PricingCatalog, PricingError, PricingPlan, PricingTier, DEFAULT_PLAN_KEY};
pub use result::{CalculationResult, CostBreakdown, LatencyBreakdown, Scenario, ScenarioMetrics};
