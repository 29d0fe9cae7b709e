pub mod grep;
pub mod long_context;
pub mod rag;

pub use grep::GrepBaseline;
pub use long_context::{LongContextNoCache, LongContextWithCache};
pub use rag::RagWithVectorDb;

use crate::models::{CalculationResult, Params, PricingCatalog, PricingError};

/// A scenario calculator: a stateless pure transform from a parameter set
/// (plus the pricing catalog) to one result.
pub trait Calculator {
    fn calculate(
        &self,
        params: &Params,
        catalog: &PricingCatalog,
    ) -> Result<CalculationResult, PricingError>;
}

/// The four scenarios in display order.
pub fn all_calculators() -> [Box<dyn Calculator>; 4] {
    [
        Box::new(LongContextNoCache),
        Box::new(LongContextWithCache),
        Box::new(GrepBaseline),
        Box::new(RagWithVectorDb),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameters::test_params;

    #[test]
    fn calculators_are_idempotent() {
        let catalog = PricingCatalog::builtin();
        let params = test_params();
        for calc in all_calculators() {
            let first = calc.calculate(&params, &catalog).unwrap();
            let second = calc.calculate(&params, &catalog).unwrap();
            assert_eq!(first, second, "{} not idempotent", first.scenario_name);
        }
    }

    #[test]
    fn unknown_plan_propagates_from_every_calculator() {
        let catalog = PricingCatalog::builtin();
        let mut params = test_params();
        params.plan_key = "missing".to_string();
        for calc in all_calculators() {
            assert!(calc.calculate(&params, &catalog).is_err());
        }
    }
}
