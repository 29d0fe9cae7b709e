use crate::models::{CalculationResult, Params, Scenario};

pub struct App {
    pub params: Params,
    pub results: Vec<CalculationResult>,
    pub selected_tab: Tab,
    pub should_quit: bool,
}

#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Overview,
    NoCache,
    Cache,
    Grep,
    Rag,
}

impl Tab {
    pub fn scenario(&self) -> Option<Scenario> {
        match self {
            Tab::Overview => None,
            Tab::NoCache => Some(Scenario::LongContextNoCache),
            Tab::Cache => Some(Scenario::LongContextWithCache),
            Tab::Grep => Some(Scenario::GrepBaseline),
            Tab::Rag => Some(Scenario::RagVectorDb),
        }
    }
}

impl App {
    pub fn new(params: Params, results: Vec<CalculationResult>) -> Self {
        Self {
            params,
            results,
            selected_tab: Tab::Overview,
            should_quit: false,
        }
    }

    pub fn next_tab(&mut self) {
        self.selected_tab = match self.selected_tab {
            Tab::Overview => Tab::NoCache,
            Tab::NoCache => Tab::Cache,
            Tab::Cache => Tab::Grep,
            Tab::Grep => Tab::Rag,
            Tab::Rag => Tab::Overview,
        };
    }

    pub fn previous_tab(&mut self) {
        self.selected_tab = match self.selected_tab {
            Tab::Overview => Tab::Rag,
            Tab::NoCache => Tab::Overview,
            Tab::Cache => Tab::NoCache,
            Tab::Grep => Tab::Cache,
            Tab::Rag => Tab::Grep,
        };
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn result_for(&self, scenario: Scenario) -> Option<&CalculationResult> {
        self.results.iter().find(|r| r.scenario == scenario)
    }

    pub fn cheapest(&self) -> Option<&CalculationResult> {
        self.results
            .iter()
            .min_by(|a, b| a.monthly_cost.total_cmp(&b.monthly_cost))
    }

    pub fn fastest(&self) -> Option<&CalculationResult> {
        self.results
            .iter()
            .min_by(|a, b| a.avg_time_seconds.total_cmp(&b.avg_time_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::all_calculators;
    use crate::models::parameters::test_params;
    use crate::models::PricingCatalog;

    fn test_app() -> App {
        let catalog = PricingCatalog::builtin();
        let params = test_params();
        let results = all_calculators()
            .iter()
            .map(|calc| calc.calculate(&params, &catalog).unwrap())
            .collect();
        App::new(params, results)
    }

    #[test]
    fn tab_cycle_wraps() {
        let mut app = test_app();
        for _ in 0..5 {
            app.next_tab();
        }
        assert!(app.selected_tab == Tab::Overview);
        app.previous_tab();
        assert!(app.selected_tab == Tab::Rag);
    }

    #[test]
    fn every_scenario_tab_has_a_result() {
        let app = test_app();
        for tab in [Tab::NoCache, Tab::Cache, Tab::Grep, Tab::Rag] {
            let scenario = tab.scenario().unwrap();
            assert!(app.result_for(scenario).is_some());
        }
    }
}
