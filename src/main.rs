mod calculators;
mod cli;
mod commands;
mod format;
mod latency;
mod models;
mod tui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calculators::all_calculators;
use cli::{Cli, Commands};
use models::PricingCatalog;
use tui::{run_dashboard, App};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .init();

    let cli = Cli::parse();
    let catalog = PricingCatalog::builtin();

    match cli.command {
        Commands::Compare { scenario, json } => {
            let params = scenario.into_params();
            commands::show_compare(&params, &catalog, json)?;
        }
        Commands::Dashboard { scenario } => {
            let params = scenario.into_params();
            params.validate(&catalog)?;
            let mut results = Vec::with_capacity(4);
            for calc in all_calculators() {
                results.push(calc.calculate(&params, &catalog)?);
            }
            let app = App::new(params, results);
            run_dashboard(app)?;
        }
        Commands::Plans { json } => {
            commands::show_plans(&catalog, json)?;
        }
        Commands::Reference { topic } => {
            commands::show_reference(topic.as_deref())?;
        }
    }

    Ok(())
}
