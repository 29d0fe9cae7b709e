use anyhow::Result;

use crate::calculators::all_calculators;
use crate::format::{format_currency, format_currency_precise, format_latency, format_number, format_percentage};
use crate::models::{CalculationResult, Params, PricingCatalog, Scenario};

pub fn show_compare(params: &Params, catalog: &PricingCatalog, json: bool) -> Result<()> {
    params.validate(catalog)?;

    let mut results = Vec::with_capacity(4);
    for calc in all_calculators() {
        results.push(calc.calculate(params, catalog)?);
    }

    if json {
        print_json_compare(params, &results)?;
    } else {
        print_text_compare(params, &results);
    }

    Ok(())
}

fn print_text_compare(params: &Params, results: &[CalculationResult]) {
    println!("💰 Cost & Latency Comparison\n");
    println!(
        "Knowledge base: {} pages ({} tokens), {} requests/day, plan '{}'",
        format_number(params.knowledge_base.pages),
        format_number(params.knowledge_base.total_tokens()),
        format_number(params.requests_per_day),
        params.plan_key
    );
    println!();

    println!(
        "{:<26} {:>14} {:>14} {:>12} {:>14}",
        "Scenario", "Monthly Cost", "Per Request", "Avg Time", "Input Tokens"
    );
    println!("{}", "─".repeat(84));

    for result in results {
        println!(
            "{:<26} {:>14} {:>14} {:>11.2}s {:>14}",
            result.scenario_name,
            format_currency(result.monthly_cost),
            format_currency_precise(result.cost_per_request, 4),
            result.avg_time_seconds,
            format_number(result.input_tokens)
        );
    }

    // Baseline for deltas is the no-cache long-context run.
    if let Some(baseline) = results
        .iter()
        .find(|r| r.scenario == Scenario::LongContextNoCache)
    {
        if baseline.monthly_cost > 0.0 {
            println!("\n📊 Monthly cost vs long context (no cache):");
            for result in results {
                if result.scenario == Scenario::LongContextNoCache {
                    continue;
                }
                let delta =
                    (result.monthly_cost - baseline.monthly_cost) / baseline.monthly_cost * 100.0;
                println!("   {:<26} {}", result.scenario_name, format_percentage(delta));
            }
        }
    }

    if let Some(cheapest) = results
        .iter()
        .min_by(|a, b| a.monthly_cost.total_cmp(&b.monthly_cost))
    {
        println!(
            "\n🏆 Cheapest: {} at {} per month",
            cheapest.scenario_name,
            format_currency(cheapest.monthly_cost)
        );
    }
    if let Some(fastest) = results
        .iter()
        .min_by(|a, b| a.avg_time_seconds.total_cmp(&b.avg_time_seconds))
    {
        println!(
            "⚡ Fastest: {} at {:.2}s per request",
            fastest.scenario_name, fastest.avg_time_seconds
        );
    }

    println!("\nLatency detail (ttft / decode / total / throughput):");
    for result in results {
        let (ttft, decode, total, throughput) = format_latency(&result.latency);
        println!(
            "   {:<26} {} / {} / {} / {}",
            result.scenario_name, ttft, decode, total, throughput
        );
    }
}

fn print_json_compare(params: &Params, results: &[CalculationResult]) -> Result<()> {
    let output = serde_json::json!({
        "parameters": params,
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
