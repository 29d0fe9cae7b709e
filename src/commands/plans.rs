use anyhow::Result;

use crate::format::format_number;
use crate::models::PricingCatalog;

pub fn show_plans(catalog: &PricingCatalog, json: bool) -> Result<()> {
    let plans = catalog.available_plans();

    if json {
        let output = serde_json::json!({
            "default": catalog.default_key(),
            "plans": plans,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("💵 Pricing Plans\n");
    for plan in plans {
        let default_marker = if plan.key == catalog.default_key() {
            " (default)"
        } else {
            ""
        };
        println!("{} — {}{}", plan.key, plan.label, default_marker);
        println!(
            "   {} · {} · {} token context window",
            plan.provider,
            plan.model_name,
            format_number(plan.context_window)
        );
        println!(
            "   {:<16} {:>8} {:>8} {:>8} {:>8} {:>12}",
            "Tier", "Input", "Output", "CacheWr", "CacheRd", "Storage/hr"
        );
        for tier in &plan.tiers {
            let bound = match tier.up_to_tokens {
                Some(bound) => format!("≤ {}", format_number(bound)),
                None => "overflow".to_string(),
            };
            println!(
                "   {:<16} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>12.2}",
                bound,
                tier.input_per_million,
                tier.output_per_million,
                tier.cache_write_per_million,
                tier.cache_read_per_million,
                tier.cache_storage_per_million_hour
            );
        }
        if !plan.notes.is_empty() {
            println!("   {}", plan.notes);
        }
        println!();
    }

    Ok(())
}
