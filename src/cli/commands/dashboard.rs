use chrono::Local;
use colored::Colorize;

use super::api_helpers::{self, ApiContext};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::account_summary::{AccountStatus, AccountSummary, DashboardTotals};
use crate::core::models::credential::CredentialRecord;
use crate::core::models::traffic::BYTES_PER_GB;
use crate::core::services::account_aggregator::AccountAggregator;
use crate::core::services::formatters::{
    current_month_name, format_bytes, format_usage_percentage, truncate_text,
};

/// Execute the `cdnwatch dashboard` command.
///
/// Loads every stored key concurrently and prints the accounts sorted by
/// month-to-date traffic, heaviest first.
pub fn execute(json: bool, active_only: bool) -> Result<()> {
    let service = api_helpers::key_service();
    let mut records = service.list_keys()?;
    if active_only {
        records.retain(|r| r.is_active);
    }

    if records.is_empty() {
        if json {
            let doc = serde_json::json!({ "totals": DashboardTotals::default(), "accounts": [] });
            println!("{}", serde_json::to_string_pretty(&doc)?);
            return Ok(());
        }
        output::header("Dashboard");
        output::warning("No API keys found");
        println!("  Add your first key with 'cdnwatch keys add <name> <key>'.");
        return Ok(());
    }

    let api = ApiContext::load()?;
    let rt = api_helpers::runtime()?;
    let aggregator = AccountAggregator::new(|record: &CredentialRecord| api.client_for(record));

    let sp = (!json).then(|| output::spinner(&format!("Loading {} accounts...", records.len())));
    let summaries = rt.block_on(aggregator.load_all(&records));
    if let Some(sp) = sp {
        output::clear_spinner(sp);
    }

    let totals = DashboardTotals::from_summaries(&summaries);

    if json {
        let doc = serde_json::json!({ "totals": totals, "accounts": summaries });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    output::header("Dashboard");
    println!(
        "  Traffic usage for {}",
        current_month_name(Local::now().date_naive())
    );
    print_totals(&totals);

    output::header("Your accounts");
    for summary in &summaries {
        print_account(summary);
    }

    Ok(())
}

fn print_totals(totals: &DashboardTotals) {
    println!();
    println!("  Total accounts  {}", totals.total_accounts.to_string().bold());
    println!("  Active          {}", totals.active.to_string().green());
    println!("  Errors          {}", totals.errors.to_string().red());
    println!(
        "  Total used      {}",
        format_bytes(totals.traffic_used * BYTES_PER_GB, 2).bold()
    );
}

fn print_account(summary: &AccountSummary) {
    println!();
    match summary.status {
        AccountStatus::Active => {
            let pct = format_usage_percentage(summary.traffic_used, Some(summary.traffic_limit));
            println!(
                "  {} {}  {}",
                "●".green(),
                summary.name.bold(),
                summary.id.dimmed()
            );
            println!(
                "    {} {:>3}%  {} of {}",
                output::usage_bar(pct),
                pct,
                format_bytes(summary.used_bytes(), 2),
                format_bytes(summary.limit_bytes(), 2)
            );
        }
        AccountStatus::Error => {
            println!(
                "  {} {}  {}",
                "●".red(),
                summary.name.bold(),
                summary.id.dimmed()
            );
            let reason = summary.error.as_deref().unwrap_or("unknown error");
            println!("    Error loading data: {}", truncate_text(reason, 120).red());
        }
    }
}
