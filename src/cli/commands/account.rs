use chrono::Local;
use colored::Colorize;

use super::api_helpers::{self, ApiContext};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::account_summary::{AccountDetail, account_email};
use crate::core::models::credential::CredentialRecord;
use crate::core::models::traffic::{BYTES_PER_GB, daily_points, peak_day};
use crate::core::services::account_aggregator::AccountAggregator;
use crate::core::services::formatters::{
    format_bytes, format_date, format_usage_percentage, mask_api_key,
};

/// How many of the most recent days the history section lists.
const HISTORY_DAYS: usize = 7;

/// Execute the `cdnwatch account <id>` command.
pub fn execute(id: &str, json: bool) -> Result<()> {
    let service = api_helpers::key_service();
    let record = service.get_key(id)?;

    let api = ApiContext::load()?;
    let rt = api_helpers::runtime()?;
    let aggregator = AccountAggregator::new(|record: &CredentialRecord| api.client_for(record));

    let sp = (!json).then(|| output::spinner(&format!("Loading {}...", record.name)));
    let detail = rt.block_on(aggregator.load_detail(&record, Local::now().date_naive()));
    if let Some(sp) = sp {
        output::clear_spinner(sp);
    }
    let detail = detail?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    print_detail(&detail);
    Ok(())
}

fn print_detail(detail: &AccountDetail) {
    let email = account_email(&detail.account_info);

    output::header(&detail.name);
    println!("  {}", email.as_deref().unwrap_or("GCore account").dimmed());

    let used = detail.monthly_traffic.used;
    let limit = detail.monthly_traffic.limit;
    let pct = format_usage_percentage(used, Some(limit));

    output::header("Traffic this month");
    println!("  {} {:>3}%", output::usage_bar(pct), pct);
    println!("  Used:      {}", format_bytes(used * BYTES_PER_GB, 2));
    println!("  Limit:     {}", format_bytes(limit * BYTES_PER_GB, 2));
    println!(
        "  Remaining: {}",
        format_bytes((limit - used).max(0.0) * BYTES_PER_GB, 2)
    );

    let p = &detail.projection;
    output::header("Usage stats");
    println!("  Daily average:      {}", format_bytes(p.daily_average * BYTES_PER_GB, 2));
    println!("  Projected monthly:  {}", format_bytes(p.projected_monthly * BYTES_PER_GB, 2));
    println!("  Days remaining:     {}", p.days_remaining);
    println!(
        "  Remaining quota:    {}",
        p.remaining_quota
            .map(|q| format!("{q}%"))
            .unwrap_or_else(|| "N/A".into())
    );

    output::header("Traffic history");
    let points = detail
        .detailed_traffic
        .as_ref()
        .map(daily_points)
        .unwrap_or_default();
    if points.is_empty() {
        println!("  {}", "No daily breakdown available".dimmed());
    } else {
        for point in points.iter().skip(points.len().saturating_sub(HISTORY_DAYS)) {
            println!("  {}  {}", point.day, format_bytes(point.bytes, 2));
        }
        if let Some(peak) = peak_day(&points) {
            println!("  Peak day: {} ({})", peak.day, format_bytes(peak.bytes, 2));
        }
    }

    output::header("API key");
    let status = if detail.is_active {
        "Active".green()
    } else {
        "Inactive".dimmed()
    };
    println!("  Id:      {}", detail.id);
    println!("  Status:  {status}");
    println!("  Key:     {}", mask_api_key(&detail.api_key));
    println!("  Added:   {}", format_date(&detail.created_at.to_rfc3339()));
}
