use chrono::NaiveDate;

use super::api_helpers::{self, ApiContext};
use crate::core::errors::{CdnwatchError, Result};
use crate::core::traits::stats_api::StatsApi;

/// Execute the `cdnwatch traffic <id> --from --to` command.
///
/// Prints the raw series payload so it can be piped into other tools.
pub fn execute(id: &str, from: &str, to: &str) -> Result<()> {
    let (from_date, to_date) = (parse_date(from)?, parse_date(to)?);
    if from_date > to_date {
        return Err(CdnwatchError::InvalidInput {
            detail: format!("--from {from} is after --to {to}"),
        });
    }

    let record = api_helpers::key_service().get_key(id)?;
    let api = ApiContext::load()?;
    let rt = api_helpers::runtime()?;

    let series = rt.block_on(
        api.client_for(&record)
            .detailed_traffic(&from_date.to_string(), &to_date.to_string()),
    )?;

    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`).
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CdnwatchError::InvalidInput {
        detail: format!(
            "Invalid date format: '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-10-01"
        ),
    })
}
