use chrono::{Datelike, NaiveDate};
use futures::future::join_all;

use crate::core::errors::ApiResult;
use crate::core::models::account_summary::{AccountDetail, AccountSummary};
use crate::core::models::credential::CredentialRecord;
use crate::core::models::traffic::UsageProjection;
use crate::core::traits::stats_api::StatsApi;

/// Fans out per-credential fetches and folds the answers into summaries.
///
/// `connect` builds one API client per credential. Nothing here retries,
/// times out or cancels; a stalled request delays only its own account.
pub struct AccountAggregator<F> {
    connect: F,
}

impl<C, F> AccountAggregator<F>
where
    C: StatsApi,
    F: Fn(&CredentialRecord) -> C,
{
    pub fn new(connect: F) -> Self {
        Self { connect }
    }

    /// Summaries for every record, most traffic first.
    ///
    /// All pipelines run concurrently. Each pipeline resolves to a summary
    /// rather than a `Result`, so one account's failure cannot abort or
    /// cancel its siblings.
    pub async fn load_all(&self, records: &[CredentialRecord]) -> Vec<AccountSummary> {
        let mut summaries = join_all(records.iter().map(|r| self.summarize(r))).await;
        sort_by_usage(&mut summaries);
        summaries
    }

    /// Account info and monthly traffic for one record, fetched concurrently.
    pub async fn summarize(&self, record: &CredentialRecord) -> AccountSummary {
        let client = (self.connect)(record);
        let (info, traffic) = futures::join!(client.account_info(), client.monthly_traffic());

        match (info, traffic) {
            (Ok(info), Ok(traffic)) => AccountSummary::active(record, info, traffic),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    id = %record.id,
                    name = %record.name,
                    kind = ?e.kind,
                    error = %e,
                    "account load failed"
                );
                AccountSummary::failed(record, &e)
            }
        }
    }

    /// Everything the detail view needs. Detailed traffic is optional: if
    /// that call fails the detail is still returned without it.
    pub async fn load_detail(
        &self,
        record: &CredentialRecord,
        today: NaiveDate,
    ) -> ApiResult<AccountDetail> {
        let client = (self.connect)(record);
        let (from, to) = month_range_dates(today);

        let (info, monthly, detailed) = futures::join!(
            client.account_info(),
            client.monthly_traffic(),
            client.detailed_traffic(&from, &to),
        );
        let account_info = info?;
        let monthly_traffic = monthly?;
        let detailed_traffic = detailed
            .inspect_err(|e| {
                tracing::debug!(id = %record.id, error = %e, "detailed traffic unavailable")
            })
            .ok();

        Ok(AccountDetail {
            id: record.id.clone(),
            name: record.name.clone(),
            api_key: record.api_key.clone(),
            is_active: record.is_active,
            created_at: record.created_at,
            projection: UsageProjection::compute(
                monthly_traffic.used,
                monthly_traffic.limit,
                today,
            ),
            account_info,
            monthly_traffic,
            detailed_traffic,
        })
    }
}

/// Descending by traffic used; ties keep their input order.
pub fn sort_by_usage(summaries: &mut [AccountSummary]) {
    summaries.sort_by(|a, b| b.traffic_used.total_cmp(&a.traffic_used));
}

/// First of the month and `today`, as `YYYY-MM-DD`.
pub fn month_range_dates(today: NaiveDate) -> (String, String) {
    let first = today.with_day(1).unwrap_or(today);
    (
        first.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}
