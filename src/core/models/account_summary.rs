use serde::Serialize;

use crate::core::errors::ApiError;
use crate::core::models::credential::CredentialRecord;
use crate::core::models::traffic::{BYTES_PER_GB, MonthlyTraffic, UsageProjection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Error,
}

/// Derived, per-refresh view of one credential's usage state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub status: AccountStatus,
    pub traffic_used: f64,
    pub traffic_limit: f64,
    pub account_info: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl AccountSummary {
    /// Summary for a credential whose calls all succeeded.
    pub fn active(
        record: &CredentialRecord,
        account_info: serde_json::Value,
        traffic: MonthlyTraffic,
    ) -> Self {
        let name = account_email(&account_info).unwrap_or_else(|| record.name.clone());
        Self {
            id: record.id.clone(),
            name,
            status: AccountStatus::Active,
            traffic_used: traffic.used,
            traffic_limit: traffic.limit,
            account_info: Some(account_info),
            error: None,
        }
    }

    /// Summary for a credential with at least one failed call.
    pub fn failed(record: &CredentialRecord, error: &ApiError) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            status: AccountStatus::Error,
            traffic_used: 0.0,
            traffic_limit: 0.0,
            account_info: None,
            error: Some(error.to_string()),
        }
    }

    pub fn used_bytes(&self) -> f64 {
        self.traffic_used * BYTES_PER_GB
    }

    pub fn limit_bytes(&self) -> f64 {
        self.traffic_limit * BYTES_PER_GB
    }
}

/// The identity endpoint lists users under `account`; the first one's
/// email names the account better than the label the user typed.
pub fn account_email(account_info: &serde_json::Value) -> Option<String> {
    account_info
        .get("account")?
        .get(0)?
        .get("email")?
        .as_str()
        .filter(|email| !email.is_empty())
        .map(str::to_string)
}

/// Counters shown above the account list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub total_accounts: usize,
    pub active: usize,
    pub errors: usize,
    pub traffic_used: f64,
    pub traffic_limit: f64,
}

impl DashboardTotals {
    pub fn from_summaries(summaries: &[AccountSummary]) -> Self {
        summaries.iter().fold(
            Self {
                total_accounts: summaries.len(),
                ..Self::default()
            },
            |mut acc, s| {
                match s.status {
                    AccountStatus::Active => acc.active += 1,
                    AccountStatus::Error => acc.errors += 1,
                }
                acc.traffic_used += s.traffic_used;
                acc.traffic_limit += s.traffic_limit;
                acc
            },
        )
    }
}

/// Everything the account detail view shows for one credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub account_info: serde_json::Value,
    pub monthly_traffic: MonthlyTraffic,
    pub detailed_traffic: Option<serde_json::Value>,
    pub projection: UsageProjection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ApiErrorKind;
    use serde_json::json;

    fn record() -> CredentialRecord {
        CredentialRecord::new("Staging", "k", chrono::Utc::now())
    }

    #[test]
    fn active_summary_prefers_account_email() {
        let info = json!({"account": [{"email": "ops@example.com"}]});
        let traffic = MonthlyTraffic { limit: 1000.0, used: 12.5 };
        let s = AccountSummary::active(&record(), info, traffic);
        assert_eq!(s.name, "ops@example.com");
        assert_eq!(s.status, AccountStatus::Active);
        assert_eq!(s.traffic_used, 12.5);
        assert!(s.error.is_none());
    }

    #[test]
    fn active_summary_falls_back_to_record_name() {
        let traffic = MonthlyTraffic { limit: 1.0, used: 0.0 };
        let s = AccountSummary::active(&record(), json!({}), traffic);
        assert_eq!(s.name, "Staging");
    }

    #[test]
    fn failed_summary_zeroes_traffic() {
        let err = ApiError::new(ApiErrorKind::Network, "connection refused");
        let s = AccountSummary::failed(&record(), &err);
        assert_eq!(s.status, AccountStatus::Error);
        assert_eq!(s.traffic_used, 0.0);
        assert_eq!(s.traffic_limit, 0.0);
        assert!(s.account_info.is_none());
        assert_eq!(s.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn totals_count_statuses_and_sum_traffic() {
        let traffic = MonthlyTraffic { limit: 1000.0, used: 5.0 };
        let ok = AccountSummary::active(&record(), json!({}), traffic);
        let bad = AccountSummary::failed(&record(), &ApiError::new(ApiErrorKind::Status, "401"));
        let totals = DashboardTotals::from_summaries(&[ok.clone(), ok, bad]);

        assert_eq!(totals.total_accounts, 3);
        assert_eq!(totals.active, 2);
        assert_eq!(totals.errors, 1);
        assert_eq!(totals.traffic_used, 10.0);
        assert_eq!(totals.traffic_limit, 2000.0);
    }
}
