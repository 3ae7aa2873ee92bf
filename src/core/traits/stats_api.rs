use async_trait::async_trait;

use crate::core::errors::ApiResult;
use crate::core::models::connection_check::ConnectionCheck;
use crate::core::models::traffic::MonthlyTraffic;

/// Port for the remote statistics/identity service, bound to one credential.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Lightweight identity call used to validate a key.
    async fn test_connection(&self) -> ConnectionCheck;

    /// Raw identity/account payload.
    async fn account_info(&self) -> ApiResult<serde_json::Value>;

    /// Traffic from the first of the current month until now.
    async fn monthly_traffic(&self) -> ApiResult<MonthlyTraffic>;

    /// Raw daily series for an explicit range.
    async fn detailed_traffic(&self, from: &str, to: &str) -> ApiResult<serde_json::Value>;
}
