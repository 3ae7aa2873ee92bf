use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Local, NaiveTime, SecondsFormat, TimeZone, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::config::app_config::ApiSection;
use crate::core::errors::{ApiError, ApiErrorKind, ApiResult, CdnwatchError, Result};
use crate::core::models::connection_check::ConnectionCheck;
use crate::core::models::traffic::{BYTES_PER_GB, MonthlyTraffic, StatisticsSeries};
use crate::core::traits::stats_api::StatsApi;

const IDENTITY_PATH: &str = "/iam/users";
const SERIES_PATH: &str = "/cdn/statistics/series";

/// Build the shared HTTP client. One instance serves every credential;
/// the key travels per request.
pub fn build_http_client(settings: &ApiSection) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(format!("cdnwatch/{}", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = settings.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().map_err(|e| CdnwatchError::InvalidConfig {
        detail: format!("Failed to create HTTP client: {e}"),
    })
}

/// Client for the GCore statistics and identity API, bound to one key.
#[derive(Clone)]
pub struct GcoreClient {
    http: reqwest::Client,
    api_key: String,
    settings: ApiSection,
}

impl GcoreClient {
    pub fn new(http: reqwest::Client, api_key: &str, settings: &ApiSection) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            settings: settings.clone(),
        }
    }

    /// GET `path` and decode the body as JSON.
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<serde_json::Value> {
        let url = format!("{}{path}", self.settings.base_url.trim_end_matches('/'));
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("APIKey {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(%url, error = %e, "request failed");
                ApiError::new(ApiErrorKind::Network, format!("Network error: {e}"))
            })?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(ApiError::new(
                ApiErrorKind::Status,
                format!("API request failed: {status}"),
            ));
        }

        response.json().await.map_err(|e| {
            ApiError::new(ApiErrorKind::Decode, format!("Invalid JSON response: {e}"))
        })
    }

    /// Fetch the traffic series between two already formatted timestamps.
    async fn series(&self, from: &str, to: &str) -> ApiResult<serde_json::Value> {
        let query = [
            ("service", self.settings.service.as_str()),
            ("from", from),
            ("to", to),
            ("granularity", self.settings.granularity.as_str()),
            ("metrics", self.settings.metrics.as_str()),
        ];
        self.get_json(SERIES_PATH, &query).await
    }
}

#[async_trait]
impl StatsApi for GcoreClient {
    async fn test_connection(&self) -> ConnectionCheck {
        match self.get_json(IDENTITY_PATH, &[]).await {
            Ok(data) => ConnectionCheck::Success { data },
            Err(e) => ConnectionCheck::Failure { error: e.message },
        }
    }

    async fn account_info(&self) -> ApiResult<serde_json::Value> {
        self.get_json(IDENTITY_PATH, &[])
            .await
            .map_err(|e| e.context("Failed to fetch account info"))
    }

    async fn monthly_traffic(&self) -> ApiResult<MonthlyTraffic> {
        let now = Local::now();
        let (from, to) = month_to_date(&now);

        let payload = self
            .series(&iso_timestamp(from), &iso_timestamp(to))
            .await
            .map_err(|e| e.context("Failed to fetch monthly traffic"))?;

        monthly_from_payload(payload, self.settings.traffic_limit_gb)
            .map_err(|e| e.context("Failed to fetch monthly traffic"))
    }

    async fn detailed_traffic(&self, from: &str, to: &str) -> ApiResult<serde_json::Value> {
        self.series(from, to)
            .await
            .map_err(|e| e.context("Failed to fetch detailed traffic"))
    }
}

/// Sum a series payload into month-to-date GB.
pub fn monthly_from_payload(
    payload: serde_json::Value,
    limit_gb: f64,
) -> ApiResult<MonthlyTraffic> {
    let series: StatisticsSeries = serde_json::from_value(payload).map_err(|e| {
        ApiError::new(
            ApiErrorKind::Decode,
            format!("Unexpected statistics payload: {e}"),
        )
    })?;

    Ok(MonthlyTraffic {
        limit: limit_gb,
        used: series.total_bytes() / BYTES_PER_GB,
    })
}

/// From local midnight on the first of `now`'s month until `now`, in UTC.
pub fn month_to_date<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = now.date_naive().with_day(1).unwrap_or(now.date_naive());
    let midnight = first.and_time(NaiveTime::MIN);
    let start = now
        .timezone()
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());

    (start, now.with_timezone(&Utc))
}

/// `2026-10-01T00:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
