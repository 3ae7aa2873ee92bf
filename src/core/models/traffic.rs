use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bytes per decimal gigabyte, the unit all traffic figures are kept in.
pub const BYTES_PER_GB: f64 = 1e9;

/// Month-to-date traffic for one account, in GB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTraffic {
    pub limit: f64,
    pub used: f64,
}

/// Shape of the statistics series endpoint we rely on.
///
/// Only `metrics.total_bytes` is read; each point is `[timestamp, value, ..]`.
#[derive(Debug, Deserialize)]
pub struct StatisticsSeries {
    pub metrics: SeriesMetrics,
}

#[derive(Debug, Deserialize)]
pub struct SeriesMetrics {
    pub total_bytes: Vec<serde_json::Value>,
}

impl StatisticsSeries {
    /// Sum of the value column. Missing or non-numeric values count as zero.
    pub fn total_bytes(&self) -> f64 {
        self.metrics
            .total_bytes
            .iter()
            .map(|point| {
                point
                    .get(1)
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(0.0)
            })
            .sum()
    }
}

/// Extrapolations shown on the account detail view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageProjection {
    /// GB per elapsed day of the month.
    pub daily_average: f64,
    /// Daily average scaled to a 30-day month.
    pub projected_monthly: f64,
    pub days_remaining: u32,
    /// Percentage of the limit still unused. `None` when used or limit is zero.
    pub remaining_quota: Option<u8>,
}

impl UsageProjection {
    pub fn compute(used: f64, limit: f64, today: NaiveDate) -> Self {
        let day = today.day();
        let daily_average = used / f64::from(day.max(1));
        let remaining_quota = if used > 0.0 && limit > 0.0 {
            let pct = ((1.0 - used / limit) * 100.0).round();
            Some(pct.clamp(0.0, 100.0) as u8)
        } else {
            None
        };

        Self {
            daily_average,
            projected_monthly: daily_average * 30.0,
            days_remaining: days_in_month(today).saturating_sub(day),
            remaining_quota,
        }
    }
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// One day of a raw detailed-traffic series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: String,
    pub bytes: f64,
}

/// Extract `metrics.total_bytes` points from a raw series payload.
///
/// Timestamps may be unix seconds or preformatted strings. Points that do
/// not look like `[timestamp, number]` are skipped.
pub fn daily_points(raw: &serde_json::Value) -> Vec<DailyPoint> {
    let Some(points) = raw
        .pointer("/metrics/total_bytes")
        .and_then(serde_json::Value::as_array)
    else {
        return Vec::new();
    };

    points
        .iter()
        .filter_map(|point| {
            let bytes = point.get(1)?.as_f64()?;
            let day = match point.get(0)? {
                serde_json::Value::Number(n) => chrono::DateTime::from_timestamp(n.as_i64()?, 0)?
                    .format("%Y-%m-%d")
                    .to_string(),
                serde_json::Value::String(s) => s.clone(),
                _ => return None,
            };
            Some(DailyPoint { day, bytes })
        })
        .collect()
}

/// The busiest day of a series, if any.
pub fn peak_day(points: &[DailyPoint]) -> Option<&DailyPoint> {
    points.iter().max_by(|a, b| a.bytes.total_cmp(&b.bytes))
}
