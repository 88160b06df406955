//! Food popularity trends.
//!
//! The trends endpoint answers `{"status": "success", "data": [...]}` or
//! `{"status": "error", "message": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Engagement numbers for one dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTrend {
    pub dish_name: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub popularity_score: f64,
}

/// A trend with its rank and bar width relative to the most popular dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTrend {
    /// 1-based rank
    pub rank: usize,
    pub trend: FoodTrend,
    /// Share of the top score, in `0.0..=100.0`
    pub relative_percent: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendsError {
    #[error("Could not reach the trends service: {message}")]
    Network { message: String },

    #[error("Trends service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Trends service sent an unreadable response: {message}")]
    Malformed { message: String },

    #[error("Failed to load trends data: {message}")]
    Remote { message: String },
}

/// The trends collaborator.
#[async_trait]
pub trait TrendsService: Send + Sync {
    async fn fetch_trends(&self) -> Result<Vec<FoodTrend>, TrendsError>;
}

#[derive(Deserialize)]
struct TrendsEnvelope {
    status: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Normalizes a trends response status and body.
pub fn normalize_trends_response(status: u16, body: &str) -> Result<Vec<FoodTrend>, TrendsError> {
    if !(200..300).contains(&status) {
        return Err(TrendsError::Status { status });
    }

    let envelope: TrendsEnvelope = serde_json::from_str(body).map_err(|err| {
        TrendsError::Malformed {
            message: err.to_string(),
        }
    })?;

    if envelope.status != "success" {
        return Err(TrendsError::Remote {
            message: envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("status '{}'", envelope.status)),
        });
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(data) => serde_json::from_value(data).map_err(|err| TrendsError::Malformed {
            message: err.to_string(),
        }),
    }
}

/// Sorts by popularity (highest first) and computes relative bar widths.
pub fn rank_trends(mut trends: Vec<FoodTrend>) -> Vec<RankedTrend> {
    trends.sort_by(|a, b| b.popularity_score.total_cmp(&a.popularity_score));

    let top = trends
        .first()
        .map(|t| t.popularity_score)
        .filter(|score| *score > 0.0);

    trends
        .into_iter()
        .enumerate()
        .map(|(i, trend)| {
            let relative_percent = match top {
                Some(top) => (trend.popularity_score / top * 100.0).clamp(0.0, 100.0),
                None => 0.0,
            };
            RankedTrend {
                rank: i + 1,
                trend,
                relative_percent,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(name: &str, score: f64) -> FoodTrend {
        FoodTrend {
            dish_name: name.to_string(),
            views: 0,
            likes: 0,
            comments_count: 0,
            popularity_score: score,
        }
    }

    #[test]
    fn test_success_envelope() {
        let body = r#"{"status": "success", "data": [
            {"dish_name": "Misal Pav", "views": 1200, "likes": 300, "comments_count": 40, "popularity_score": 87.5}
        ]}"#;
        let trends = normalize_trends_response(200, body).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].dish_name, "Misal Pav");
        assert_eq!(trends[0].views, 1200);
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"status": "error", "message": "No such file: trends.csv"}"#;
        let err = normalize_trends_response(200, body).unwrap_err();
        assert_eq!(
            err,
            TrendsError::Remote {
                message: "No such file: trends.csv".to_string()
            }
        );
    }

    #[test]
    fn test_http_failure() {
        let err = normalize_trends_response(500, "").unwrap_err();
        assert_eq!(err, TrendsError::Status { status: 500 });
    }

    #[test]
    fn test_missing_data_is_empty() {
        assert!(normalize_trends_response(200, r#"{"status": "success"}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            normalize_trends_response(200, "not json"),
            Err(TrendsError::Malformed { .. })
        ));
    }

    #[test]
    fn test_rank_sorts_and_scales() {
        let ranked = rank_trends(vec![trend("Poha", 40.0), trend("Vada Pav", 80.0)]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].trend.dish_name, "Vada Pav");
        assert_eq!(ranked[0].relative_percent, 100.0);
        assert_eq!(ranked[1].relative_percent, 50.0);
    }

    #[test]
    fn test_rank_with_zero_scores() {
        let ranked = rank_trends(vec![trend("Poha", 0.0)]);
        assert_eq!(ranked[0].relative_percent, 0.0);
    }
}
