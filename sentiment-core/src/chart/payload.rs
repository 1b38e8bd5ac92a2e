use serde::{Deserialize, Serialize};

use crate::sentiment::{sentiment_color, Rgba, Sentiment};

/// Counts arrive from the server; anything negative or non-finite counts as zero.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Overall sentiment counts. Missing fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionInput {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl DistributionInput {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            positive,
            neutral,
            negative,
        }
    }

    /// Counts in `Sentiment::ALL` order.
    pub fn counts(&self) -> [f64; 3] {
        [
            sanitize(self.positive),
            sanitize(self.neutral),
            sanitize(self.negative),
        ]
    }

    pub fn total(&self) -> f64 {
        self.counts().iter().sum()
    }

    pub(crate) fn set_counts(&mut self, values: &[f64]) {
        let get = |i: usize| values.get(i).copied().unwrap_or(0.0);
        self.positive = get(0);
        self.neutral = get(1);
        self.negative = get(2);
    }
}

/// Per-period counts for the trend chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendInput {
    pub labels: Vec<String>,
    pub positive: Vec<f64>,
    pub neutral: Vec<f64>,
    pub negative: Vec<f64>,
}

impl TrendInput {
    /// Values of one series, cut to the number of period labels.
    pub fn series(&self, sentiment: Sentiment) -> Vec<f64> {
        let raw = match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Negative => &self.negative,
        };
        raw.iter()
            .take(self.labels.len())
            .map(|v| sanitize(*v))
            .collect()
    }

    pub fn max_value(&self) -> f64 {
        Sentiment::ALL
            .iter()
            .flat_map(|s| self.series(*s))
            .fold(0.0, f64::max)
    }
}

pub const CONFIDENCE_BUCKETS: [&str; 5] = ["0.0-0.2", "0.2-0.4", "0.4-0.6", "0.6-0.8", "0.8-1.0"];

/// Five confidence-range bucket counts. `null` or a short list pads with zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<f64>>", into = "Vec<f64>")]
pub struct ConfidenceInput {
    buckets: [f64; 5],
}

impl ConfidenceInput {
    pub fn from_values(values: &[f64]) -> Self {
        let mut buckets = [0.0; 5];
        for (slot, v) in buckets.iter_mut().zip(values) {
            *slot = sanitize(*v);
        }
        Self { buckets }
    }

    pub fn buckets(&self) -> [f64; 5] {
        self.buckets
    }
}

impl From<Option<Vec<f64>>> for ConfidenceInput {
    fn from(values: Option<Vec<f64>>) -> Self {
        values.map_or_else(Self::default, |v| Self::from_values(&v))
    }
}

impl From<ConfidenceInput> for Vec<f64> {
    fn from(input: ConfidenceInput) -> Self {
        input.buckets.to_vec()
    }
}

/// Single confidence reading shown as a half ring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeInput {
    pub value: f64,
    pub sentiment: String,
}

impl GaugeInput {
    pub fn new(value: f64, sentiment: impl Into<String>) -> Self {
        Self {
            value,
            sentiment: sentiment.into(),
        }
    }

    /// Value clamped to [0, 1]; NaN reads as 0.
    pub fn value(&self) -> f64 {
        if self.value.is_nan() {
            0.0
        } else {
            self.value.clamp(0.0, 1.0)
        }
    }

    pub fn color(&self) -> Rgba {
        sentiment_color(&self.sentiment)
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", (self.value() * 100.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_missing_fields_default_to_zero() {
        let d: DistributionInput = serde_json::from_str(r#"{"positive": 4}"#).unwrap();
        assert_eq!(d.counts(), [4.0, 0.0, 0.0]);
        let d: DistributionInput =
            serde_json::from_str(r#"{"positive": -2, "neutral": 1, "negative": 3}"#).unwrap();
        assert_eq!(d.total(), 4.0);
    }

    #[test]
    fn trend_series_are_cut_to_label_count() {
        let t: TrendInput = serde_json::from_str(
            r#"{"labels": ["Mon", "Tue"], "positive": [1, 2, 3], "negative": [5]}"#,
        )
        .unwrap();
        assert_eq!(t.series(Sentiment::Positive), vec![1.0, 2.0]);
        assert_eq!(t.series(Sentiment::Negative), vec![5.0]);
        assert!(t.series(Sentiment::Neutral).is_empty());
        assert_eq!(t.max_value(), 5.0);
    }

    #[test]
    fn confidence_pads_truncates_and_defaults() {
        let c: ConfidenceInput = serde_json::from_str("null").unwrap();
        assert_eq!(c.buckets(), [0.0; 5]);
        let c: ConfidenceInput = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(c.buckets(), [1.0, 2.0, 0.0, 0.0, 0.0]);
        let c: ConfidenceInput = serde_json::from_str("[1, 2, 3, 4, 5, 6]").unwrap();
        assert_eq!(c.buckets(), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[1.0,2.0,3.0,4.0,5.0]");
    }

    #[test]
    fn gauge_value_is_clamped_and_rounded() {
        assert_eq!(GaugeInput::new(0.876, "positive").percent_label(), "88%");
        assert_eq!(GaugeInput::new(1.7, "positive").value(), 1.0);
        assert_eq!(GaugeInput::new(f64::NAN, "neutral").percent_label(), "0%");
        assert_eq!(GaugeInput::new(0.5, "???").color(), crate::sentiment::GRAY);
    }
}
