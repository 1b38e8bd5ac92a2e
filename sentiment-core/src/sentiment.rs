use std::fmt;

use serde::{Deserialize, Serialize};

/// CSS `rgba()` colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const GREEN: Rgba = Rgba::new(16, 185, 129, 1.0);
pub const GRAY: Rgba = Rgba::new(107, 114, 128, 1.0);
pub const RED: Rgba = Rgba::new(239, 68, 68, 1.0);
pub const AMBER: Rgba = Rgba::new(245, 158, 11, 1.0);
pub const BLUE: Rgba = Rgba::new(59, 130, 246, 1.0);
pub const LIME: Rgba = Rgba::new(34, 197, 94, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display order used by every chart.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Exact lowercase label as the analyser emits it.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn color(self) -> Rgba {
        match self {
            Sentiment::Positive => GREEN,
            Sentiment::Negative => RED,
            Sentiment::Neutral => GRAY,
        }
    }
}

/// Colour for a free-form sentiment label; anything unrecognised is gray.
pub fn sentiment_color(label: &str) -> Rgba {
    Sentiment::from_label(label).map_or(GRAY, Sentiment::color)
}
