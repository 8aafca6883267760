//! Suitability score
//!
//! A 0-100 integer derived from a nutrient profile and a surgery policy.

use serde::Serialize;

/// Lowest possible score
pub const MIN_SCORE: i32 = 0;
/// Highest possible score
pub const MAX_SCORE: i32 = 100;

/// Suitability score, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

/// Qualitative label for a score range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Score {
    /// Clamp a raw point total into the score range
    pub fn clamped(points: i32) -> Self {
        Self(points.clamp(MIN_SCORE, MAX_SCORE) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn band(&self) -> ScoreBand {
        match self.0 {
            0..=25 => ScoreBand::Poor,
            26..=49 => ScoreBand::Fair,
            50..=74 => ScoreBand::Good,
            _ => ScoreBand::Excellent,
        }
    }
}

impl ScoreBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Poor => "Poor",
            ScoreBand::Fair => "Fair",
            ScoreBand::Good => "Good",
            ScoreBand::Excellent => "Excellent",
        }
    }
}
