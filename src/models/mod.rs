//! Data models
//!
//! Immutable value types shared by the scoring engine and the tool layer.

mod nutrient_profile;
mod score;
mod surgery;

pub use nutrient_profile::{Micronutrient, NutrientProfile, FIELD_COUNT};
pub use score::{Score, ScoreBand, MAX_SCORE, MIN_SCORE};
pub use surgery::SurgeryType;
