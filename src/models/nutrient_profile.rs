//! Nutrient profile
//!
//! The uniform per-100g or per-serving nutrient record consumed by scoring,
//! explanation, and aggregation.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Nutritional information for one food item, meal, or recipe total.
///
/// The four core fields are mandatory. Every other field is optional, and
/// `None` means "not reported", which scoring treats differently from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub fat: f64,    // grams
    pub sugar: f64,  // grams
    pub sodium: f64, // milligrams

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monounsaturated_fat: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>, // milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>, // grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>, // milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>, // milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>, // milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b12: Option<f64>, // micrograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_d: Option<f64>, // micrograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>, // micrograms RAE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_e: Option<f64>, // milligrams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_k: Option<f64>, // micrograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folate: Option<f64>, // micrograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cobalt: Option<f64>, // micrograms
}

/// Number of fields reported by [`NutrientProfile::fields`]
pub const FIELD_COUNT: usize = 21;

/// Micronutrients that can earn a policy bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Micronutrient {
    Calcium,
    Iron,
    VitaminB12,
    Folate,
    VitaminA,
    VitaminD,
    VitaminE,
    VitaminK,
}

impl Micronutrient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Micronutrient::Calcium => "calcium",
            Micronutrient::Iron => "iron",
            Micronutrient::VitaminB12 => "vitamin_b12",
            Micronutrient::Folate => "folate",
            Micronutrient::VitaminA => "vitamin_a",
            Micronutrient::VitaminD => "vitamin_d",
            Micronutrient::VitaminE => "vitamin_e",
            Micronutrient::VitaminK => "vitamin_k",
        }
    }

    /// Read this micronutrient from a profile
    pub fn value_in(&self, profile: &NutrientProfile) -> Option<f64> {
        match self {
            Micronutrient::Calcium => profile.calcium,
            Micronutrient::Iron => profile.iron,
            Micronutrient::VitaminB12 => profile.vitamin_b12,
            Micronutrient::Folate => profile.folate,
            Micronutrient::VitaminA => profile.vitamin_a,
            Micronutrient::VitaminD => profile.vitamin_d,
            Micronutrient::VitaminE => profile.vitamin_e,
            Micronutrient::VitaminK => profile.vitamin_k,
        }
    }
}

impl NutrientProfile {
    /// Create a profile from the four mandatory fields; optional fields start unreported
    pub fn new(calories: f64, fat: f64, sugar: f64, sodium: f64) -> Self {
        Self {
            calories,
            fat,
            sugar,
            sodium,
            ..Self::default()
        }
    }

    /// Every field reported as zero
    pub fn zeroed() -> Self {
        let zero = Some(0.0);
        Self {
            protein: zero,
            fiber: zero,
            saturated_fat: zero,
            monounsaturated_fat: zero,
            trans_fat: zero,
            potassium: zero,
            carbohydrates: zero,
            iron: zero,
            cholesterol: zero,
            calcium: zero,
            vitamin_b12: zero,
            vitamin_d: zero,
            vitamin_a: zero,
            vitamin_e: zero,
            vitamin_k: zero,
            folate: zero,
            cobalt: zero,
            ..Self::default()
        }
    }

    /// Every field by name, with required fields wrapped in `Some`
    pub fn fields(&self) -> [(&'static str, Option<f64>); FIELD_COUNT] {
        [
            ("calories", Some(self.calories)),
            ("fat", Some(self.fat)),
            ("sugar", Some(self.sugar)),
            ("sodium", Some(self.sodium)),
            ("protein", self.protein),
            ("fiber", self.fiber),
            ("saturated_fat", self.saturated_fat),
            ("monounsaturated_fat", self.monounsaturated_fat),
            ("trans_fat", self.trans_fat),
            ("potassium", self.potassium),
            ("carbohydrates", self.carbohydrates),
            ("iron", self.iron),
            ("cholesterol", self.cholesterol),
            ("calcium", self.calcium),
            ("vitamin_b12", self.vitamin_b12),
            ("vitamin_d", self.vitamin_d),
            ("vitamin_a", self.vitamin_a),
            ("vitamin_e", self.vitamin_e),
            ("vitamin_k", self.vitamin_k),
            ("folate", self.folate),
            ("cobalt", self.cobalt),
        ]
    }

    /// Check that every reported value is finite and non-negative
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in self.fields() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(EngineError::InvalidNutrient { field, value });
                }
            }
        }
        Ok(())
    }

    /// Field-wise sum.
    ///
    /// An optional field missing on one side counts as zero; the result is
    /// only `None` when neither side reports it.
    pub fn add(&self, other: &NutrientProfile) -> Self {
        Self {
            calories: self.calories + other.calories,
            fat: self.fat + other.fat,
            sugar: self.sugar + other.sugar,
            sodium: self.sodium + other.sodium,
            protein: sum_reported(self.protein, other.protein),
            fiber: sum_reported(self.fiber, other.fiber),
            saturated_fat: sum_reported(self.saturated_fat, other.saturated_fat),
            monounsaturated_fat: sum_reported(self.monounsaturated_fat, other.monounsaturated_fat),
            trans_fat: sum_reported(self.trans_fat, other.trans_fat),
            potassium: sum_reported(self.potassium, other.potassium),
            carbohydrates: sum_reported(self.carbohydrates, other.carbohydrates),
            iron: sum_reported(self.iron, other.iron),
            cholesterol: sum_reported(self.cholesterol, other.cholesterol),
            calcium: sum_reported(self.calcium, other.calcium),
            vitamin_b12: sum_reported(self.vitamin_b12, other.vitamin_b12),
            vitamin_d: sum_reported(self.vitamin_d, other.vitamin_d),
            vitamin_a: sum_reported(self.vitamin_a, other.vitamin_a),
            vitamin_e: sum_reported(self.vitamin_e, other.vitamin_e),
            vitamin_k: sum_reported(self.vitamin_k, other.vitamin_k),
            folate: sum_reported(self.folate, other.folate),
            cobalt: sum_reported(self.cobalt, other.cobalt),
        }
    }

    /// Divide every reported value by `divisor`
    pub fn divide(&self, divisor: f64) -> Self {
        let div = |v: Option<f64>| v.map(|v| v / divisor);
        Self {
            calories: self.calories / divisor,
            fat: self.fat / divisor,
            sugar: self.sugar / divisor,
            sodium: self.sodium / divisor,
            protein: div(self.protein),
            fiber: div(self.fiber),
            saturated_fat: div(self.saturated_fat),
            monounsaturated_fat: div(self.monounsaturated_fat),
            trans_fat: div(self.trans_fat),
            potassium: div(self.potassium),
            carbohydrates: div(self.carbohydrates),
            iron: div(self.iron),
            cholesterol: div(self.cholesterol),
            calcium: div(self.calcium),
            vitamin_b12: div(self.vitamin_b12),
            vitamin_d: div(self.vitamin_d),
            vitamin_a: div(self.vitamin_a),
            vitamin_e: div(self.vitamin_e),
            vitamin_k: div(self.vitamin_k),
            folate: div(self.folate),
            cobalt: div(self.cobalt),
        }
    }
}

fn sum_reported(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}
