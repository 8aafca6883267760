//! Surgery policy registry
//!
//! One immutable policy per surgery variant holding the tier boundaries and
//! point deltas used by the scoring engine. Adding a variant means adding a
//! table here, not new scoring code.

use serde::Serialize;

use crate::models::{Micronutrient, SurgeryType};

/// Neutral starting point before any adjustment
pub const BASELINE_SCORE: i32 = 50;

// ============================================================================
// Tier Boundaries
// ============================================================================

/// Sugar grams at or below which sugar is "very low"
pub const SUGAR_VERY_LOW_MAX: f64 = 5.0;
/// Sugar grams at or below which sugar is "low"
pub const SUGAR_LOW_MAX: f64 = 10.0;
/// Sugar grams at or below which sugar is "moderate"; above is "high"
pub const SUGAR_MODERATE_MAX: f64 = 15.0;

/// Fat grams at or below which fat is "low"
pub const FAT_LOW_MAX: f64 = 10.0;
/// Fat grams at or below which fat is "moderate"
pub const FAT_MODERATE_MAX: f64 = 15.0;
/// Fat grams at or below which fat is tolerated; above is penalized
pub const FAT_HIGH_MAX: f64 = 20.0;

/// Calcium (mg) per serving earning a bonus
pub const CALCIUM_MIN_MG: f64 = 200.0;
/// Vitamin B12 (ug) per serving earning a bonus
pub const B12_MIN_UG: f64 = 2.4;
/// Folate (ug) per serving earning a bonus
pub const FOLATE_MIN_UG: f64 = 200.0;

// ============================================================================
// Policy Types
// ============================================================================

/// One tier: a boundary and the points awarded when the value falls in it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub limit: f64,
    pub points: i32,
}

/// Ordered tiers plus the points for values outside every tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierTable {
    pub bands: &'static [Band],
    pub otherwise: i32,
}

impl TierTable {
    /// Points for the first band whose limit is >= value (ascending limits)
    pub fn points_at_most(&self, value: f64) -> i32 {
        self.bands
            .iter()
            .find(|band| value <= band.limit)
            .map_or(self.otherwise, |band| band.points)
    }

    /// Points for the first band whose limit is <= value (descending limits)
    pub fn points_at_least(&self, value: f64) -> i32 {
        self.bands
            .iter()
            .find(|band| value >= band.limit)
            .map_or(self.otherwise, |band| band.points)
    }

    /// Lowest qualifying limit of a descending table, i.e. the value below
    /// which the `otherwise` points apply
    pub fn floor_limit(&self) -> Option<f64> {
        self.bands.last().map(|band| band.limit)
    }

    /// Highest limit of a descending table (the top reward tier)
    pub fn top_limit(&self) -> Option<f64> {
        self.bands.first().map(|band| band.limit)
    }
}

/// Flat bonus for meeting a micronutrient threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MicronutrientBonus {
    pub nutrient: Micronutrient,
    pub threshold: f64,
    pub points: i32,
}

/// Heart-health adjustments applied only by the general policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeneralAdjustments {
    pub fiber_min: f64,
    pub fiber_points: i32,
    pub saturated_fat_max: f64,
    pub saturated_fat_points: i32,
    pub sodium_low_below: f64,
    pub sodium_low_points: i32,
    pub sodium_high_above: f64,
    pub sodium_high_points: i32,
}

/// Scoring policy for one surgery variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurgeryPolicy {
    pub surgery: SurgeryType,
    pub display_name: &'static str,
    /// Ascending, evaluated with [`TierTable::points_at_most`]
    pub sugar: TierTable,
    /// Ascending, evaluated with [`TierTable::points_at_most`]
    pub fat: TierTable,
    /// Descending, evaluated with [`TierTable::points_at_least`]
    pub protein: TierTable,
    pub micronutrients: &'static [MicronutrientBonus],
    pub general: Option<GeneralAdjustments>,
    /// When set, a profile without protein data is penalized
    pub protein_critical: bool,
    pub missing_protein_points: i32,
    /// Sugar grams above which dumping syndrome becomes a concern
    pub dumping_sugar_limit: Option<f64>,
    /// Recommended daily protein intake in grams (low, high)
    pub daily_protein_grams: (u32, u32),
    pub guidance: &'static str,
}

// ============================================================================
// Policy Tables
// ============================================================================

pub static GASTRIC_BYPASS: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::GastricBypass,
    display_name: "Gastric Bypass (Roux-en-Y)",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 20 },
            Band { limit: SUGAR_LOW_MAX, points: 10 },
            Band { limit: SUGAR_MODERATE_MAX, points: -15 },
        ],
        otherwise: -30,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 5 },
            Band { limit: FAT_HIGH_MAX, points: 0 },
        ],
        otherwise: -20,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 25.0, points: 15 },
            Band { limit: 20.0, points: 10 },
            Band { limit: 15.0, points: 5 },
            Band { limit: 10.0, points: 0 },
        ],
        otherwise: -10,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminB12, threshold: B12_MIN_UG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 5.0, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Folate, threshold: FOLATE_MIN_UG, points: 3 },
    ],
    general: None,
    protein_critical: false,
    missing_protein_points: 0,
    dumping_sugar_limit: Some(10.0),
    daily_protein_grams: (60, 80),
    guidance: "Eat protein first, keep sugar low to avoid dumping syndrome, and take calcium, iron and B12 supplements as prescribed.",
};

pub static SLEEVE: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::Sleeve,
    display_name: "Sleeve Gastrectomy",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 20 },
            Band { limit: SUGAR_LOW_MAX, points: 10 },
            Band { limit: SUGAR_MODERATE_MAX, points: -15 },
        ],
        otherwise: -25,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 5 },
            Band { limit: FAT_HIGH_MAX, points: 0 },
        ],
        otherwise: -15,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 25.0, points: 15 },
            Band { limit: 20.0, points: 10 },
            Band { limit: 15.0, points: 5 },
            Band { limit: 10.0, points: 0 },
        ],
        otherwise: -10,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::VitaminB12, threshold: B12_MIN_UG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 3.0, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 3 },
    ],
    general: None,
    protein_critical: false,
    missing_protein_points: 0,
    dumping_sugar_limit: Some(15.0),
    daily_protein_grams: (60, 80),
    guidance: "Small, protein-forward portions work best with a reduced stomach; sip fluids between meals rather than with them.",
};

pub static GASTRIC_BAND: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::GastricBand,
    display_name: "Adjustable Gastric Band",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 15 },
            Band { limit: SUGAR_LOW_MAX, points: 5 },
            Band { limit: SUGAR_MODERATE_MAX, points: -10 },
        ],
        otherwise: -15,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 5 },
            Band { limit: FAT_HIGH_MAX, points: 0 },
        ],
        otherwise: -10,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 20.0, points: 15 },
            Band { limit: 15.0, points: 5 },
            Band { limit: 10.0, points: 0 },
        ],
        otherwise: -10,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 3.0, points: 2 },
    ],
    general: None,
    protein_critical: false,
    missing_protein_points: 0,
    dumping_sugar_limit: None,
    daily_protein_grams: (60, 80),
    guidance: "Chew thoroughly and favor moist, tender textures; calorie-dense liquids and soft sweets slip past the band easily.",
};

pub static BPD_DS: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::BpdDs,
    display_name: "Biliopancreatic Diversion with Duodenal Switch",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 15 },
            Band { limit: SUGAR_LOW_MAX, points: 10 },
            Band { limit: SUGAR_MODERATE_MAX, points: -10 },
        ],
        otherwise: -20,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 0 },
            Band { limit: FAT_HIGH_MAX, points: -5 },
        ],
        otherwise: -25,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 30.0, points: 20 },
            Band { limit: 25.0, points: 10 },
            Band { limit: 20.0, points: 5 },
            Band { limit: 15.0, points: 0 },
        ],
        otherwise: -15,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 5.0, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminB12, threshold: B12_MIN_UG, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminA, threshold: 300.0, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminD, threshold: 5.0, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminE, threshold: 3.0, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminK, threshold: 30.0, points: 3 },
    ],
    general: None,
    protein_critical: true,
    missing_protein_points: -15,
    dumping_sugar_limit: None,
    daily_protein_grams: (80, 120),
    guidance: "Protein is the priority at every meal, and fat absorption is limited, so keep fat low and never skip the fat-soluble vitamins A, D, E and K.",
};

pub static MINI_BYPASS: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::MiniBypass,
    display_name: "Mini Gastric Bypass (One Anastomosis)",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 20 },
            Band { limit: SUGAR_LOW_MAX, points: 10 },
            Band { limit: SUGAR_MODERATE_MAX, points: -15 },
        ],
        otherwise: -30,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 5 },
            Band { limit: FAT_HIGH_MAX, points: 0 },
        ],
        otherwise: -20,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 25.0, points: 15 },
            Band { limit: 20.0, points: 10 },
            Band { limit: 15.0, points: 5 },
            Band { limit: 10.0, points: 0 },
        ],
        otherwise: -10,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::VitaminB12, threshold: B12_MIN_UG, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 5.0, points: 5 },
        MicronutrientBonus { nutrient: Micronutrient::Folate, threshold: FOLATE_MIN_UG, points: 3 },
    ],
    general: None,
    protein_critical: false,
    missing_protein_points: 0,
    dumping_sugar_limit: Some(10.0),
    daily_protein_grams: (60, 80),
    guidance: "Bile reflux and dumping are both risks: keep sugar and fat low, eat slowly, and stay on your iron and B12 supplements.",
};

pub static UNSPECIFIED: SurgeryPolicy = SurgeryPolicy {
    surgery: SurgeryType::Unspecified,
    display_name: "General Bariatric",
    sugar: TierTable {
        bands: &[
            Band { limit: SUGAR_VERY_LOW_MAX, points: 15 },
            Band { limit: SUGAR_LOW_MAX, points: 5 },
            Band { limit: SUGAR_MODERATE_MAX, points: -10 },
        ],
        otherwise: -20,
    },
    fat: TierTable {
        bands: &[
            Band { limit: FAT_LOW_MAX, points: 10 },
            Band { limit: FAT_MODERATE_MAX, points: 5 },
            Band { limit: FAT_HIGH_MAX, points: 0 },
        ],
        otherwise: -10,
    },
    protein: TierTable {
        bands: &[
            Band { limit: 20.0, points: 10 },
            Band { limit: 10.0, points: 5 },
        ],
        otherwise: -5,
    },
    micronutrients: &[
        MicronutrientBonus { nutrient: Micronutrient::Calcium, threshold: CALCIUM_MIN_MG, points: 3 },
        MicronutrientBonus { nutrient: Micronutrient::Iron, threshold: 3.0, points: 3 },
    ],
    general: Some(GeneralAdjustments {
        fiber_min: 5.0,
        fiber_points: 5,
        saturated_fat_max: 5.0,
        saturated_fat_points: -5,
        sodium_low_below: 300.0,
        sodium_low_points: 5,
        sodium_high_above: 600.0,
        sodium_high_points: -10,
    }),
    protein_critical: false,
    missing_protein_points: 0,
    dumping_sugar_limit: None,
    daily_protein_grams: (60, 80),
    guidance: "Build meals around lean protein, keep added sugar and fat low, and eat slowly in small portions.",
};

/// Every registered policy, in [`SurgeryType::ALL`] order
pub static POLICIES: [&SurgeryPolicy; 6] = [
    &GASTRIC_BYPASS,
    &SLEEVE,
    &GASTRIC_BAND,
    &BPD_DS,
    &MINI_BYPASS,
    &UNSPECIFIED,
];

/// Look up the policy for a surgery variant
pub fn policy_for(surgery: SurgeryType) -> &'static SurgeryPolicy {
    match surgery {
        SurgeryType::GastricBypass => &GASTRIC_BYPASS,
        SurgeryType::Sleeve => &SLEEVE,
        SurgeryType::GastricBand => &GASTRIC_BAND,
        SurgeryType::BpdDs => &BPD_DS,
        SurgeryType::MiniBypass => &MINI_BYPASS,
        SurgeryType::Unspecified => &UNSPECIFIED,
    }
}
