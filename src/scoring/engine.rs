//! Scoring engine
//!
//! Pure `(NutrientProfile, SurgeryPolicy) -> Score` computation.

use crate::models::{NutrientProfile, Score, SurgeryType};

use super::policy::{policy_for, SurgeryPolicy, BASELINE_SCORE};

/// Score a profile for a free-form surgery type string.
///
/// Unrecognized or missing surgery types use the general policy.
pub fn score(profile: &NutrientProfile, surgery_type: Option<&str>) -> Score {
    score_for(profile, SurgeryType::resolve(surgery_type))
}

/// Score a profile for an already-resolved surgery variant
pub fn score_for(profile: &NutrientProfile, surgery: SurgeryType) -> Score {
    let policy = policy_for(surgery);
    let score = score_with_policy(profile, policy);
    tracing::debug!(surgery = surgery.as_str(), score = score.value(), "Scored profile");
    score
}

/// Apply every adjustment in a policy to the baseline and clamp
pub fn score_with_policy(profile: &NutrientProfile, policy: &SurgeryPolicy) -> Score {
    Score::clamped(BASELINE_SCORE + adjustment_total(profile, policy))
}

/// Sum of all point deltas a policy assigns to a profile, before clamping
pub fn adjustment_total(profile: &NutrientProfile, policy: &SurgeryPolicy) -> i32 {
    let mut points = policy.sugar.points_at_most(profile.sugar);
    points += policy.fat.points_at_most(profile.fat);

    match profile.protein {
        Some(protein) => points += policy.protein.points_at_least(protein),
        None if policy.protein_critical => points += policy.missing_protein_points,
        None => {}
    }

    points += policy
        .micronutrients
        .iter()
        .filter(|bonus| {
            bonus
                .nutrient
                .value_in(profile)
                .is_some_and(|value| value >= bonus.threshold)
        })
        .map(|bonus| bonus.points)
        .sum::<i32>();

    if let Some(general) = &policy.general {
        if profile.fiber.is_some_and(|fiber| fiber >= general.fiber_min) {
            points += general.fiber_points;
        }
        if profile
            .saturated_fat
            .is_some_and(|sat| sat > general.saturated_fat_max)
        {
            points += general.saturated_fat_points;
        }
        if profile.sodium < general.sodium_low_below {
            points += general.sodium_low_points;
        } else if profile.sodium > general.sodium_high_above {
            points += general.sodium_high_points;
        }
    }

    points
}

/// Score many profiles; results keep input order
pub fn score_many(items: &[(NutrientProfile, Option<String>)]) -> Vec<Score> {
    items
        .iter()
        .map(|(profile, surgery_type)| score(profile, surgery_type.as_deref()))
        .collect()
}
