//! Explanation generator
//!
//! Produces human-readable justifications for a profile. The bands here are
//! kept separate from the scoring tiers in `policy.rs`: sugar is banded at
//! 5/10/20 here against 5/10/15 for scoring, and both sets are observable.

use serde::Serialize;

use crate::models::{NutrientProfile, SurgeryType};

use super::format_amount;
use super::policy::policy_for;

// ============================================================================
// Explanation Bands
// ============================================================================

pub const SUGAR_VERY_LOW_MAX: f64 = 5.0;
pub const SUGAR_MODERATE_MAX: f64 = 10.0;
pub const SUGAR_HIGH_MAX: f64 = 20.0;

pub const PROTEIN_EXCELLENT_MIN: f64 = 25.0;
pub const PROTEIN_GOOD_MIN: f64 = 15.0;
pub const PROTEIN_LOW_BELOW: f64 = 10.0;

pub const FAT_LOW_MAX: f64 = 10.0;
pub const FAT_HIGH_ABOVE: f64 = 20.0;

pub const SODIUM_LOW_BELOW: f64 = 300.0;
pub const SODIUM_HIGH_ABOVE: f64 = 500.0;

pub const CALORIES_LOW_MAX: f64 = 150.0;
pub const CALORIES_HIGH_ABOVE: f64 = 400.0;

/// What a justification is about. Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplanationTag {
    Sugar,
    Protein,
    Fat,
    Sodium,
    Calories,
    Surgery,
}

/// One ranked justification line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Justification {
    pub tag: ExplanationTag,
    pub text: String,
    pub positive: bool,
}

impl Justification {
    fn positive(tag: ExplanationTag, text: String) -> Self {
        Self { tag, text, positive: true }
    }

    fn negative(tag: ExplanationTag, text: String) -> Self {
        Self { tag, text, positive: false }
    }
}

/// Explain a profile for a free-form surgery type string.
///
/// Entries always come out in the order sugar, protein, fat, sodium,
/// calories, surgery note. Any of them except sugar may be absent.
pub fn explain(profile: &NutrientProfile, surgery_type: Option<&str>) -> Vec<Justification> {
    explain_for(profile, SurgeryType::resolve(surgery_type))
}

pub fn explain_for(profile: &NutrientProfile, surgery: SurgeryType) -> Vec<Justification> {
    let mut out = Vec::with_capacity(6);

    out.push(sugar_entry(profile.sugar));

    if let Some(protein) = profile.protein {
        let amount = format_amount(protein);
        if protein >= PROTEIN_EXCELLENT_MIN {
            out.push(Justification::positive(
                ExplanationTag::Protein,
                format!("Excellent protein ({}g) supports healing and preserves muscle", amount),
            ));
        } else if protein >= PROTEIN_GOOD_MIN {
            out.push(Justification::positive(
                ExplanationTag::Protein,
                format!("Good protein content ({}g) helps meet daily targets", amount),
            ));
        } else if protein < PROTEIN_LOW_BELOW {
            out.push(Justification::negative(
                ExplanationTag::Protein,
                format!("Low protein ({}g); pair with a protein source", amount),
            ));
        }
    }

    let fat = format_amount(profile.fat);
    if profile.fat <= FAT_LOW_MAX {
        out.push(Justification::positive(
            ExplanationTag::Fat,
            format!("Low fat ({}g), easy to tolerate", fat),
        ));
    } else if profile.fat > FAT_HIGH_ABOVE {
        out.push(Justification::negative(
            ExplanationTag::Fat,
            format!("High fat ({}g) may cause discomfort or poor absorption", fat),
        ));
    }

    let sodium = format_amount(profile.sodium);
    if profile.sodium < SODIUM_LOW_BELOW {
        out.push(Justification::positive(
            ExplanationTag::Sodium,
            format!("Low sodium ({}mg)", sodium),
        ));
    } else if profile.sodium > SODIUM_HIGH_ABOVE {
        out.push(Justification::negative(
            ExplanationTag::Sodium,
            format!("High sodium ({}mg) can promote fluid retention", sodium),
        ));
    }

    let calories = format_amount(profile.calories);
    if profile.calories <= CALORIES_LOW_MAX {
        out.push(Justification::positive(
            ExplanationTag::Calories,
            format!("Light on calories ({} kcal)", calories),
        ));
    } else if profile.calories > CALORIES_HIGH_ABOVE {
        out.push(Justification::negative(
            ExplanationTag::Calories,
            format!("Calorie dense ({} kcal) for a small stomach", calories),
        ));
    }

    let policy = policy_for(surgery);
    if let Some(limit) = policy.dumping_sugar_limit {
        if profile.sugar > limit {
            out.push(Justification::negative(
                ExplanationTag::Surgery,
                format!(
                    "Sugar above the {}g limit recommended after {}",
                    format_amount(limit),
                    policy.display_name
                ),
            ));
        }
    }

    out
}

fn sugar_entry(sugar: f64) -> Justification {
    let amount = format_amount(sugar);
    if sugar <= SUGAR_VERY_LOW_MAX {
        Justification::positive(
            ExplanationTag::Sugar,
            format!("Very low sugar ({}g), minimal dumping risk", amount),
        )
    } else if sugar <= SUGAR_MODERATE_MAX {
        Justification::positive(
            ExplanationTag::Sugar,
            format!("Moderate sugar ({}g), generally acceptable", amount),
        )
    } else if sugar <= SUGAR_HIGH_MAX {
        Justification::negative(
            ExplanationTag::Sugar,
            format!("High sugar ({}g) may trigger dumping syndrome", amount),
        )
    } else {
        Justification::negative(
            ExplanationTag::Sugar,
            format!("Very high sugar ({}g), significant dumping syndrome risk", amount),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(entries: &[Justification]) -> Vec<ExplanationTag> {
        entries.iter().map(|e| e.tag).collect()
    }

    #[test]
    fn test_band_edges() {
        // Neutral base: no fat, sodium or calorie entry, no protein reported
        let base = NutrientProfile::new(200.0, 15.0, 3.0, 400.0);
        let with = |f: fn(&mut NutrientProfile)| {
            let mut p = base.clone();
            f(&mut p);
            p
        };

        let cases: Vec<(NutrientProfile, ExplanationTag, Option<(bool, &str)>)> = vec![
            (with(|p| p.sugar = 5.0), ExplanationTag::Sugar, Some((true, "Very low sugar"))),
            (with(|p| p.sugar = 10.0), ExplanationTag::Sugar, Some((true, "Moderate sugar"))),
            (with(|p| p.sugar = 10.5), ExplanationTag::Sugar, Some((false, "High sugar"))),
            (with(|p| p.sugar = 20.0), ExplanationTag::Sugar, Some((false, "High sugar"))),
            (with(|p| p.sugar = 20.5), ExplanationTag::Sugar, Some((false, "Very high sugar"))),
            (with(|p| p.protein = Some(25.0)), ExplanationTag::Protein, Some((true, "Excellent protein"))),
            (with(|p| p.protein = Some(24.9)), ExplanationTag::Protein, Some((true, "Good protein"))),
            (with(|p| p.protein = Some(15.0)), ExplanationTag::Protein, Some((true, "Good protein"))),
            (with(|p| p.protein = Some(14.9)), ExplanationTag::Protein, None),
            (with(|p| p.protein = Some(10.0)), ExplanationTag::Protein, None),
            (with(|p| p.protein = Some(9.9)), ExplanationTag::Protein, Some((false, "Low protein"))),
            (with(|p| p.fat = 10.0), ExplanationTag::Fat, Some((true, "Low fat"))),
            (with(|p| p.fat = 20.0), ExplanationTag::Fat, None),
            (with(|p| p.fat = 20.1), ExplanationTag::Fat, Some((false, "High fat"))),
            (with(|p| p.sodium = 299.0), ExplanationTag::Sodium, Some((true, "Low sodium"))),
            (with(|p| p.sodium = 300.0), ExplanationTag::Sodium, None),
            (with(|p| p.sodium = 500.0), ExplanationTag::Sodium, None),
            (with(|p| p.sodium = 500.5), ExplanationTag::Sodium, Some((false, "High sodium"))),
            (with(|p| p.calories = 150.0), ExplanationTag::Calories, Some((true, "Light on calories"))),
            (with(|p| p.calories = 400.0), ExplanationTag::Calories, None),
            (with(|p| p.calories = 401.0), ExplanationTag::Calories, Some((false, "Calorie dense"))),
        ];

        for (profile, tag, expected) in cases {
            let entries = explain_for(&profile, SurgeryType::Unspecified);
            let found = entries.iter().find(|e| e.tag == tag);
            match (found, expected) {
                (None, None) => {}
                (Some(entry), Some((positive, prefix))) => {
                    assert_eq!(entry.positive, positive, "{:?} {:?}", tag, profile);
                    assert!(entry.text.starts_with(prefix), "{:?}: {}", tag, entry.text);
                }
                (found, expected) => panic!("{:?}: got {:?}, expected {:?}", tag, found, expected),
            }
        }
    }

    #[test]
    fn test_sleeve_friendly_food() {
        let p = NutrientProfile {
            protein: Some(28.0),
            ..NutrientProfile::new(120.0, 5.0, 3.0, 100.0)
        };
        let entries = explain(&p, Some("Sleeve Gastrectomy"));

        assert!(entries.iter().any(|e| e.tag == ExplanationTag::Sugar && e.positive));
        assert!(entries.iter().any(|e| e.tag == ExplanationTag::Protein && e.positive));
        assert!(entries.iter().all(|e| e.positive));
        assert_eq!(
            tags(&entries),
            vec![
                ExplanationTag::Sugar,
                ExplanationTag::Protein,
                ExplanationTag::Fat,
                ExplanationTag::Sodium,
                ExplanationTag::Calories,
            ]
        );
    }

    #[test]
    fn test_bypass_problem_food_gets_surgery_note_last() {
        let p = NutrientProfile {
            protein: Some(8.0),
            ..NutrientProfile::new(450.0, 25.0, 22.0, 700.0)
        };
        let entries = explain(&p, Some("Gastric Bypass (Roux-en-Y)"));

        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| !e.positive));
        let last = entries.last().unwrap();
        assert_eq!(last.tag, ExplanationTag::Surgery);
        assert!(last.text.contains("10g"));
    }

    #[test]
    fn test_output_is_sorted_by_tag() {
        let p = NutrientProfile {
            protein: Some(16.0),
            ..NutrientProfile::new(500.0, 22.0, 12.0, 650.0)
        };
        for surgery in SurgeryType::ALL {
            let entries = explain_for(&p, surgery);
            let t = tags(&entries);
            let mut sorted = t.clone();
            sorted.sort();
            assert_eq!(t, sorted);
        }
    }

    #[test]
    fn test_sugar_bands_differ_from_scoring() {
        // 12g is a scoring penalty tier but still "high" (not "very high") here
        let p = NutrientProfile::new(200.0, 12.0, 12.0, 400.0);
        let entries = explain(&p, None);
        assert_eq!(entries[0].tag, ExplanationTag::Sugar);
        assert!(!entries[0].positive);
        assert!(entries[0].text.starts_with("High sugar"));

        let p = NutrientProfile::new(200.0, 12.0, 18.0, 400.0);
        assert!(explain(&p, None)[0].text.starts_with("High sugar"));

        let p = NutrientProfile::new(200.0, 12.0, 20.5, 400.0);
        assert!(explain(&p, None)[0].text.starts_with("Very high sugar"));
    }

    #[test]
    fn test_middle_bands_emit_nothing() {
        let p = NutrientProfile {
            protein: Some(12.0),
            ..NutrientProfile::new(300.0, 15.0, 4.0, 400.0)
        };
        let entries = explain(&p, None);
        assert_eq!(tags(&entries), vec![ExplanationTag::Sugar]);
    }

    #[test]
    fn test_surgery_note_uses_policy_limit() {
        let p = NutrientProfile::new(200.0, 8.0, 12.0, 200.0);

        let bypass = explain(&p, Some("roux-en-y"));
        assert_eq!(bypass.last().map(|e| e.tag), Some(ExplanationTag::Surgery));

        // Sleeve tolerates up to 15g before the note
        let sleeve = explain(&p, Some("sleeve"));
        assert!(sleeve.iter().all(|e| e.tag != ExplanationTag::Surgery));

        let band = explain(&NutrientProfile::new(200.0, 8.0, 30.0, 200.0), Some("lap band"));
        assert!(band.iter().all(|e| e.tag != ExplanationTag::Surgery));
    }
}
