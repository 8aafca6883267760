//! Aggregation engine
//!
//! Folds several nutrient profiles into recipe totals, divides them into
//! servings, and derives macro ratios, labels, warnings, benefits and
//! surgery-specific guidance.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{NutrientProfile, Score, ScoreBand, SurgeryType};

use super::engine::score_for;
use super::format_amount;
use super::policy::policy_for;

/// kcal per gram of protein or carbohydrate
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub const HIGH_PROTEIN_MIN_PCT: f64 = 30.0;
pub const LOW_CARB_BELOW_PCT: f64 = 30.0;
pub const LOW_FAT_BELOW_PCT: f64 = 30.0;
pub const LOW_SUGAR_BELOW_G: f64 = 10.0;

/// "Bariatric Friendly" also needs fat and sodium under these
pub const FRIENDLY_FAT_BELOW_G: f64 = 20.0;
pub const FRIENDLY_SODIUM_BELOW_MG: f64 = 400.0;

pub const BALANCED_LABEL: &str = "Balanced";

// Warning and benefit thresholds (per serving)
const SUGAR_WARNING_ABOVE: f64 = 15.0;
const FAT_WARNING_ABOVE: f64 = 20.0;
const SATURATED_FAT_WARNING_ABOVE: f64 = 5.0;
const SODIUM_WARNING_ABOVE: f64 = 600.0;
const CALORIES_WARNING_ABOVE: f64 = 400.0;
const PROTEIN_BENEFIT_MIN: f64 = 20.0;
const FIBER_BENEFIT_MIN: f64 = 5.0;
const SUGAR_BENEFIT_BELOW: f64 = 5.0;
const SODIUM_BENEFIT_BELOW: f64 = 300.0;
const CALCIUM_BENEFIT_MIN: f64 = 200.0;
const IRON_BENEFIT_MIN: f64 = 3.0;

/// Share of macro calories from each macronutrient, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MacroBreakdown {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// Everything derived from a list of items and a serving count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeAggregate {
    pub item_count: usize,
    pub servings: i64,
    pub surgery: SurgeryType,
    pub totals: NutrientProfile,
    pub per_serving: NutrientProfile,
    /// Score of the recipe totals
    pub score: Score,
    pub band: ScoreBand,
    pub macros: MacroBreakdown,
    pub net_carbs: f64,
    pub nutrient_density: f64,
    pub dietary_label: String,
    pub warnings: Vec<String>,
    pub benefits: Vec<String>,
    pub guidance: String,
}

/// Field-wise sum of every profile.
///
/// Optional fields missing from an item count as zero, so every field of the
/// totals is reported, even one no item carries.
pub fn aggregate(profiles: &[NutrientProfile]) -> NutrientProfile {
    profiles
        .iter()
        .fold(NutrientProfile::zeroed(), |totals, p| totals.add(p))
}

/// Divide totals into `servings` equal portions
pub fn per_serving(totals: &NutrientProfile, servings: i64) -> EngineResult<NutrientProfile> {
    if servings <= 0 {
        return Err(EngineError::InvalidServings(servings));
    }
    Ok(totals.divide(servings as f64))
}

/// Calories contributed by protein, carbohydrates and fat
pub fn macro_calories(profile: &NutrientProfile) -> (f64, f64, f64) {
    (
        profile.protein.unwrap_or(0.0) * KCAL_PER_GRAM_PROTEIN,
        profile.carbohydrates.unwrap_or(0.0) * KCAL_PER_GRAM_CARBS,
        profile.fat * KCAL_PER_GRAM_FAT,
    )
}

pub fn macro_breakdown(profile: &NutrientProfile) -> MacroBreakdown {
    let (protein, carbs, fat) = macro_calories(profile);
    let total = protein + carbs + fat;
    if total <= 0.0 {
        return MacroBreakdown::default();
    }
    MacroBreakdown {
        protein_pct: protein / total * 100.0,
        carbs_pct: carbs / total * 100.0,
        fat_pct: fat / total * 100.0,
    }
}

pub fn net_carbs(profile: &NutrientProfile) -> f64 {
    (profile.carbohydrates.unwrap_or(0.0) - profile.fiber.unwrap_or(0.0)).max(0.0)
}

/// `(protein + fiber + potassium/100 + iron*10) / calories * 100`, or 0 without calories
pub fn nutrient_density(profile: &NutrientProfile) -> f64 {
    if profile.calories <= 0.0 {
        return 0.0;
    }
    let points = profile.protein.unwrap_or(0.0)
        + profile.fiber.unwrap_or(0.0)
        + profile.potassium.unwrap_or(0.0) / 100.0
        + profile.iron.unwrap_or(0.0) * 10.0;
    points / profile.calories * 100.0
}

pub fn is_high_protein(profile: &NutrientProfile) -> bool {
    macro_breakdown(profile).protein_pct >= HIGH_PROTEIN_MIN_PCT
}

pub fn is_low_carb(profile: &NutrientProfile) -> bool {
    macro_breakdown(profile).carbs_pct < LOW_CARB_BELOW_PCT
}

pub fn is_low_fat(profile: &NutrientProfile) -> bool {
    macro_breakdown(profile).fat_pct < LOW_FAT_BELOW_PCT
}

pub fn is_low_sugar(profile: &NutrientProfile) -> bool {
    profile.sugar < LOW_SUGAR_BELOW_G
}

pub fn is_bariatric_friendly(profile: &NutrientProfile) -> bool {
    is_high_protein(profile)
        && is_low_sugar(profile)
        && profile.fat < FRIENDLY_FAT_BELOW_G
        && profile.sodium < FRIENDLY_SODIUM_BELOW_MG
}

/// Comma-separated list of every label that applies, or "Balanced"
pub fn dietary_label(profile: &NutrientProfile) -> String {
    let checks: [(bool, &str); 5] = [
        (is_high_protein(profile), "High Protein"),
        (is_low_carb(profile), "Low Carb"),
        (is_low_fat(profile), "Low Fat"),
        (is_low_sugar(profile), "Low Sugar"),
        (is_bariatric_friendly(profile), "Bariatric Friendly"),
    ];
    let labels: Vec<&str> = checks
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, label)| *label)
        .collect();

    if labels.is_empty() {
        BALANCED_LABEL.to_string()
    } else {
        labels.join(", ")
    }
}

pub fn warnings(profile: &NutrientProfile, surgery: SurgeryType) -> Vec<String> {
    let policy = policy_for(surgery);
    let mut out = Vec::new();

    let sugar_limit = policy.dumping_sugar_limit.unwrap_or(SUGAR_WARNING_ABOVE);
    if profile.sugar > sugar_limit {
        out.push(format!(
            "Sugar ({}g) is above {}g and may cause dumping syndrome",
            format_amount(profile.sugar),
            format_amount(sugar_limit)
        ));
    }
    if profile.fat > FAT_WARNING_ABOVE {
        out.push(format!(
            "High fat ({}g) can cause nausea or poor absorption",
            format_amount(profile.fat)
        ));
    }
    if profile
        .saturated_fat
        .is_some_and(|sat| sat > SATURATED_FAT_WARNING_ABOVE)
    {
        out.push("High in saturated fat".to_string());
    }
    if profile.trans_fat.is_some_and(|trans| trans > 0.0) {
        out.push("Contains trans fat".to_string());
    }
    if profile.sodium > SODIUM_WARNING_ABOVE {
        out.push(format!("High sodium ({}mg)", format_amount(profile.sodium)));
    }
    if profile.calories > CALORIES_WARNING_ABOVE {
        out.push(format!(
            "Calorie dense ({} kcal) for a small stomach",
            format_amount(profile.calories)
        ));
    }

    match profile.protein {
        None if policy.protein_critical => out.push(format!(
            "Protein content unknown; protein is critical after {}",
            policy.display_name
        )),
        Some(protein) => {
            if let Some(floor) = policy.protein.floor_limit() {
                if protein < floor {
                    out.push(format!(
                        "Low protein ({}g, under {}g)",
                        format_amount(protein),
                        format_amount(floor)
                    ));
                }
            }
        }
        None => {}
    }

    out
}

pub fn benefits(profile: &NutrientProfile) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(protein) = profile.protein {
        if protein >= PROTEIN_BENEFIT_MIN {
            out.push(format!("Provides {}g of protein", format_amount(protein)));
        }
    }
    if is_high_protein(profile) {
        out.push(format!(
            "High protein ratio ({:.0}% of calories)",
            macro_breakdown(profile).protein_pct
        ));
    }
    if profile.fiber.is_some_and(|fiber| fiber >= FIBER_BENEFIT_MIN) {
        out.push("Good source of fiber".to_string());
    }
    if profile.sugar < SUGAR_BENEFIT_BELOW {
        out.push("Very low sugar".to_string());
    }
    if profile.sodium < SODIUM_BENEFIT_BELOW {
        out.push("Low sodium".to_string());
    }
    if profile.calcium.is_some_and(|calcium| calcium >= CALCIUM_BENEFIT_MIN) {
        out.push("Good source of calcium".to_string());
    }
    if profile.iron.is_some_and(|iron| iron >= IRON_BENEFIT_MIN) {
        out.push("Good source of iron".to_string());
    }

    out
}

/// Surgery-specific advice for a serving
pub fn guidance(profile: &NutrientProfile, surgery: SurgeryType) -> String {
    let policy = policy_for(surgery);
    let (low, high) = policy.daily_protein_grams;
    let mut text = format!(
        "{}: {} Aim for {}-{}g of protein per day.",
        policy.display_name, policy.guidance, low, high
    );

    if let (Some(protein), Some(target)) = (profile.protein, policy.protein.top_limit()) {
        if protein < target {
            text.push_str(&format!(
                " This serving has {}g of protein; adding a lean protein would bring it closer to {}g.",
                format_amount(protein),
                format_amount(target)
            ));
        }
    }

    if let Some(limit) = policy.dumping_sugar_limit {
        if profile.sugar > limit {
            text.push_str(&format!(
                " Its {}g of sugar is above the {}g dumping threshold, so keep the portion small.",
                format_amount(profile.sugar),
                format_amount(limit)
            ));
        }
    }

    if policy.fat.points_at_most(profile.fat) < 0 {
        text.push_str(" Fat is above what this procedure tolerates well.");
    }

    text
}

impl RecipeAggregate {
    /// Aggregate items into a recipe for a free-form surgery type.
    ///
    /// The score is taken from the totals; labels, warnings, benefits and
    /// guidance describe one serving.
    pub fn build(
        profiles: &[NutrientProfile],
        servings: i64,
        surgery_type: Option<&str>,
    ) -> EngineResult<Self> {
        if profiles.is_empty() {
            return Err(EngineError::EmptyRecipe);
        }
        for profile in profiles {
            profile.validate()?;
        }

        let surgery = SurgeryType::resolve(surgery_type);
        let totals = aggregate(profiles);
        let per_serving = per_serving(&totals, servings)?;
        let score = score_for(&totals, surgery);

        Ok(Self {
            item_count: profiles.len(),
            servings,
            surgery,
            score,
            band: score.band(),
            macros: macro_breakdown(&per_serving),
            net_carbs: net_carbs(&per_serving),
            nutrient_density: nutrient_density(&per_serving),
            dietary_label: dietary_label(&per_serving),
            warnings: warnings(&per_serving, surgery),
            benefits: benefits(&per_serving),
            guidance: guidance(&per_serving, surgery),
            totals,
            per_serving,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item() -> NutrientProfile {
        NutrientProfile {
            protein: Some(10.0),
            ..NutrientProfile::new(200.0, 5.0, 2.0, 50.0)
        }
    }

    #[test]
    fn test_three_items_two_servings() {
        let items = vec![item(), item(), item()];
        let totals = aggregate(&items);
        assert_eq!(totals.calories, 600.0);
        assert_eq!(totals.protein, Some(30.0));

        let serving = per_serving(&totals, 2).unwrap();
        assert!((serving.calories - 300.0).abs() < 1e-9);
        assert_eq!(serving.protein, Some(15.0));
    }

    #[test]
    fn test_per_serving_rejects_non_positive() {
        let totals = aggregate(&[item()]);
        assert_eq!(per_serving(&totals, 0), Err(EngineError::InvalidServings(0)));
        assert_eq!(per_serving(&totals, -3), Err(EngineError::InvalidServings(-3)));
    }

    #[test]
    fn test_aggregate_counts_missing_optionals_as_zero() {
        let with_fiber = NutrientProfile {
            fiber: Some(4.0),
            ..item()
        };
        let totals = aggregate(&[with_fiber, item(), item()]);
        assert_eq!(totals.fiber, Some(4.0));
        assert_eq!(totals.calcium, Some(0.0));
    }

    #[test]
    fn test_aggregate_empty_is_zero() {
        let totals = aggregate(&[]);
        assert_eq!(totals, NutrientProfile::zeroed());
    }

    #[test]
    fn test_unreported_protein_sums_to_zero_and_is_scored() {
        let plain = NutrientProfile::new(200.0, 5.0, 2.0, 50.0);
        let totals = aggregate(&[plain.clone(), plain.clone(), plain]);
        assert_eq!(totals.protein, Some(0.0));

        // Zero protein hits the bypass protein floor; unreported protein would not.
        let scored = score_for(&totals, SurgeryType::GastricBypass);
        let skipped = score_for(
            &NutrientProfile { protein: None, ..totals.clone() },
            SurgeryType::GastricBypass,
        );
        assert!(scored < skipped);
    }

    #[test]
    fn test_macro_breakdown() {
        let p = NutrientProfile {
            protein: Some(25.0),
            carbohydrates: Some(25.0),
            ..NutrientProfile::new(300.0, 0.0, 0.0, 0.0)
        };
        let m = macro_breakdown(&p);
        assert!((m.protein_pct - 50.0).abs() < 1e-9);
        assert!((m.carbs_pct - 50.0).abs() < 1e-9);
        assert_eq!(m.fat_pct, 0.0);
    }

    #[test]
    fn test_macro_breakdown_guards_zero() {
        let p = NutrientProfile::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(macro_breakdown(&p), MacroBreakdown::default());
    }

    #[test]
    fn test_net_carbs_never_negative() {
        let p = NutrientProfile {
            carbohydrates: Some(20.0),
            fiber: Some(6.0),
            ..NutrientProfile::new(100.0, 1.0, 1.0, 10.0)
        };
        assert_eq!(net_carbs(&p), 14.0);

        let p = NutrientProfile {
            carbohydrates: Some(2.0),
            fiber: Some(6.0),
            ..p
        };
        assert_eq!(net_carbs(&p), 0.0);
    }

    #[test]
    fn test_nutrient_density() {
        let p = NutrientProfile {
            protein: Some(20.0),
            fiber: Some(5.0),
            potassium: Some(500.0),
            iron: Some(1.0),
            ..NutrientProfile::new(200.0, 1.0, 1.0, 10.0)
        };
        // (20 + 5 + 5 + 10) / 200 * 100
        assert!((nutrient_density(&p) - 20.0).abs() < 1e-9);
        assert_eq!(nutrient_density(&NutrientProfile::new(0.0, 0.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_dietary_label_bariatric_friendly() {
        // 30g protein = 120 kcal, 5g fat = 45 kcal, 5g carbs = 20 kcal
        let p = NutrientProfile {
            protein: Some(30.0),
            carbohydrates: Some(5.0),
            ..NutrientProfile::new(190.0, 5.0, 2.0, 150.0)
        };
        assert_eq!(
            dietary_label(&p),
            "High Protein, Low Carb, Low Fat, Low Sugar, Bariatric Friendly"
        );
    }

    #[test]
    fn test_dietary_label_balanced() {
        // 20% protein, 40% carbs, 40% fat, plenty of sugar
        let p = NutrientProfile {
            protein: Some(10.0),
            carbohydrates: Some(20.0),
            ..NutrientProfile::new(200.0, 80.0 / 9.0, 15.0, 100.0)
        };
        assert_eq!(dietary_label(&p), BALANCED_LABEL);
    }

    #[test]
    fn test_warnings_follow_surgery_type() {
        let p = NutrientProfile {
            protein: Some(12.0),
            ..NutrientProfile::new(250.0, 8.0, 12.0, 200.0)
        };
        let bypass = warnings(&p, SurgeryType::GastricBypass);
        assert!(bypass.iter().any(|w| w.contains("dumping")));

        let general = warnings(&p, SurgeryType::Unspecified);
        assert!(general.iter().all(|w| !w.contains("dumping")));

        let bpd = warnings(&p, SurgeryType::BpdDs);
        assert!(bpd.iter().any(|w| w.starts_with("Low protein")));

        let unknown = NutrientProfile { protein: None, ..p };
        let bpd = warnings(&unknown, SurgeryType::BpdDs);
        assert!(bpd.iter().any(|w| w.contains("Protein content unknown")));
    }

    #[test]
    fn test_benefits() {
        let p = NutrientProfile {
            protein: Some(30.0),
            fiber: Some(6.0),
            calcium: Some(250.0),
            ..NutrientProfile::new(250.0, 4.0, 2.0, 120.0)
        };
        let b = benefits(&p);
        assert!(b.contains(&"Provides 30g of protein".to_string()));
        assert!(b.contains(&"Good source of fiber".to_string()));
        assert!(b.contains(&"Very low sugar".to_string()));
        assert!(b.contains(&"Low sodium".to_string()));
        assert!(b.contains(&"Good source of calcium".to_string()));
        assert!(!b.contains(&"Good source of iron".to_string()));
    }

    #[test]
    fn test_guidance_mentions_daily_targets() {
        let p = NutrientProfile {
            protein: Some(20.0),
            ..NutrientProfile::new(200.0, 5.0, 2.0, 100.0)
        };
        let bpd = guidance(&p, SurgeryType::BpdDs);
        assert!(bpd.contains("80-120g"));
        assert!(bpd.contains("closer to 30g"));

        let sleeve = guidance(&p, SurgeryType::Sleeve);
        assert!(sleeve.contains("60-80g"));
        assert!(sleeve.contains("closer to 25g"));
    }

    #[test]
    fn test_build_recipe_aggregate() {
        let items = vec![item(), item(), item()];
        let recipe = RecipeAggregate::build(&items, 2, Some("Sleeve Gastrectomy")).unwrap();

        assert_eq!(recipe.item_count, 3);
        assert_eq!(recipe.surgery, SurgeryType::Sleeve);
        assert_eq!(recipe.totals.calories, 600.0);
        assert!((recipe.per_serving.calories - 300.0).abs() < 1e-9);
        assert_eq!(recipe.score, score_for(&recipe.totals, SurgeryType::Sleeve));
        assert_eq!(recipe.band, recipe.score.band());
    }

    #[test]
    fn test_build_rejects_bad_input() {
        assert_eq!(
            RecipeAggregate::build(&[], 2, None),
            Err(EngineError::EmptyRecipe)
        );
        assert_eq!(
            RecipeAggregate::build(&[item()], 0, None),
            Err(EngineError::InvalidServings(0))
        );

        let bad = NutrientProfile { sodium: -1.0, ..item() };
        assert!(matches!(
            RecipeAggregate::build(&[item(), bad], 2, None),
            Err(EngineError::InvalidNutrient { field: "sodium", .. })
        ));
    }

    fn arb_item() -> impl Strategy<Value = NutrientProfile> {
        (
            0.0..800.0f64,
            0.0..60.0f64,
            0.0..60.0f64,
            0.0..2000.0f64,
            proptest::option::of(0.0..60.0f64),
            proptest::option::of(0.0..20.0f64),
            proptest::option::of(0.0..500.0f64),
        )
            .prop_map(|(calories, fat, sugar, sodium, protein, fiber, calcium)| NutrientProfile {
                protein,
                fiber,
                calcium,
                ..NutrientProfile::new(calories, fat, sugar, sodium)
            })
    }

    proptest! {
        #[test]
        fn prop_aggregate_is_exact_fieldwise_sum(items in proptest::collection::vec(arb_item(), 0..8)) {
            let totals = aggregate(&items);
            for (index, (field, value)) in totals.fields().into_iter().enumerate() {
                let expected = items
                    .iter()
                    .fold(0.0, |acc, p| acc + p.fields()[index].1.unwrap_or(0.0));
                prop_assert_eq!(value, Some(expected), "{}", field);
            }
        }

        #[test]
        fn prop_per_serving_divides(items in proptest::collection::vec(arb_item(), 1..8), servings in 1i64..12) {
            let totals = aggregate(&items);
            let serving = per_serving(&totals, servings).unwrap();
            prop_assert!((serving.calories - totals.calories / servings as f64).abs() < 1e-9);
        }

        #[test]
        fn prop_macro_percentages_sum_to_100_or_0(p in arb_item()) {
            let m = macro_breakdown(&p);
            let sum = m.protein_pct + m.carbs_pct + m.fat_pct;
            prop_assert!(sum.abs() < 1e-9 || (sum - 100.0).abs() < 1e-9);
        }
    }
}
