//! Scoring MCP Tools
//!
//! Request validation and response shaping around the scoring engine.

use serde::Serialize;

use crate::models::{NutrientProfile, ScoreBand, SurgeryType};
use crate::scoring::{self, Justification, MatchKind, Substitute, POLICIES};

/// Response for score_food
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub band: ScoreBand,
    pub surgery: SurgeryType,
}

/// Response for explain_food
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub surgery: SurgeryType,
    pub explanations: Vec<Justification>,
}

/// Response for food_report: everything about one item in one call
#[derive(Debug, Serialize)]
pub struct FoodReport {
    pub name: Option<String>,
    pub score: u8,
    pub band: ScoreBand,
    pub surgery: SurgeryType,
    pub explanations: Vec<Justification>,
    pub alternatives: Vec<String>,
}

/// One item of a batch request
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: Option<String>,
    pub surgery_type: Option<String>,
    pub profile: NutrientProfile,
}

/// Score for one batch item
#[derive(Debug, Serialize)]
pub struct BatchScore {
    pub index: usize,
    pub name: Option<String>,
    pub score: u8,
    pub band: ScoreBand,
}

#[derive(Debug, Serialize)]
pub struct ScoreBatchResponse {
    pub results: Vec<BatchScore>,
    pub count: usize,
}

/// Response for suggest_alternatives
#[derive(Debug, Serialize)]
pub struct AlternativesResponse {
    pub score: u8,
    pub band: ScoreBand,
    pub alternatives: Vec<String>,
}

/// Response for find_substitutes
#[derive(Debug, Serialize)]
pub struct SubstitutesResponse {
    pub food_name: String,
    pub matched_key: Option<&'static str>,
    pub match_kind: MatchKind,
    pub substitutes: &'static [Substitute],
}

/// Summary of one surgery policy
#[derive(Debug, Serialize)]
pub struct PolicySummary {
    pub surgery: SurgeryType,
    pub display_name: &'static str,
    pub daily_protein_grams: (u32, u32),
    pub dumping_sugar_limit: Option<f64>,
    pub protein_critical: bool,
    pub guidance: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListPoliciesResponse {
    pub policies: Vec<PolicySummary>,
    pub count: usize,
}

// ============================================================================
// Scoring Tools
// ============================================================================

/// Score one food item
pub fn score_food(
    profile: &NutrientProfile,
    surgery_type: Option<&str>,
) -> Result<ScoreResponse, String> {
    profile.validate().map_err(|e| e.to_string())?;

    let surgery = SurgeryType::resolve(surgery_type);
    let score = scoring::score_for(profile, surgery);

    Ok(ScoreResponse {
        score: score.value(),
        band: score.band(),
        surgery,
    })
}

/// Explain a food item's score
pub fn explain_food(
    profile: &NutrientProfile,
    surgery_type: Option<&str>,
) -> Result<ExplainResponse, String> {
    profile.validate().map_err(|e| e.to_string())?;

    let surgery = SurgeryType::resolve(surgery_type);
    Ok(ExplainResponse {
        surgery,
        explanations: scoring::explain_for(profile, surgery),
    })
}

/// Score, explanation, and alternatives for one item
pub fn food_report(
    name: Option<&str>,
    profile: &NutrientProfile,
    surgery_type: Option<&str>,
) -> Result<FoodReport, String> {
    profile.validate().map_err(|e| e.to_string())?;

    let surgery = SurgeryType::resolve(surgery_type);
    let score = scoring::score_for(profile, surgery);

    Ok(FoodReport {
        name: name.map(str::to_string),
        score: score.value(),
        band: score.band(),
        surgery,
        explanations: scoring::explain_for(profile, surgery),
        alternatives: scoring::alternatives(score, name),
    })
}

/// Score many items. Each item is independent; output order matches input.
pub fn score_batch(items: Vec<BatchItem>) -> Result<ScoreBatchResponse, String> {
    if items.is_empty() {
        return Err("items cannot be empty".to_string());
    }

    for (index, item) in items.iter().enumerate() {
        item.profile
            .validate()
            .map_err(|e| format!("item {}: {}", index, e))?;
    }

    let results: Vec<BatchScore> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let score = scoring::score(&item.profile, item.surgery_type.as_deref());
            BatchScore {
                index,
                name: item.name,
                score: score.value(),
                band: score.band(),
            }
        })
        .collect();

    Ok(ScoreBatchResponse {
        count: results.len(),
        results,
    })
}

/// Suggestions for a known score
pub fn suggest_alternatives(score: i64, food_name: Option<&str>) -> Result<AlternativesResponse, String> {
    if !(0..=100).contains(&score) {
        return Err(format!("score must be between 0 and 100 (got {})", score));
    }

    let score = crate::models::Score::clamped(score as i32);
    Ok(AlternativesResponse {
        score: score.value(),
        band: score.band(),
        alternatives: scoring::alternatives(score, food_name),
    })
}

/// Ingredient substitutes
pub fn find_substitutes(food_name: &str) -> SubstitutesResponse {
    let found = scoring::find_substitutes(food_name);
    SubstitutesResponse {
        food_name: food_name.to_string(),
        matched_key: found.key,
        match_kind: found.kind,
        substitutes: found.substitutes,
    }
}

/// List the registered surgery policies
pub fn list_surgery_policies() -> ListPoliciesResponse {
    let policies: Vec<PolicySummary> = POLICIES
        .iter()
        .map(|p| PolicySummary {
            surgery: p.surgery,
            display_name: p.display_name,
            daily_protein_grams: p.daily_protein_grams,
            dumping_sugar_limit: p.dumping_sugar_limit,
            protein_critical: p.protein_critical,
            guidance: p.guidance,
        })
        .collect();

    ListPoliciesResponse {
        count: policies.len(),
        policies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_food_rejects_negative_values() {
        let p = NutrientProfile::new(100.0, -1.0, 2.0, 50.0);
        let err = score_food(&p, None).unwrap_err();
        assert!(err.contains("fat"));
    }

    #[test]
    fn test_food_report_combines_outputs() {
        let p = NutrientProfile {
            protein: Some(8.0),
            ..NutrientProfile::new(450.0, 25.0, 22.0, 700.0)
        };
        let report = food_report(Some("glazed donut"), &p, Some("Gastric Bypass (Roux-en-Y)")).unwrap();
        assert_eq!(report.surgery, SurgeryType::GastricBypass);
        assert_eq!(report.band, ScoreBand::Poor);
        assert_eq!(report.alternatives.len(), 4);
        assert_eq!(report.explanations.len(), 6);
    }

    #[test]
    fn test_score_batch_keeps_order_and_reports_bad_item() {
        let good = NutrientProfile {
            protein: Some(30.0),
            ..NutrientProfile::new(120.0, 3.0, 1.0, 80.0)
        };
        let items = vec![
            BatchItem { name: Some("a".into()), surgery_type: None, profile: good.clone() },
            BatchItem { name: Some("b".into()), surgery_type: Some("sleeve".into()), profile: good.clone() },
        ];
        let response = score_batch(items).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.results[1].index, 1);
        assert_eq!(response.results[1].name.as_deref(), Some("b"));

        let bad = BatchItem {
            name: None,
            surgery_type: None,
            profile: NutrientProfile::new(-5.0, 0.0, 0.0, 0.0),
        };
        let err = score_batch(vec![
            BatchItem { name: None, surgery_type: None, profile: good },
            bad,
        ])
        .unwrap_err();
        assert!(err.starts_with("item 1"));

        assert!(score_batch(Vec::new()).is_err());
    }

    #[test]
    fn test_suggest_alternatives_validates_range() {
        assert!(suggest_alternatives(101, None).is_err());
        assert!(suggest_alternatives(-1, None).is_err());
        assert!(suggest_alternatives(80, None).unwrap().alternatives.is_empty());
    }

    #[test]
    fn test_list_surgery_policies() {
        let response = list_surgery_policies();
        assert_eq!(response.count, SurgeryType::ALL.len());
    }
}
