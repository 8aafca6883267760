//! Recipe MCP Tools
//!
//! Recipe/meal aggregation over caller-supplied item profiles.

use serde::Serialize;

use crate::models::NutrientProfile;
use crate::scoring::{self, RecipeAggregate};

/// One recipe item as supplied by the caller
#[derive(Debug, Clone)]
pub struct RecipeItem {
    pub name: Option<String>,
    pub profile: NutrientProfile,
}

/// Response for analyze_recipe
#[derive(Debug, Serialize)]
pub struct RecipeAnalysis {
    pub name: Option<String>,
    pub item_names: Vec<String>,
    #[serde(flatten)]
    pub aggregate: RecipeAggregate,
    pub alternatives: Vec<String>,
}

/// Response for per_serving_nutrition
#[derive(Debug, Serialize)]
pub struct PerServingResponse {
    pub servings: i64,
    pub totals: NutrientProfile,
    pub per_serving: NutrientProfile,
}

/// Aggregate items into a recipe and score it
pub fn analyze_recipe(
    name: Option<&str>,
    items: Vec<RecipeItem>,
    servings: i64,
    surgery_type: Option<&str>,
) -> Result<RecipeAnalysis, String> {
    let item_names: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| item.name.clone().unwrap_or_else(|| format!("item {}", i + 1)))
        .collect();
    let profiles: Vec<NutrientProfile> = items.into_iter().map(|item| item.profile).collect();

    let aggregate = RecipeAggregate::build(&profiles, servings, surgery_type)
        .map_err(|e| e.to_string())?;

    tracing::info!(
        items = aggregate.item_count,
        servings,
        score = aggregate.score.value(),
        "Analyzed recipe"
    );

    let alternatives = scoring::alternatives(aggregate.score, name);

    Ok(RecipeAnalysis {
        name: name.map(str::to_string),
        item_names,
        aggregate,
        alternatives,
    })
}

/// Sum the items and split the totals into servings
pub fn per_serving_nutrition(
    profiles: Vec<NutrientProfile>,
    servings: i64,
) -> Result<PerServingResponse, String> {
    for (index, profile) in profiles.iter().enumerate() {
        profile
            .validate()
            .map_err(|e| format!("item {}: {}", index, e))?;
    }

    let totals = scoring::aggregate(&profiles);
    let per_serving = scoring::per_serving(&totals, servings).map_err(|e| e.to_string())?;

    Ok(PerServingResponse {
        servings,
        totals,
        per_serving,
    })
}
