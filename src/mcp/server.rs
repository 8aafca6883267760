//! Bariscore MCP Server Implementation
//!
//! Exposes the scoring engine as MCP tools over stdio.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{NutrientProfile, SurgeryType};
use crate::tools::recipes::{self, RecipeItem};
use crate::tools::scoring::{self, BatchItem};
use crate::tools::status::StatusTracker;

/// Bariscore MCP Service
#[derive(Clone)]
pub struct BariscoreService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    /// Applied when a tool call omits surgery_type
    default_surgery_type: Option<String>,
    tool_router: ToolRouter<BariscoreService>,
}

impl BariscoreService {
    pub fn new(default_surgery_type: Option<String>) -> Self {
        let default_surgery = SurgeryType::resolve(default_surgery_type.as_deref());
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(default_surgery))),
            default_surgery_type,
            tool_router: Self::tool_router(),
        }
    }

    /// The caller's surgery type, or the configured default
    fn surgery_type<'a>(&'a self, requested: &'a Option<String>) -> Option<&'a str> {
        requested
            .as_deref()
            .or(self.default_surgery_type.as_deref())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn invalid(message: String) -> McpError {
    McpError::invalid_params(message, None)
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Nutrient values for one item, per 100g or per serving
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct NutrientProfileParams {
    /// Energy in kcal
    pub calories: f64,
    /// Total fat in grams
    pub fat: f64,
    /// Sugar in grams
    pub sugar: f64,
    /// Sodium in milligrams
    pub sodium: f64,
    /// Protein in grams (omit if unknown)
    pub protein: Option<f64>,
    /// Fiber in grams
    pub fiber: Option<f64>,
    /// Saturated fat in grams
    pub saturated_fat: Option<f64>,
    /// Monounsaturated fat in grams
    pub monounsaturated_fat: Option<f64>,
    /// Trans fat in grams
    pub trans_fat: Option<f64>,
    /// Potassium in milligrams
    pub potassium: Option<f64>,
    /// Total carbohydrates in grams
    pub carbohydrates: Option<f64>,
    /// Iron in milligrams
    pub iron: Option<f64>,
    /// Cholesterol in milligrams
    pub cholesterol: Option<f64>,
    /// Calcium in milligrams
    pub calcium: Option<f64>,
    /// Vitamin B12 in micrograms
    pub vitamin_b12: Option<f64>,
    /// Vitamin D in micrograms
    pub vitamin_d: Option<f64>,
    /// Vitamin A in micrograms RAE
    pub vitamin_a: Option<f64>,
    /// Vitamin E in milligrams
    pub vitamin_e: Option<f64>,
    /// Vitamin K in micrograms
    pub vitamin_k: Option<f64>,
    /// Folate in micrograms
    pub folate: Option<f64>,
    /// Cobalt in micrograms
    pub cobalt: Option<f64>,
}

impl From<NutrientProfileParams> for NutrientProfile {
    fn from(p: NutrientProfileParams) -> Self {
        NutrientProfile {
            calories: p.calories,
            fat: p.fat,
            sugar: p.sugar,
            sodium: p.sodium,
            protein: p.protein,
            fiber: p.fiber,
            saturated_fat: p.saturated_fat,
            monounsaturated_fat: p.monounsaturated_fat,
            trans_fat: p.trans_fat,
            potassium: p.potassium,
            carbohydrates: p.carbohydrates,
            iron: p.iron,
            cholesterol: p.cholesterol,
            calcium: p.calcium,
            vitamin_b12: p.vitamin_b12,
            vitamin_d: p.vitamin_d,
            vitamin_a: p.vitamin_a,
            vitamin_e: p.vitamin_e,
            vitamin_k: p.vitamin_k,
            folate: p.folate,
            cobalt: p.cobalt,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScoreFoodParams {
    /// Nutrient values for the food
    pub profile: NutrientProfileParams,
    /// Surgery type as free text, e.g. "Sleeve Gastrectomy" (optional)
    pub surgery_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodReportParams {
    /// Food name, used to personalize suggestions (optional)
    pub name: Option<String>,
    /// Nutrient values for the food
    pub profile: NutrientProfileParams,
    /// Surgery type as free text (optional)
    pub surgery_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BatchItemParams {
    /// Item name echoed in the result (optional)
    pub name: Option<String>,
    /// Surgery type for this item (optional)
    pub surgery_type: Option<String>,
    /// Nutrient values for the item
    pub profile: NutrientProfileParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScoreBatchParams {
    /// Items to score; results keep this order
    pub items: Vec<BatchItemParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestAlternativesParams {
    /// Score from 0 to 100
    pub score: i64,
    /// Food name (optional)
    pub food_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindSubstitutesParams {
    /// Ingredient name, e.g. "ground beef"
    pub food_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeItemParams {
    /// Ingredient name (optional)
    pub name: Option<String>,
    /// Nutrient values for the quantity used in the recipe
    pub profile: NutrientProfileParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeRecipeParams {
    /// Recipe name (optional)
    pub name: Option<String>,
    /// Ingredients with their nutrient values
    pub items: Vec<RecipeItemParams>,
    /// Number of servings the recipe makes (must be > 0)
    #[serde(default = "default_servings")]
    pub servings: i64,
    /// Surgery type as free text (optional)
    pub surgery_type: Option<String>,
}

fn default_servings() -> i64 { 1 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PerServingParams {
    /// Nutrient values to sum
    pub profiles: Vec<NutrientProfileParams>,
    /// Number of servings (must be > 0)
    pub servings: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl BariscoreService {
    // --- Status ---

    #[tool(description = "Get the current status of the scoring service including build info, policy tables, and process information")]
    async fn bariscore_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for describing foods and surgery types. Call this before scoring if unsure which fields to send.")]
    fn scoring_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SCORING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SCORING_INSTRUCTIONS)]))
    }

    #[tool(description = "List the supported surgery types with their daily protein targets and sugar limits")]
    fn list_surgery_policies(&self) -> Result<CallToolResult, McpError> {
        to_json(&scoring::list_surgery_policies())
    }

    // --- Scoring ---

    #[tool(description = "Score a food from 0 to 100 for a post-bariatric-surgery diet")]
    fn score_food(&self, Parameters(p): Parameters<ScoreFoodParams>) -> Result<CallToolResult, McpError> {
        let profile = NutrientProfile::from(p.profile);
        let result = scoring::score_food(&profile, self.surgery_type(&p.surgery_type)).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Explain a food's score as an ordered list of positive and negative factors")]
    fn explain_food(&self, Parameters(p): Parameters<ScoreFoodParams>) -> Result<CallToolResult, McpError> {
        let profile = NutrientProfile::from(p.profile);
        let result = scoring::explain_food(&profile, self.surgery_type(&p.surgery_type)).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Score, explanation, and improvement suggestions for one food in a single call. PREFERRED for single foods.")]
    fn food_report(&self, Parameters(p): Parameters<FoodReportParams>) -> Result<CallToolResult, McpError> {
        let profile = NutrientProfile::from(p.profile);
        let result = scoring::food_report(p.name.as_deref(), &profile, self.surgery_type(&p.surgery_type))
            .map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Score many foods in one call. Results are returned in input order.")]
    fn score_batch(&self, Parameters(p): Parameters<ScoreBatchParams>) -> Result<CallToolResult, McpError> {
        let items: Vec<BatchItem> = p.items.into_iter().map(|i| BatchItem {
            name: i.name,
            surgery_type: i.surgery_type.or_else(|| self.default_surgery_type.clone()),
            profile: i.profile.into(),
        }).collect();
        let result = scoring::score_batch(items).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Get improvement suggestions for a score: none at 75+, small tips at 50-74, targeted swaps at 26-49, protein staples at 25 or below")]
    fn suggest_alternatives(&self, Parameters(p): Parameters<SuggestAlternativesParams>) -> Result<CallToolResult, McpError> {
        let result = scoring::suggest_alternatives(p.score, p.food_name.as_deref()).map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Find healthier substitutes for an ingredient (e.g. butter, white rice, ground beef)")]
    fn find_substitutes(&self, Parameters(p): Parameters<FindSubstitutesParams>) -> Result<CallToolResult, McpError> {
        to_json(&scoring::find_substitutes(&p.food_name))
    }

    // --- Recipes ---

    #[tool(description = "Aggregate recipe or meal ingredients, then score the totals and report per-serving nutrition, macro ratios, dietary label, warnings, benefits, and surgery guidance")]
    fn analyze_recipe(&self, Parameters(p): Parameters<AnalyzeRecipeParams>) -> Result<CallToolResult, McpError> {
        let items: Vec<RecipeItem> = p.items.into_iter().map(|i| RecipeItem {
            name: i.name,
            profile: i.profile.into(),
        }).collect();
        let result = recipes::analyze_recipe(p.name.as_deref(), items, p.servings, self.surgery_type(&p.surgery_type))
            .map_err(invalid)?;
        to_json(&result)
    }

    #[tool(description = "Sum nutrient profiles and divide the totals into servings")]
    fn per_serving_nutrition(&self, Parameters(p): Parameters<PerServingParams>) -> Result<CallToolResult, McpError> {
        let profiles: Vec<NutrientProfile> = p.profiles.into_iter().map(NutrientProfile::from).collect();
        let result = recipes::per_serving_nutrition(profiles, p.servings).map_err(invalid)?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BariscoreService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bariscore".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Bariatric Food Scorer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Bariatric Food Scorer - scores foods and recipes 0-100 for post-bariatric-surgery diets. \
                 Call scoring_instructions first if unsure which nutrient fields to send. \
                 Single foods: food_report (preferred), score_food, explain_food. \
                 Many foods: score_batch. \
                 Recipes and meals: analyze_recipe, per_serving_nutrition. \
                 Advice: suggest_alternatives, find_substitutes. \
                 Reference: list_surgery_policies, bariscore_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surgery_type_applies_when_missing() {
        let service = BariscoreService::new(Some("sleeve".to_string()));
        assert_eq!(service.surgery_type(&None), Some("sleeve"));
        assert_eq!(service.surgery_type(&Some("band".to_string())), Some("band"));

        let service = BariscoreService::new(None);
        assert_eq!(service.surgery_type(&None), None);
    }

    #[test]
    fn test_profile_params_convert() {
        let params: NutrientProfileParams = serde_json::from_str(
            r#"{"calories": 120, "fat": 5, "sugar": 3, "sodium": 100, "protein": 28}"#,
        )
        .unwrap();
        let profile = NutrientProfile::from(params);
        assert_eq!(profile.protein, Some(28.0));
        assert_eq!(profile.fiber, None);
    }
}
