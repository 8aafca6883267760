//! Alternatives advisor
//!
//! Score-gated improvement suggestions and a static ingredient substitute
//! table.

use serde::Serialize;

use crate::models::Score;

/// Scores at or above this need no suggestions
pub const NO_SUGGESTIONS_MIN: u8 = 75;
/// Scores at or below this get the foundational set
pub const FOUNDATIONAL_MAX: u8 = 25;
/// Scores at or below this (and above foundational) get targeted swaps
pub const TARGETED_MAX: u8 = 49;

const FOUNDATIONAL: [&str; 4] = [
    "Grilled chicken breast: lean, high-protein base for any meal",
    "Plain non-fat Greek yogurt: protein-rich and naturally low in sugar",
    "Eggs or egg whites: complete protein that is soft and easy to tolerate",
    "Baked white fish such as cod or tilapia: very lean and gentle on the pouch",
];

const TARGETED: [&str; 4] = [
    "Swap sugary sauces and dressings for herbs, spices, or a squeeze of lemon",
    "Choose a leaner cut or a skinless version of the same protein",
    "Replace refined starches with non-starchy vegetables",
    "Pick a reduced-sugar or no-added-sugar version of the same product",
];

/// Substitute food with its health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitute {
    pub name: &'static str,
    pub health_score: u8,
}

/// Which rule produced a substitute list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Partial,
    Fallback,
}

/// Substitute lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubstituteMatch {
    /// Table key that matched, if any
    pub key: Option<&'static str>,
    pub kind: MatchKind,
    pub substitutes: &'static [Substitute],
}

const fn sub(name: &'static str, health_score: u8) -> Substitute {
    Substitute { name, health_score }
}

/// Ordered substitute table. Partial matching walks it top to bottom.
pub static SUBSTITUTES: &[(&str, [Substitute; 4])] = &[
    (
        "ground beef",
        [
            sub("Extra-lean ground turkey (99% lean)", 92),
            sub("Ground chicken breast", 90),
            sub("Lentils", 82),
            sub("96% lean ground beef", 78),
        ],
    ),
    (
        "butter",
        [
            sub("Light olive oil spray", 85),
            sub("Plain Greek yogurt", 82),
            sub("Unsweetened applesauce (baking)", 76),
            sub("Light whipped butter", 60),
        ],
    ),
    (
        "sugar",
        [
            sub("Stevia", 90),
            sub("Monk fruit sweetener", 90),
            sub("Erythritol", 85),
            sub("Cinnamon or vanilla extract", 80),
        ],
    ),
    (
        "white rice",
        [
            sub("Cauliflower rice", 92),
            sub("Riced broccoli", 90),
            sub("Quinoa", 78),
            sub("Brown rice", 68),
        ],
    ),
    (
        "milk",
        [
            sub("Fairlife ultra-filtered skim milk", 92),
            sub("Unsweetened soy milk", 85),
            sub("Skim milk", 80),
            sub("Unsweetened almond milk", 75),
        ],
    ),
    (
        "pasta",
        [
            sub("Zucchini noodles", 92),
            sub("Spaghetti squash", 90),
            sub("Edamame or chickpea pasta", 84),
            sub("Shirataki noodles", 80),
        ],
    ),
    (
        "white bread",
        [
            sub("Low-carb high-protein wrap", 82),
            sub("Lettuce wraps", 80),
            sub("Whole grain crispbread", 70),
            sub("100% whole wheat bread", 65),
        ],
    ),
    (
        "sour cream",
        [
            sub("Plain non-fat Greek yogurt", 94),
            sub("Skyr", 90),
            sub("Blended low-fat cottage cheese", 88),
            sub("Light sour cream", 62),
        ],
    ),
    (
        "mayonnaise",
        [
            sub("Plain Greek yogurt", 90),
            sub("Mashed avocado", 75),
            sub("Hummus", 74),
            sub("Light mayonnaise", 55),
        ],
    ),
    (
        "potato chips",
        [
            sub("Protein chips", 80),
            sub("Roasted chickpeas", 78),
            sub("Baked parmesan crisps", 75),
            sub("Air-popped popcorn", 65),
        ],
    ),
    (
        "soda",
        [
            sub("Water with lemon or cucumber", 95),
            sub("Unsweetened flavored water (flat)", 90),
            sub("Decaf herbal iced tea", 88),
            sub("Sugar-free drink mix (flat)", 70),
        ],
    ),
    (
        "ice cream",
        [
            sub("Protein shake blended with ice", 88),
            sub("Frozen Greek yogurt bark", 85),
            sub("High-protein light ice cream", 72),
            sub("Sugar-free gelatin", 70),
        ],
    ),
];

const FALLBACK: [Substitute; 2] = [
    sub("No specific substitutes found for this item", 0),
    sub("Try searching online for bariatric-friendly alternatives", 0),
];

/// Improvement suggestions gated by score band.
///
/// Excellent scores get nothing, poor scores get foundational protein
/// staples, fair scores get targeted swaps, and good scores get two small
/// tips naming the food when one is given.
pub fn alternatives(score: Score, food_name: Option<&str>) -> Vec<String> {
    let value = score.value();
    if value >= NO_SUGGESTIONS_MIN {
        return Vec::new();
    }
    if value <= FOUNDATIONAL_MAX {
        return FOUNDATIONAL.iter().map(|s| s.to_string()).collect();
    }
    if value <= TARGETED_MAX {
        return TARGETED.iter().map(|s| s.to_string()).collect();
    }

    let food = food_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("this food");
    vec![
        format!("Pair {} with a lean protein to make the meal more filling", food),
        format!("Keep the portion of {} small and eat it slowly", food),
    ]
}

/// Look up substitutes for an ingredient.
///
/// Exact (case-insensitive, trimmed) key matches win. Otherwise the first
/// table row, in table order, whose key contains the name or is contained in
/// it is used. Anything else gets the two-entry generic fallback.
pub fn substitutes(food_name: &str) -> &'static [Substitute] {
    find_substitutes(food_name).substitutes
}

pub fn find_substitutes(food_name: &str) -> SubstituteMatch {
    let name = food_name.trim().to_lowercase();

    if !name.is_empty() {
        if let Some((key, subs)) = SUBSTITUTES.iter().find(|(key, _)| *key == name) {
            tracing::debug!(food = %name, key = *key, "Exact substitute match");
            return SubstituteMatch {
                key: Some(*key),
                kind: MatchKind::Exact,
                substitutes: subs,
            };
        }

        if let Some((key, subs)) = SUBSTITUTES
            .iter()
            .find(|(key, _)| name.contains(key) || key.contains(name.as_str()))
        {
            tracing::debug!(food = %name, key = *key, "Partial substitute match");
            return SubstituteMatch {
                key: Some(*key),
                kind: MatchKind::Partial,
                substitutes: subs,
            };
        }
    }

    tracing::debug!(food = %name, "No substitute match, using fallback");
    SubstituteMatch {
        key: None,
        kind: MatchKind::Fallback,
        substitutes: &FALLBACK,
    }
}
