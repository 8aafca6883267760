//! Scoring module
//!
//! Policy tables, the scoring engine, explanations, substitute advice and
//! recipe aggregation. Everything here is synchronous and side-effect free
//! apart from tracing; the tables are immutable statics safe to share across
//! threads.

pub mod aggregation;
pub mod alternatives;
pub mod engine;
pub mod explanation;
pub mod policy;

pub use aggregation::{
    aggregate, benefits, dietary_label, guidance, macro_breakdown, net_carbs, nutrient_density,
    per_serving, warnings, MacroBreakdown, RecipeAggregate,
};
pub use alternatives::{alternatives, find_substitutes, substitutes, MatchKind, Substitute, SubstituteMatch};
pub use engine::{score, score_for, score_many, score_with_policy};
pub use explanation::{explain, explain_for, ExplanationTag, Justification};
pub use policy::{policy_for, SurgeryPolicy, POLICIES};

/// Format a nutrient amount for display: at most one decimal, no trailing ".0"
pub(crate) fn format_amount(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(30.0), "30");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(0.30000000000000004), "0.3");
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(0.0), "0");
    }
}
