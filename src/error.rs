//! Engine error types

use thiserror::Error;

/// Errors raised by the fallible engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("servings must be greater than 0 (got {0})")]
    InvalidServings(i64),

    #[error("nutrient '{field}' must be a finite, non-negative number (got {value})")]
    InvalidNutrient { field: &'static str, value: f64 },

    #[error("a recipe needs at least one item")]
    EmptyRecipe,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
