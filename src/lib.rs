//! Bariatric Food Scorer Library
//!
//! Scores foods and recipes (0-100) against post-bariatric-surgery dietary
//! policies, explains the score, and suggests substitutes.

pub mod build_info;
pub mod error;
pub mod mcp;
pub mod models;
pub mod scoring;
pub mod tools;

pub use error::{EngineError, EngineResult};
