//! Tools module
//!
//! MCP tool implementations for the bariatric food scorer.

pub mod recipes;
pub mod scoring;
pub mod status;
