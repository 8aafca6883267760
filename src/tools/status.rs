//! Status Tool
//!
//! Runtime status of the scoring service and the usage guide served to MCP
//! clients.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::SurgeryType;
use crate::scoring::alternatives::SUBSTITUTES;
use crate::scoring::POLICIES;

/// Scoring instructions for AI assistants
pub const SCORING_INSTRUCTIONS: &str = r#"
# Bariatric Food Scoring Instructions

Scores foods and recipes from 0 to 100 for people after bariatric surgery.

## Nutrient Profiles

Every tool that takes a food needs a nutrient profile. Use one basis
consistently (per 100g OR per serving) across all items you compare.

| Field | Unit | Required |
|-------|------|----------|
| calories | kcal | yes |
| fat | g | yes |
| sugar | g | yes |
| sodium | mg | yes |
| protein, fiber, carbohydrates, saturated_fat, monounsaturated_fat, trans_fat | g | no |
| potassium, iron, calcium, cholesterol, vitamin_e | mg | no |
| vitamin_b12, vitamin_d, vitamin_a, vitamin_k, folate, cobalt | ug | no |

**Leave unknown fields out.** A missing value is "unknown", not zero.
Reporting `protein: 0` for a food whose protein you do not know will
lower its score.

## Surgery Types

Pass the patient's surgery as free text in `surgery_type`. Recognized:
- Gastric Bypass / Roux-en-Y / RYGB
- Sleeve Gastrectomy / VSG
- Gastric Band / Lap-Band
- BPD/DS / Duodenal Switch
- Mini Gastric Bypass / OAGB

Anything else (or nothing) uses general scoring.

## Score Bands

| Score | Band |
|-------|------|
| 0-25 | Poor |
| 26-49 | Fair |
| 50-74 | Good |
| 75-100 | Excellent |

## Typical Workflow

1. `food_report` for a single food: score, reasons, and suggestions.
2. `analyze_recipe` for a meal or recipe: pass every ingredient's profile
   (already scaled to the quantity used) and the number of servings.
3. `find_substitutes` when the user asks what to use instead of an
   ingredient.
"#;

/// Service status
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub default_surgery: SurgeryType,
    pub policy_count: usize,
    pub substitute_keys: usize,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for the service
pub struct StatusTracker {
    start_time: Instant,
    default_surgery: SurgeryType,
}

impl StatusTracker {
    pub fn new(default_surgery: SurgeryType) -> Self {
        Self {
            start_time: Instant::now(),
            default_surgery,
        }
    }

    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            default_surgery: self.default_surgery,
            policy_count: POLICIES.len(),
            substitute_keys: SUBSTITUTES.len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
