//! Surgery type
//!
//! Canonical surgery variants and the single normalizer that maps free-form
//! surgery strings onto them. Scoring, explanations and guidance all resolve
//! through [`SurgeryType::resolve`].

use serde::{Deserialize, Serialize};

/// Bariatric surgery variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurgeryType {
    GastricBypass,
    Sleeve,
    GastricBand,
    BpdDs,
    MiniBypass,
    #[default]
    Unspecified,
}

/// Strings that explicitly select the general policy
const GENERAL_SENTINELS: &[&str] = &["not specified", "other (default scoring)"];

/// Ordered alias table. Rows are tried top to bottom and the first row with an
/// alias whose words appear consecutively in the input wins, so more specific
/// variants ("mini bypass") must precede broader ones ("bypass"). Punctuation
/// separates words: "lap-band" and "lap band" are the same alias.
const ALIASES: &[(SurgeryType, &[&str])] = &[
    (
        SurgeryType::MiniBypass,
        &["mini gastric", "mini bypass", "one anastomosis", "oagb", "mgb"],
    ),
    (
        SurgeryType::BpdDs,
        &["duodenal switch", "biliopancreatic", "bpd"],
    ),
    (
        SurgeryType::GastricBypass,
        &["gastric bypass", "roux-en-y", "rygb", "bypass"],
    ),
    (SurgeryType::Sleeve, &["sleeve", "vsg"]),
    (
        SurgeryType::GastricBand,
        &["gastric band", "lap-band", "lapband", "band"],
    ),
];

impl SurgeryType {
    /// All variants, named ones first
    pub const ALL: [SurgeryType; 6] = [
        SurgeryType::GastricBypass,
        SurgeryType::Sleeve,
        SurgeryType::GastricBand,
        SurgeryType::BpdDs,
        SurgeryType::MiniBypass,
        SurgeryType::Unspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurgeryType::GastricBypass => "gastric_bypass",
            SurgeryType::Sleeve => "sleeve",
            SurgeryType::GastricBand => "gastric_band",
            SurgeryType::BpdDs => "bpd_ds",
            SurgeryType::MiniBypass => "mini_bypass",
            SurgeryType::Unspecified => "unspecified",
        }
    }

    /// Resolve a caller-supplied surgery string.
    ///
    /// Never fails: absent, empty, sentinel and unrecognized inputs all
    /// resolve to [`SurgeryType::Unspecified`].
    pub fn resolve(input: Option<&str>) -> Self {
        let normalized = match input {
            Some(s) => s.trim().to_lowercase(),
            None => return SurgeryType::Unspecified,
        };

        if normalized.is_empty() || GENERAL_SENTINELS.contains(&normalized.as_str()) {
            return SurgeryType::Unspecified;
        }

        // Canonical identifiers round-trip ("bpd_ds", "gastric_bypass", ...)
        if let Some(variant) = Self::ALL.iter().find(|v| v.as_str() == normalized) {
            return *variant;
        }

        let input_words: Vec<&str> = words(&normalized).collect();
        for (variant, aliases) in ALIASES {
            if aliases.iter().any(|alias| contains_phrase(&input_words, alias)) {
                return *variant;
            }
        }

        tracing::warn!(
            surgery_type = %normalized,
            "Unrecognized surgery type, using general scoring"
        );
        SurgeryType::Unspecified
    }
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

/// True when the words of `phrase` occur consecutively in `input_words`
fn contains_phrase(input_words: &[&str], phrase: &str) -> bool {
    let phrase: Vec<&str> = words(phrase).collect();
    !phrase.is_empty()
        && input_words
            .windows(phrase.len())
            .any(|window| window == phrase.as_slice())
}
