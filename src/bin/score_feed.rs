//! Score a JSON feed of foods from a file
//!
//! Input is a JSON array of `{ "name", "surgery_type", "profile" }` objects.
//! Prints one JSON line per item with its score and band.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use bariscore::models::{NutrientProfile, SurgeryType};
use bariscore::scoring;

#[derive(Debug, Deserialize)]
struct FeedItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    surgery_type: Option<String>,
    profile: NutrientProfile,
}

#[derive(Debug, Serialize)]
struct FeedScore<'a> {
    index: usize,
    name: Option<&'a str>,
    surgery: SurgeryType,
    score: u8,
    band: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: score_feed <feed.json>")?;

    let contents = std::fs::read_to_string(&path)?;
    let items: Vec<FeedItem> = serde_json::from_str(&contents)?;
    eprintln!("Scoring {} items from {}", items.len(), path.display());

    for (index, item) in items.iter().enumerate() {
        if let Err(e) = item.profile.validate() {
            eprintln!("  Skipping item {}: {}", index, e);
            continue;
        }

        let surgery = SurgeryType::resolve(item.surgery_type.as_deref());
        let score = scoring::score_for(&item.profile, surgery);
        let line = FeedScore {
            index,
            name: item.name.as_deref(),
            surgery,
            score: score.value(),
            band: score.band().as_str(),
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}
