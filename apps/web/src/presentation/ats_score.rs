//! ATS score formatting — turns the backend score into a display record.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::models::analysis::AtsScore;

/// Score band, selected on the unrounded score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreTier {
    /// Lower bounds, highest first. Anything below the last band needs work.
    const BANDS: [(f64, ScoreTier); 4] = [
        (85.0, ScoreTier::Excellent),
        (70.0, ScoreTier::VeryGood),
        (55.0, ScoreTier::Good),
        (40.0, ScoreTier::Fair),
    ];

    pub fn for_score(score: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, tier)| *tier)
            .unwrap_or(ScoreTier::NeedsWork)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::VeryGood => "very good",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::NeedsWork => "needs work",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! Your resume is highly optimized for ATS systems.",
            ScoreTier::VeryGood => {
                "Very good. Your resume is well-optimized for ATS systems with minor improvements possible."
            }
            ScoreTier::Good => {
                "Good. Your resume has moderate ATS compatibility but could use targeted improvements."
            }
            ScoreTier::Fair => {
                "Fair. Your resume needs several improvements to pass through ATS filters effectively."
            }
            ScoreTier::NeedsWork => {
                "Needs work. Your resume requires significant optimization to be compatible with ATS systems."
            }
        }
    }

    /// CSS modifier used for the score ring colour.
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "tier-excellent",
            ScoreTier::VeryGood => "tier-very-good",
            ScoreTier::Good => "tier-good",
            ScoreTier::Fair => "tier-fair",
            ScoreTier::NeedsWork => "tier-needs-work",
        }
    }
}

/// Serialized as its display label, e.g. `"very good"`.
impl Serialize for ScoreTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsScoreView {
    /// Rounded percentage, clamped to 0..=100.
    pub value: u8,
    pub tier: ScoreTier,
    pub message: &'static str,
    pub breakdown: Vec<BreakdownEntry>,
}

pub fn format_ats_score(score: &AtsScore) -> AtsScoreView {
    let raw = score.score();
    let tier = ScoreTier::for_score(raw);

    let breakdown = score
        .breakdown()
        .map(|map| {
            map.iter()
                .map(|(category, explanation)| BreakdownEntry {
                    label: category.replace('_', " "),
                    explanation: explanation_text(explanation),
                })
                .collect()
        })
        .unwrap_or_default();

    AtsScoreView {
        value: raw.round().clamp(0.0, 100.0) as u8,
        tier,
        message: tier.message(),
        breakdown,
    }
}

fn explanation_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
