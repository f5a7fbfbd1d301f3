//! Wire types for the payload returned by the resume analysis backend.
//!
//! Every field is optional: the page layer must cope with partial payloads and
//! only reach nested text through the accessors below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level analysis payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, alias = "atsScore", skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<AtsScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisEnvelope>,
    #[serde(
        default,
        alias = "extractedContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub extracted_content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnalysisMetadata>,
}

impl AnalysisResult {
    /// The AI-written sections, if the backend has produced them.
    pub fn sections(&self) -> Option<&AnalysisSections> {
        self.analysis.as_ref()?.analysis.as_ref()
    }
}

/// The backend nests the AI sections one level below `analysis`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisSections>,
    #[serde(
        default,
        alias = "extractedContent",
        skip_serializing_if = "Option::is_none"
    )]
    pub extracted_content: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSections {
    #[serde(default, alias = "careerTrajectory")]
    pub career_trajectory: Option<String>,
    #[serde(default, alias = "skillsAnalysis")]
    pub skills_analysis: Option<String>,
    #[serde(default, alias = "resumeOptimization")]
    pub resume_optimization: Option<String>,
    #[serde(default, alias = "actionPlan")]
    pub action_plan: Option<String>,
}

/// ATS score as sent by the backend: older revisions send a bare number,
/// newer ones an object with a per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtsScore {
    Plain(f64),
    Detailed(DetailedAtsScore),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAtsScore {
    pub score: f64,
    /// Category name → explanation, in the order the backend sent them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_threshold: Option<bool>,
}

impl AtsScore {
    pub fn score(&self) -> f64 {
        match self {
            AtsScore::Plain(score) => *score,
            AtsScore::Detailed(detailed) => detailed.score,
        }
    }

    pub fn breakdown(&self) -> Option<&Map<String, Value>> {
        match self {
            AtsScore::Plain(_) => None,
            AtsScore::Detailed(detailed) => detailed.breakdown.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
