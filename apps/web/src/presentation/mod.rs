// Pure view-model layer: no I/O, no shared state.
// Pages render what this module produces; the JSON API serializes it as-is.

pub mod ats_score;
pub mod sections;
pub mod segmenter;
