//! Analysis-text segmenter — splits loosely structured AI output into display blocks.
//!
//! The backend writes each section as numbered items ("1. Title") followed by
//! free lines, some of them bulleted, labelled ("Example: …") or lettered
//! ("a) …"). `segment` turns that blob into ordered groups of typed blocks.
//! Pure and total: any input yields a (possibly empty) result.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A line starting a new numbered item: ASCII digits, a period, a space or tab.
static ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[0-9]+\.[ \t]").unwrap());

/// A lettered sub-item such as "a) Quantify results".
static LETTERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]\)").unwrap());

pub const BULLET_GLYPH: char = '•';
const EXAMPLE_LABEL: &str = "Example:";

/// One classified body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading(String),
    Bullet(String),
    Text(String),
    Example(String),
    /// Lettered sub-item, shown as plain text but set apart from its neighbours.
    SubItem(String),
}

impl ContentBlock {
    pub fn content(&self) -> &str {
        match self {
            ContentBlock::Heading(s)
            | ContentBlock::Bullet(s)
            | ContentBlock::Text(s)
            | ContentBlock::Example(s)
            | ContentBlock::SubItem(s) => s,
        }
    }
}

/// A numbered item: its title line and the classified lines under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionGroup {
    pub title: String,
    pub items: Vec<ContentBlock>,
}

/// Which classification rules apply. Each analysis section is written in a
/// slightly different shape, so each gets its own rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStyle {
    /// Career trajectory and skills analysis: every body line is text.
    Narrative,
    /// Resume optimization: "Example:" call-outs and lettered sub-items.
    Enhancement,
    /// Action plan: colon headings and bullets.
    ActionPlan,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Heading,
    Bullet,
    Example,
    SubItem,
}

impl SegmentStyle {
    /// Rules in priority order; the first match wins, anything else is text.
    fn rules(self) -> &'static [Rule] {
        match self {
            SegmentStyle::Narrative => &[],
            SegmentStyle::Enhancement => &[Rule::Example, Rule::SubItem],
            SegmentStyle::ActionPlan => &[Rule::Heading, Rule::Bullet],
        }
    }
}

impl Rule {
    fn apply(self, line: &str) -> Option<ContentBlock> {
        match self {
            Rule::Heading => (line.contains(':') && !line.starts_with(BULLET_GLYPH))
                .then(|| ContentBlock::Heading(line.to_string())),
            Rule::Bullet => line
                .strip_prefix(BULLET_GLYPH)
                .map(|rest| ContentBlock::Bullet(rest.trim_start().to_string())),
            Rule::Example => line
                .strip_prefix(EXAMPLE_LABEL)
                .map(|rest| ContentBlock::Example(rest.trim().to_string())),
            Rule::SubItem => LETTERED_ITEM
                .is_match(line)
                .then(|| ContentBlock::SubItem(line.to_string())),
        }
    }
}

/// Splits `text` into numbered groups and classifies their body lines.
///
/// Text before the first numbered marker forms its own group. Blank lines are
/// dropped. Empty input yields no groups.
pub fn segment(text: &str, style: SegmentStyle) -> Vec<SectionGroup> {
    split_items(text)
        .into_iter()
        .filter_map(|chunk| build_group(chunk, style))
        .collect()
}

/// Classifies a single body line under `style`.
pub fn classify(line: &str, style: SegmentStyle) -> ContentBlock {
    let line = line.trim();
    style
        .rules()
        .iter()
        .find_map(|rule| rule.apply(line))
        .unwrap_or_else(|| ContentBlock::Text(line.to_string()))
}

fn split_items(text: &str) -> Vec<&str> {
    let mut bounds: Vec<usize> = ITEM_MARKER.find_iter(text).map(|m| m.start()).collect();
    if bounds.first() != Some(&0) {
        bounds.insert(0, 0);
    }
    bounds.push(text.len());
    bounds.windows(2).map(|w| &text[w[0]..w[1]]).collect()
}

fn build_group(chunk: &str, style: SegmentStyle) -> Option<SectionGroup> {
    let mut lines = chunk.lines().filter(|line| !line.trim().is_empty());
    let title = lines.next()?.trim_end().to_string();
    let items = lines.map(|line| classify(line, style)).collect();
    Some(SectionGroup { title, items })
}
