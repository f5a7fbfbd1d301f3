//! Results sections: the fixed set of collapsible analysis panels, their
//! formatters, and the per-section expanded flags.

use serde::Serialize;

use crate::models::analysis::{AnalysisMetadata, AnalysisResult, AnalysisSections};
use crate::presentation::ats_score::{format_ats_score, AtsScoreView};
use crate::presentation::segmenter::{segment, SectionGroup, SegmentStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Ats,
    Career,
    Skills,
    Optimization,
    Action,
}

impl SectionKind {
    /// Display order on the results page.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Ats,
        SectionKind::Career,
        SectionKind::Skills,
        SectionKind::Optimization,
        SectionKind::Action,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SectionKind::Ats => "ats",
            SectionKind::Career => "career",
            SectionKind::Skills => "skills",
            SectionKind::Optimization => "optimization",
            SectionKind::Action => "action",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Ats => "ATS Compatibility Score",
            SectionKind::Career => "Career Trajectory",
            SectionKind::Skills => "Skills Analysis",
            SectionKind::Optimization => "Resume Enhancement Suggestions",
            SectionKind::Action => "Action Plan",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SectionKind::Ats => "◔",
            SectionKind::Career => "⌂",
            SectionKind::Skills => "</>",
            SectionKind::Optimization => "☰",
            SectionKind::Action => "◎",
        }
    }

    fn index(self) -> usize {
        match self {
            SectionKind::Ats => 0,
            SectionKind::Career => 1,
            SectionKind::Skills => 2,
            SectionKind::Optimization => 3,
            SectionKind::Action => 4,
        }
    }

    /// Runs this section's formatter over the payload.
    pub fn format(self, result: &AnalysisResult, sections: &AnalysisSections) -> SectionBody {
        let text = |field: &Option<String>, style| {
            field
                .as_deref()
                .map(|t| SectionBody::Groups(segment(t, style)))
                .filter(|body| !body.is_empty())
                .unwrap_or(SectionBody::Empty)
        };

        match self {
            SectionKind::Ats => result
                .ats_score
                .as_ref()
                .map(|score| SectionBody::Score(format_ats_score(score)))
                .unwrap_or(SectionBody::Empty),
            SectionKind::Career => text(&sections.career_trajectory, SegmentStyle::Narrative),
            SectionKind::Skills => text(&sections.skills_analysis, SegmentStyle::Narrative),
            SectionKind::Optimization => {
                text(&sections.resume_optimization, SegmentStyle::Enhancement)
            }
            SectionKind::Action => text(&sections.action_plan, SegmentStyle::ActionPlan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SectionBody {
    Score(AtsScoreView),
    Groups(Vec<SectionGroup>),
    Empty,
}

impl SectionBody {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionBody::Groups(groups) => groups.is_empty(),
            SectionBody::Empty => true,
            SectionBody::Score(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub kind: SectionKind,
    pub title: &'static str,
    pub body: SectionBody,
}

/// Everything the results page needs once the analysis has arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sections: Vec<SectionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnalysisMetadata>,
}

/// Formats every section, or `None` while the analysis sections are absent.
pub fn build_report(result: &AnalysisResult) -> Option<Report> {
    let sections = result.sections()?;
    let views = SectionKind::ALL
        .into_iter()
        .map(|kind| SectionView {
            kind,
            title: kind.title(),
            body: kind.format(result, sections),
        })
        .collect();

    Some(Report {
        sections: views,
        metadata: result.metadata.clone(),
    })
}

/// Expanded flag per section. Owned by the results view and carried in the
/// page URL, so every toggle is a plain link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionState {
    expanded: [bool; 5],
}

impl Default for SectionState {
    fn default() -> Self {
        Self::collapsed().toggled(SectionKind::Ats)
    }
}

impl SectionState {
    pub fn collapsed() -> Self {
        Self {
            expanded: [false; 5],
        }
    }

    pub fn is_expanded(&self, kind: SectionKind) -> bool {
        self.expanded[kind.index()]
    }

    pub fn toggle(&mut self, kind: SectionKind) {
        let flag = &mut self.expanded[kind.index()];
        *flag = !*flag;
    }

    pub fn toggled(mut self, kind: SectionKind) -> Self {
        self.toggle(kind);
        self
    }

    /// Parses the `open` query value: comma-separated section ids.
    /// `None` means no preference (default state); unknown ids are ignored.
    pub fn from_query(open: Option<&str>) -> Self {
        let Some(open) = open else {
            return Self::default();
        };
        let mut state = Self::collapsed();
        for kind in open.split(',').filter_map(|id| SectionKind::from_id(id.trim())) {
            state.expanded[kind.index()] = true;
        }
        state
    }

    pub fn to_query(&self) -> String {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| self.is_expanded(*kind))
            .map(SectionKind::id)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{AnalysisEnvelope, AtsScore};
    use crate::presentation::segmenter::ContentBlock;

    fn result_with(sections: AnalysisSections) -> AnalysisResult {
        AnalysisResult {
            ats_score: Some(AtsScore::Plain(73.0)),
            analysis: Some(AnalysisEnvelope {
                analysis: Some(sections),
                extracted_content: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_section_ids_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(SectionKind::from_id("nope"), None);
    }

    #[test]
    fn test_default_state_expands_only_ats() {
        let state = SectionState::default();
        assert!(state.is_expanded(SectionKind::Ats));
        for kind in &SectionKind::ALL[1..] {
            assert!(!state.is_expanded(*kind));
        }
    }

    #[test]
    fn test_toggle_flips_exactly_one_key() {
        let before = SectionState::default();
        let after = before.toggled(SectionKind::Skills);
        for kind in SectionKind::ALL {
            let expected = if kind == SectionKind::Skills {
                !before.is_expanded(kind)
            } else {
                before.is_expanded(kind)
            };
            assert_eq!(after.is_expanded(kind), expected);
        }
        assert_eq!(after.toggled(SectionKind::Skills), before);
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!(SectionState::from_query(None), SectionState::default());
        assert_eq!(SectionState::from_query(Some("")), SectionState::collapsed());

        let state = SectionState::from_query(Some("skills, action,bogus"));
        assert!(state.is_expanded(SectionKind::Skills));
        assert!(state.is_expanded(SectionKind::Action));
        assert!(!state.is_expanded(SectionKind::Ats));
        assert_eq!(state.to_query(), "skills,action");
    }

    #[test]
    fn test_query_round_trip() {
        let state = SectionState::default()
            .toggled(SectionKind::Career)
            .toggled(SectionKind::Optimization);
        assert_eq!(SectionState::from_query(Some(&state.to_query())), state);
    }

    #[test]
    fn test_report_absent_while_loading() {
        assert!(build_report(&AnalysisResult::default()).is_none());
        let only_score = AnalysisResult {
            ats_score: Some(AtsScore::Plain(80.0)),
            ..Default::default()
        };
        assert!(build_report(&only_score).is_none());
    }

    #[test]
    fn test_report_binds_each_section_to_its_formatter() {
        let report = build_report(&result_with(AnalysisSections {
            career_trajectory: Some("1. Growth\nPromoted twice".into()),
            skills_analysis: None,
            resume_optimization: Some("1. Metrics\nExample: Cut costs 20%".into()),
            action_plan: Some("1. Now\n• Update LinkedIn".into()),
        }))
        .unwrap();

        let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());

        match &report.sections[0].body {
            SectionBody::Score(view) => assert_eq!(view.value, 73),
            other => panic!("expected score, got {other:?}"),
        }
        assert_eq!(report.sections[2].body, SectionBody::Empty);

        let SectionBody::Groups(optimization) = &report.sections[3].body else {
            panic!("expected groups");
        };
        assert_eq!(
            optimization[0].items,
            vec![ContentBlock::Example("Cut costs 20%".into())]
        );

        let SectionBody::Groups(action) = &report.sections[4].body else {
            panic!("expected groups");
        };
        assert_eq!(
            action[0].items,
            vec![ContentBlock::Bullet("Update LinkedIn".into())]
        );
    }

    #[test]
    fn test_blank_section_text_is_empty_body() {
        let report = build_report(&result_with(AnalysisSections {
            career_trajectory: Some("   \n".into()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(report.sections[1].body, SectionBody::Empty);
    }
}
