//! Results page: loading placeholder, failure notice, or the five collapsible
//! analysis sections.

use uuid::Uuid;

use crate::pages::layout::{html_escape, render_page, Head};
use crate::presentation::ats_score::AtsScoreView;
use crate::presentation::sections::{build_report, Report, SectionBody, SectionState, SectionView};
use crate::presentation::segmenter::{ContentBlock, SectionGroup};
use crate::store::{AnalysisRecord, AnalysisStatus};

pub const LOADING_MESSAGE: &str = "Analyzing your resume...";

/// Picks the right view for a stored analysis.
pub fn results_page(record: &AnalysisRecord, state: SectionState, poll_secs: u64) -> String {
    match &record.status {
        AnalysisStatus::Pending => loading_page(poll_secs),
        AnalysisStatus::Failed(message) => failure_page(&record.file_name, message),
        AnalysisStatus::Ready(result) => match build_report(result) {
            Some(report) => report_page(record.id, &report, state),
            None => loading_page(poll_secs),
        },
    }
}

pub fn loading_page(poll_secs: u64) -> String {
    let head = Head {
        refresh_secs: Some(poll_secs.max(1)),
    };
    let body = format!(r#"<main class="loading" role="status">{LOADING_MESSAGE}</main>"#);
    render_page("Analyzing…", &head, &body)
}

pub fn failure_page(file_name: &str, message: &str) -> String {
    let body = format!(
        r#"<main class="container">
<div class="failure">
<h1>We couldn't analyze {file}</h1>
<p>{message}</p>
</div>
<a class="button button-wide" href="/analyze">Try Another Resume</a>
</main>"#,
        file = html_escape(file_name),
        message = html_escape(message),
    );
    render_page("Analysis failed", &Head::default(), &body)
}

pub fn report_page(id: Uuid, report: &Report, state: SectionState) -> String {
    let sections: String = report
        .sections
        .iter()
        .map(|section| render_section(id, section, state))
        .collect();

    let meta = report
        .metadata
        .as_ref()
        .and_then(|m| m.processing_time_seconds)
        .map(|secs| format!(r#"<p class="meta muted">Analyzed in {secs:.1}s</p>"#))
        .unwrap_or_default();

    let body = format!(
        r#"<main class="container">
<div class="results-title">
<h1>Resume Analysis Results</h1>
<p class="muted">Personalized insights and growth roadmap crafted for you</p>
</div>
{sections}
{meta}
<a class="button button-wide" href="/analyze">Analyze Another Resume</a>
</main>"#
    );

    render_page("Resume Analysis Results", &Head::default(), &body)
}

fn render_section(id: Uuid, section: &SectionView, state: SectionState) -> String {
    let kind = section.kind;
    let expanded = state.is_expanded(kind);
    let href = format!("/analyze/{id}?open={}", state.toggled(kind).to_query());
    let chevron = if expanded { "▲" } else { "▼" };

    let body = if expanded {
        format!(
            r#"<div class="section-body" id="{sid}-content">{content}</div>"#,
            sid = kind.id(),
            content = render_body(&section.body),
        )
    } else {
        String::new()
    };

    format!(
        r##"<section class="section" id="{sid}">
<a class="section-toggle" href="{href}#{sid}" aria-expanded="{expanded}" aria-controls="{sid}-content">
<span><span class="section-icon">{icon}</span><h2 style="display: inline">{title}</h2></span>
<span>{chevron}</span>
</a>
{body}
</section>"##,
        sid = kind.id(),
        href = html_escape(&href),
        icon = html_escape(kind.icon()),
        title = html_escape(section.title),
    )
}

fn render_body(body: &SectionBody) -> String {
    match body {
        SectionBody::Score(view) => render_score(view),
        SectionBody::Groups(groups) => groups.iter().map(render_group).collect(),
        SectionBody::Empty => {
            r#"<p class="muted">No insights were returned for this section.</p>"#.to_string()
        }
    }
}

fn render_score(view: &AtsScoreView) -> String {
    let breakdown = if view.breakdown.is_empty() {
        String::new()
    } else {
        let items: String = view
            .breakdown
            .iter()
            .map(|entry| {
                format!(
                    r#"<li><span class="breakdown-label">{}:</span> {}</li>"#,
                    html_escape(&entry.label),
                    html_escape(&entry.explanation)
                )
            })
            .collect();
        format!("<h4>Score Breakdown:</h4><ul>{items}</ul>")
    };

    format!(
        r#"<div class="score">
<div class="score-ring {tier_class}">{value}%</div>
<div>
<p class="tier-label">Rating: {tier_label}</p>
<h3>What this means:</h3>
<p>{message}</p>
<p class="muted">This score reflects how well your resume matches industry-standard keywords, formatting requirements, and ATS-friendly structure.</p>
{breakdown}
</div>
</div>"#,
        tier_class = view.tier.css_class(),
        tier_label = view.tier.label(),
        value = view.value,
        message = html_escape(view.message),
    )
}

fn render_group(group: &SectionGroup) -> String {
    let items: String = group.items.iter().map(render_block).collect();
    format!(
        r#"<div class="group"><h3>{}</h3>{items}</div>"#,
        html_escape(&group.title)
    )
}

fn render_block(block: &ContentBlock) -> String {
    let content = html_escape(block.content());
    match block {
        ContentBlock::Heading(_) => format!(r#"<h4 class="block-heading">{content}</h4>"#),
        ContentBlock::Bullet(_) => format!(r#"<p class="block-bullet">{content}</p>"#),
        ContentBlock::Text(_) => format!(r#"<p class="block-text">{content}</p>"#),
        ContentBlock::Example(_) => {
            format!(r#"<div class="block-example"><p>{content}</p></div>"#)
        }
        ContentBlock::SubItem(_) => {
            format!(r#"<div class="block-sub-item"><p>{content}</p></div>"#)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{
        AnalysisEnvelope, AnalysisMetadata, AnalysisResult, AnalysisSections, AtsScore,
    };
    use crate::presentation::sections::SectionKind;
    use chrono::Utc;

    fn record(status: AnalysisStatus) -> AnalysisRecord {
        AnalysisRecord {
            id: Uuid::nil(),
            file_name: "resume.pdf".to_string(),
            submitted_at: Utc::now(),
            status,
        }
    }

    fn ready_result() -> AnalysisResult {
        AnalysisResult {
            ats_score: serde_json::from_str(
                r#"{"score": 91.6, "breakdown": {"keyword_match": "strong <b>"}}"#,
            )
            .ok(),
            analysis: Some(AnalysisEnvelope {
                analysis: Some(AnalysisSections {
                    career_trajectory: Some("1. Growth\nPromoted <twice>".into()),
                    skills_analysis: Some("1. Technical\nRust & Go".into()),
                    resume_optimization: Some("1. Impact\nExample: Cut costs 20%\na) Add metrics".into()),
                    action_plan: Some("1. Now\nFocus: visibility\n• Update LinkedIn".into()),
                }),
                extracted_content: None,
            }),
            metadata: Some(AnalysisMetadata {
                processing_time_seconds: Some(12.34),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pending_shows_loading_with_refresh() {
        let html = results_page(&record(AnalysisStatus::Pending), SectionState::default(), 3);
        assert!(html.contains(LOADING_MESSAGE));
        assert!(html.contains(r#"content="3""#));
    }

    #[test]
    fn test_ready_without_nested_analysis_shows_loading() {
        let partial = AnalysisResult {
            ats_score: Some(AtsScore::Plain(70.0)),
            analysis: Some(AnalysisEnvelope::default()),
            ..Default::default()
        };
        let html = results_page(
            &record(AnalysisStatus::Ready(Box::new(partial))),
            SectionState::default(),
            3,
        );
        assert!(html.contains(LOADING_MESSAGE));
        assert!(!html.contains("Resume Analysis Results"));
    }

    #[test]
    fn test_failure_shows_message_escaped() {
        let html = results_page(
            &record(AnalysisStatus::Failed("PDF <extraction> failed".into())),
            SectionState::default(),
            3,
        );
        assert!(html.contains("PDF &lt;extraction&gt; failed"));
        assert!(!html.contains(LOADING_MESSAGE));
        assert!(html.contains(r#"href="/analyze""#));
    }

    #[test]
    fn test_default_state_renders_only_ats_body() {
        let html = results_page(
            &record(AnalysisStatus::Ready(Box::new(ready_result()))),
            SectionState::default(),
            3,
        );
        assert!(html.contains("Resume Analysis Results"));
        for kind in SectionKind::ALL {
            assert!(html.contains(kind.title()));
        }
        assert!(html.contains(r#"id="ats-content""#));
        assert!(!html.contains(r#"id="career-content""#));
        assert!(html.contains(r#"<div class="score-ring tier-excellent">92%</div>"#));
        assert!(html.contains(r#"<p class="tier-label">Rating: excellent</p>"#));
        assert!(html.contains(r#"<span class="breakdown-label">keyword match:</span> strong &lt;b&gt;"#));
        assert!(html.contains("Analyzed in 12.3s"));
    }

    #[test]
    fn test_toggle_links_flip_one_section() {
        let html = report_page(
            Uuid::nil(),
            &build_report(&ready_result()).unwrap(),
            SectionState::default(),
        );
        let id = Uuid::nil();
        // Collapsing ATS leaves nothing open; opening skills keeps ATS open.
        assert!(html.contains(&format!(r#"href="/analyze/{id}?open=#ats""#)));
        assert!(html.contains(&format!(r#"href="/analyze/{id}?open=ats,skills#skills""#)));
        assert!(html.contains(r#"aria-expanded="true" aria-controls="ats-content""#));
        assert!(html.contains(r#"aria-expanded="false" aria-controls="career-content""#));
    }

    #[test]
    fn test_expanded_sections_render_classified_blocks() {
        let state = SectionState::collapsed()
            .toggled(SectionKind::Career)
            .toggled(SectionKind::Optimization)
            .toggled(SectionKind::Action);
        let html = report_page(Uuid::nil(), &build_report(&ready_result()).unwrap(), state);

        assert!(!html.contains("score-ring tier"));
        assert!(html.contains(r#"<p class="block-text">Promoted &lt;twice&gt;</p>"#));
        assert!(html.contains(r#"<div class="block-example"><p>Cut costs 20%</p></div>"#));
        assert!(html.contains(r#"<div class="block-sub-item"><p>a) Add metrics</p></div>"#));
        assert!(html.contains(r#"<h4 class="block-heading">Focus: visibility</h4>"#));
        assert!(html.contains(r#"<p class="block-bullet">Update LinkedIn</p>"#));
        assert!(html.contains("<h3>1. Now</h3>"));
    }

    #[test]
    fn test_missing_section_text_renders_placeholder() {
        let mut result = ready_result();
        if let Some(sections) = result.analysis.as_mut().and_then(|a| a.analysis.as_mut()) {
            sections.skills_analysis = None;
        }
        let state = SectionState::collapsed().toggled(SectionKind::Skills);
        let html = report_page(Uuid::nil(), &build_report(&result).unwrap(), state);
        assert!(html.contains("No insights were returned for this section."));
    }
}
