use crate::pages::layout::{html_escape, render_page, Head};
use crate::pages::reveal::{reveal_words, RevealOptions};

const HEADLINE: &str = "Supercharge Your Job Search";
const HEADLINE_ACCENT: &str = "with AI";
const LEAD: &str = "Upload your resume and let our AI analyze it. Get accurate feedback on \
    your skills, experience, and ways to stand out to recruiters.";

struct Feature {
    title: &'static str,
    blurb: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        title: "Smart Analysis",
        blurb: "Our AI analyzes your resume's content, structure, and impact.",
    },
    Feature {
        title: "Instant Feedback",
        blurb: "Get immediate insights and suggestions to improve your resume.",
    },
    Feature {
        title: "AI-Powered",
        blurb: "Leveraging advanced AI to help you land your dream job.",
    },
];

/// GET / — hero, resume mock-up and feature grid.
pub fn landing_page() -> String {
    let features: String = FEATURES
        .iter()
        .map(|f| {
            format!(
                r#"<div class="feature"><h3>{}</h3><p>{}</p></div>"#,
                html_escape(f.title),
                html_escape(f.blurb)
            )
        })
        .collect();

    let body = format!(
        r#"<main class="container">
<section class="hero">
<div class="hero-text">
<h1><span class="accent-blue">{headline}</span> <span class="accent-violet">{accent}</span></h1>
<p class="lead">{lead}</p>
<a class="button" href="/analyze">Analyze Resume →</a>
</div>
<div class="hero-mock">{mock}</div>
</section>
<section class="features">{features}</section>
</main>"#,
        headline = reveal_words(HEADLINE, RevealOptions::default()),
        accent = html_escape(HEADLINE_ACCENT),
        lead = html_escape(LEAD),
        mock = resume_mock(),
    );

    render_page("ResumeAnalyzer — AI resume feedback", &Head::default(), &body)
}

fn resume_mock() -> &'static str {
    r#"<div class="mock">
<div class="mock-line title"></div>
<div class="mock-line"></div>
<div class="mock-line"></div>
<div class="mock-line" style="width: 83%"></div>
<div class="mock-line glow"></div>
<div class="mock-line glow" style="width: 83%"></div>
<div class="mock-line glow" style="width: 80%"></div>
</div>"#
}
