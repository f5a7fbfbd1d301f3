//! Shared page shell: document head, stylesheet, site header.

pub const SITE_NAME: &str = "ResumeAnalyzer";

/// Escapes text for use in element content and double- or single-quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Extra `<head>` content for a page, e.g. an auto-refresh while loading.
#[derive(Debug, Default, Clone)]
pub struct Head {
    pub refresh_secs: Option<u64>,
}

pub fn render_page(title: &str, head: &Head, body: &str) -> String {
    let refresh = head
        .refresh_secs
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs}">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title}</title>
<style>{STYLESHEET}</style>
</head>
<body>
{header}
{body}
</body>
</html>"#,
        title = html_escape(title),
        header = site_header(),
    )
}

fn site_header() -> String {
    format!(
        r#"<header class="site-header">
<a class="brand" href="/">✦ {SITE_NAME}</a>
<nav><a class="nav-link" href="/analyze">Analyze</a></nav>
</header>"#
    )
}

const STYLESHEET: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; color: #e5e7eb; background: linear-gradient(180deg, #0f0c29, #302b63 60%, #24243e); min-height: 100vh; }
a { color: inherit; }
.site-header { display: flex; justify-content: space-between; align-items: center; padding: 1.5rem; }
.brand { color: #60a5fa; font-size: 1.25rem; font-weight: 700; text-decoration: none; }
.nav-link { color: #d1d5db; text-decoration: none; }
.container { max-width: 64rem; margin: 0 auto; padding: 3rem 1.5rem; }
.hero { display: flex; flex-wrap: wrap; gap: 2rem; align-items: center; justify-content: space-between; }
.hero-text, .hero-mock { flex: 1 1 24rem; }
.hero h1 { font-size: 3rem; line-height: 1.15; margin: 0 0 1.5rem; }
.accent-blue { color: #60a5fa; }
.accent-violet { color: #a78bfa; }
.lead { color: #d1d5db; margin-bottom: 2rem; }
.button { display: inline-block; background: #2563eb; color: #fff; font-weight: 600; padding: 0.75rem 1.5rem; border-radius: 9999px; text-decoration: none; border: 0; cursor: pointer; }
.button-wide { display: block; width: 100%; text-align: center; border-radius: 0.75rem; padding: 1rem; margin-top: 3rem; background: linear-gradient(90deg, #9333ea, #6366f1); }
.mock { border: 1px solid #334155; background: #0f172a; border-radius: 0.5rem; padding: 1.5rem; }
.mock-line { height: 0.75rem; background: #1e293b; border-radius: 0.25rem; margin-bottom: 0.75rem; }
.mock-line.title { height: 1rem; width: 33%; }
.mock-line.glow { background: rgba(109, 40, 217, 0.5); }
.features { display: grid; grid-template-columns: repeat(auto-fit, minmax(14rem, 1fr)); gap: 1.5rem; margin-top: 6rem; }
.feature { background: rgba(15, 23, 42, 0.6); border: 1px solid #1e293b; border-radius: 0.5rem; padding: 1.5rem; }
.feature h3 { margin: 0 0 0.5rem; }
.feature p, .muted { color: #9ca3af; }
.reveal-word { display: inline-block; opacity: 0; animation: reveal 0.5s forwards; }
.reveal-word.blur { filter: blur(10px); animation-name: reveal-blur; }
@keyframes reveal { to { opacity: 1; } }
@keyframes reveal-blur { to { opacity: 1; filter: blur(0); } }
.upload-card { border: 1px dashed rgba(168, 85, 247, 0.5); border-radius: 1rem; padding: 2rem; background: rgba(255, 255, 255, 0.05); text-align: center; }
.loading { min-height: 70vh; display: flex; align-items: center; justify-content: center; font-size: 1.5rem; font-weight: 600; animation: pulse 2s infinite; }
@keyframes pulse { 50% { opacity: 0.5; } }
.failure { border: 1px solid #f87171; border-radius: 1rem; padding: 2rem; background: rgba(248, 113, 113, 0.1); }
.results-title { text-align: center; margin-bottom: 3rem; }
.results-title h1 { font-size: 2.5rem; margin: 0 0 1rem; }
.section { border: 1px solid rgba(168, 85, 247, 0.3); border-radius: 1rem; background: rgba(255, 255, 255, 0.05); margin-bottom: 2rem; }
.section-toggle { display: flex; justify-content: space-between; align-items: center; padding: 1.5rem 2rem; text-decoration: none; }
.section-toggle h2 { margin: 0; color: #d8b4fe; font-size: 1.5rem; }
.section-icon { display: inline-block; padding: 0.75rem; margin-right: 1rem; border-radius: 0.75rem; background: rgba(168, 85, 247, 0.2); }
.section-body { padding: 1.5rem 2rem; border-top: 1px solid rgba(168, 85, 247, 0.3); }
.group { margin-bottom: 1.5rem; }
.group h3 { color: #e9d5ff; }
.block-heading { color: #d8b4fe; margin: 1rem 0 0.5rem; }
.block-bullet::before { content: "✓ "; color: #c084fc; }
.block-example { background: rgba(88, 28, 135, 0.3); padding: 1rem; border-radius: 0.5rem; font-style: italic; }
.block-sub-item { margin-bottom: 0.75rem; }
.score { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: center; }
.score-ring { width: 8rem; height: 8rem; border-radius: 50%; border: 4px solid; display: flex; align-items: center; justify-content: center; font-size: 1.875rem; font-weight: 700; }
.tier-excellent { color: #4ade80; border-color: #22c55e; background: rgba(34, 197, 94, 0.2); }
.tier-very-good { color: #86efac; border-color: #4ade80; background: rgba(74, 222, 128, 0.2); }
.tier-good { color: #facc15; border-color: #eab308; background: rgba(234, 179, 8, 0.2); }
.tier-fair { color: #fb923c; border-color: #f97316; background: rgba(249, 115, 22, 0.2); }
.tier-needs-work { color: #f87171; border-color: #ef4444; background: rgba(239, 68, 68, 0.2); }
.breakdown-label { color: #d8b4fe; }
.meta { text-align: center; font-size: 0.875rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_all_special_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html_escape_passes_unicode_through() {
        assert_eq!(html_escape("• Led a team — 40% faster"), "• Led a team — 40% faster");
    }

    #[test]
    fn test_render_page_escapes_title_and_includes_header() {
        let html = render_page("<script>", &Head::default(), "<main></main>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>&lt;script&gt;</title>"));
        assert!(html.contains(r#"href="/analyze""#));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn test_render_page_refresh() {
        let head = Head {
            refresh_secs: Some(3),
        };
        let html = render_page("Loading", &head, "");
        assert!(html.contains(r#"<meta http-equiv="refresh" content="3">"#));
    }
}
