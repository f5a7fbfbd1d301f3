use crate::pages::layout::{html_escape, render_page, Head};

/// GET /analyze — the resume upload form.
pub fn upload_page(max_upload_bytes: usize) -> String {
    let limit_mb = max_upload_bytes as f64 / (1024.0 * 1024.0);
    let body = format!(
        r#"<main class="container">
<div class="results-title">
<h1>Analyze Your Resume</h1>
<p class="muted">Upload a PDF and get ATS, skills and career feedback in about a minute.</p>
</div>
<form class="upload-card" action="/analyze" method="post" enctype="multipart/form-data">
<p><input type="file" name="file" accept="application/pdf,.pdf" required></p>
<p class="muted">{hint}</p>
<button class="button" type="submit">Analyze Resume</button>
</form>
</main>"#,
        hint = html_escape(&format!("PDF only, up to {limit_mb:.0} MB.")),
    );

    render_page("Analyze your resume", &Head::default(), &body)
}
