//! Word-by-word text reveal for headings.
//!
//! Each word becomes a span that fades in after the previous one; the timing
//! lives in inline `animation-delay`/`animation-duration` styles.

use crate::pages::layout::html_escape;

const STAGGER_SECS: f32 = 0.2;

#[derive(Debug, Clone, Copy)]
pub struct RevealOptions {
    /// Start each word blurred and sharpen it as it fades in.
    pub blur: bool,
    pub duration_secs: f32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            blur: true,
            duration_secs: 0.5,
        }
    }
}

/// Renders `words` as staggered spans. Whitespace runs collapse to single spaces.
pub fn reveal_words(words: &str, options: RevealOptions) -> String {
    let class = if options.blur {
        "reveal-word blur"
    } else {
        "reveal-word"
    };

    words
        .split_whitespace()
        .enumerate()
        .map(|(idx, word)| {
            format!(
                r#"<span class="{class}" style="animation-delay: {delay:.1}s; animation-duration: {duration:.1}s">{word}</span>"#,
                delay = idx as f32 * STAGGER_SECS,
                duration = options.duration_secs,
                word = html_escape(word),
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
