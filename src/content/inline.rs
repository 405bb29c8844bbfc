//! Inline emphasis markup
//!
//! Turns `**strong**` and `*emphasis*` markers into styled runs. Strong
//! pairs are resolved first, then emphasis pairs over the result, so an
//! emphasis pair may wrap or sit inside a strong run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("strong pattern is valid"));
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("emphasis pattern is valid"));

// Private-use code points stand in for resolved markers between passes.
// The same code points already present in the input are prefixed with
// ESCAPE so the walk below keeps them as text.
const STRONG_OPEN: char = '\u{E000}';
const STRONG_CLOSE: char = '\u{E001}';
const EMPHASIS_OPEN: char = '\u{E002}';
const EMPHASIS_CLOSE: char = '\u{E003}';
const ESCAPE: char = '\u{E004}';

fn is_reserved(ch: char) -> bool {
    (STRONG_OPEN..=ESCAPE).contains(&ch)
}

fn escape_reserved(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_reserved) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if is_reserved(ch) {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), strong: false, emphasis: false }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self { text: text.into(), strong: true, emphasis: false }
    }

    pub fn emphasis(text: impl Into<String>) -> Self {
        Self { text: text.into(), strong: false, emphasis: true }
    }
}

/// Split `text` into styled runs
///
/// Lone `*` characters that never find a partner stay in the text as-is.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let text = escape_reserved(text);
    let marked = STRONG.replace_all(&text, format!("{STRONG_OPEN}${{1}}{STRONG_CLOSE}").as_str());
    let marked =
        EMPHASIS.replace_all(&marked, format!("{EMPHASIS_OPEN}${{1}}{EMPHASIS_CLOSE}").as_str());

    let mut spans = Vec::new();
    let mut current = String::new();
    let (mut strong, mut emphasis) = (false, false);

    let mut chars = marked.chars();
    while let Some(ch) = chars.next() {
        let next = match ch {
            ESCAPE => {
                current.extend(chars.next());
                continue;
            }
            STRONG_OPEN => (true, emphasis),
            STRONG_CLOSE => (false, emphasis),
            EMPHASIS_OPEN => (strong, true),
            EMPHASIS_CLOSE => (strong, false),
            _ => {
                current.push(ch);
                continue;
            }
        };
        if !current.is_empty() {
            spans.push(Span { text: std::mem::take(&mut current), strong, emphasis });
        }
        (strong, emphasis) = next;
    }
    if !current.is_empty() {
        spans.push(Span { text: current, strong, emphasis });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just text"), vec![Span::plain("just text")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_strong_and_emphasis() {
        assert_eq!(
            parse_inline("**Calories**: 250 *approx*"),
            vec![
                Span::strong("Calories"),
                Span::plain(": 250 "),
                Span::emphasis("approx"),
            ]
        );
    }

    #[test]
    fn test_emphasis_inside_strong() {
        assert_eq!(
            parse_inline("**a *b* c**"),
            vec![
                Span::strong("a "),
                Span { text: "b".to_string(), strong: true, emphasis: true },
                Span::strong(" c"),
            ]
        );
    }

    #[test]
    fn test_emphasis_around_strong() {
        assert_eq!(
            parse_inline("*a **b** c*"),
            vec![
                Span::emphasis("a "),
                Span { text: "b".to_string(), strong: true, emphasis: true },
                Span::emphasis(" c"),
            ]
        );
    }

    #[test]
    fn test_no_markers_remain_for_pairs() {
        let spans = parse_inline("- **Protein**: 31g\n- **Fat**: *3.6g*");
        assert!(spans.iter().all(|s| !s.text.contains('*')));
        assert_eq!(spans.iter().filter(|s| s.strong).count(), 2);
        assert_eq!(spans.iter().filter(|s| s.emphasis).count(), 1);
    }

    #[test]
    fn test_lone_marker_is_kept() {
        assert_eq!(parse_inline("5 * 3"), vec![Span::plain("5 * 3")]);
    }

    #[test]
    fn test_pairs_do_not_span_lines() {
        assert_eq!(parse_inline("*a\nb*"), vec![Span::plain("*a\nb*")]);
    }

    #[test]
    fn test_private_use_text_is_not_a_marker() {
        assert_eq!(
            parse_inline("a\u{E000}b\u{E001}c"),
            vec![Span::plain("a\u{E000}b\u{E001}c")]
        );
        assert_eq!(
            parse_inline("**x\u{E002}y** \u{E004}"),
            vec![Span::strong("x\u{E002}y"), Span::plain(" \u{E004}")]
        );
    }

    #[test]
    fn test_empty_pair_produces_nothing() {
        assert_eq!(parse_inline("a****b"), vec![Span::plain("a"), Span::plain("b")]);
    }
}
