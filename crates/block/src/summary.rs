//! Plain-text course summaries for the mobile list.

use regex::Regex;
use std::sync::OnceLock;

/// Summaries longer than this are shortened
pub const MAX_SUMMARY_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid markup tag regex")
    })
}

/// Remove markup tags and comments, keeping the text between them
pub fn strip_tags(html: &str) -> String {
    tag_pattern().replace_all(html, "").into_owned()
}

/// Strip markup and cap the text at `MAX_SUMMARY_CHARS` characters.
///
/// Longer text keeps its first 197 characters followed by "...".
pub fn format_summary(html: &str) -> String {
    let text = strip_tags(html);
    if text.chars().count() <= MAX_SUMMARY_CHARS {
        return text;
    }

    let keep = MAX_SUMMARY_CHARS - ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
