use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Get file extension from path (without the dot)
pub fn get_extension(path: &std::path::Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Strip every `<...>` tag from an HTML/XHTML fragment, collapse whitespace
/// runs to single spaces and trim the ends
pub fn strip_markup(html: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(html, " ");
    collapse_whitespace(&without_tags)
}

/// Collapse any run of whitespace to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
