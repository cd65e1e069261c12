use regex::Regex;
use std::sync::LazyLock;

static PROMPT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)prompt:\s*(.*)").expect("prompt marker pattern must compile")
});

/// Returns the rest of the line following the first `prompt:` marker
/// (case-insensitive), or an empty string when the text has no marker.
pub fn extract_prompt(text: &str) -> String {
    PROMPT_MARKER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
