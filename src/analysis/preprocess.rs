use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static HEADING_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"###\s*").unwrap());

/// Strips markdown emphasis and heading markers from a backend analysis
/// result string before display
///
/// This is cosmetic normalization, not markdown parsing: `**bold**` becomes
/// `bold` and `### Heading` becomes `Heading`.
pub fn preprocess(text: &str) -> String {
    let without_bold = BOLD_MARKERS.replace_all(text, "$1");
    HEADING_MARKERS.replace_all(&without_bold, "").into_owned()
}
