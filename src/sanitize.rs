//! Input validation and sanitization for user-supplied repository URLs.
//!
//! Every raw URL passes URL-syntax validation and HTML escaping before it is
//! embedded in a request or rendered, then has the fixed GitHub prefix
//! stripped to yield the `owner/repo` path used by the REST API.

use url::Url;

/// Fixed prefix stripped from a sanitized repository URL to derive the
/// `owner/repo` path
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Checks whether the input parses as a syntactically valid URL
pub fn is_valid_url(input: &str) -> bool {
    Url::parse(input).is_ok()
}

/// HTML-escapes user input so it is safe to embed in requests and render back
pub fn sanitize_input(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Derives the `owner/repo` path from a sanitized GitHub URL by stripping the
/// first occurrence of the fixed prefix
pub fn repo_path_from(sanitized_url: &str) -> String {
    sanitized_url
        .replacen(GITHUB_URL_PREFIX, "", 1)
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://github.com/octo/repo"));
        assert!(is_valid_url("http://localhost:8000/api"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_sanitize_input_escapes_html() {
        assert_eq!(
            sanitize_input(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(sanitize_input("a & b"), "a &amp; b");
        assert_eq!(
            sanitize_input("https://github.com/octo/repo"),
            "https://github.com/octo/repo"
        );
    }

    #[test]
    fn test_repo_path_from() {
        assert_eq!(repo_path_from("https://github.com/octo/repo"), "octo/repo");
        assert_eq!(repo_path_from("https://github.com/octo/repo/"), "octo/repo");
        // Only the first occurrence of the prefix is removed
        assert_eq!(
            repo_path_from("https://github.com/octo/https://github.com/"),
            "octo/https://github.com"
        );
    }
}
