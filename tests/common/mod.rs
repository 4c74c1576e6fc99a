use llamacodeanalysis::config::Config;

pub mod test_helpers {
    use super::*;

    /// Builds a configuration with every endpoint pointed at the mock server
    pub fn test_config(server_url: &str) -> Config {
        let mut config = Config::default();
        config.github.api_base = server_url.to_string();
        config.completion.endpoint = format!("{}/api/openai", server_url);
        config.backend.endpoint = format!("{}/api/analyze", server_url);
        config.openai.api_base = server_url.to_string();
        config.request_timeout_secs = 5;
        config
    }

    pub fn setup_test_logger() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    /// Repository metadata payload as the GitHub API returns it
    pub fn repo_json(full_name: &str) -> String {
        let (owner, name) = full_name.split_once('/').expect("owner/name");
        format!(
            r#"{{
                "name": "{name}",
                "full_name": "{full_name}",
                "description": "A test repository",
                "stargazers_count": 42,
                "forks_count": 7,
                "open_issues_count": 3,
                "language": "Rust",
                "owner": {{"login": "{owner}"}},
                "created_at": "2020-01-01T00:00:00Z",
                "updated_at": "2024-06-01T12:00:00Z"
            }}"#
        )
    }

    /// README payload carrying "# Hello\n" in base64, with the line break
    /// GitHub inserts into the encoded content
    pub fn readme_json() -> &'static str {
        r#"{"content": "IyBI\nZWxsbwo=", "encoding": "base64"}"#
    }

    pub fn issues_json() -> &'static str {
        r#"[
            {"title": "First bug", "body": "It breaks", "user": {"login": "alice"}},
            {"title": "Second bug", "body": null, "user": {"login": "bob"}}
        ]"#
    }
}
