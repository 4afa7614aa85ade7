//! URL helpers.

/// Join a base URL and a path, normalizing the slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `/model/{id}/{action}` with the model id percent-encoded (`:` in version tags included).
pub fn model_action_path(model_id: &str, action: &str) -> String {
    format!("/model/{}/{action}", urlencoding::encode(model_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slashes() {
        assert_eq!(join_url("http://x/", "/a"), "http://x/a");
        assert_eq!(join_url("http://x", "a"), "http://x/a");
    }

    #[test]
    fn encodes_version_tag_colon() {
        assert_eq!(
            model_action_path("anthropic.claude-v2:1", "invoke"),
            "/model/anthropic.claude-v2%3A1/invoke"
        );
    }
}
