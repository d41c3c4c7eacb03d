use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the catalog/recommendation service
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Bearer token for authenticated requests; requests go out without an
    /// Authorization header when this is unset
    #[serde(default)]
    pub catalog_api_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How many recommendations to request per fetch
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Quiet period before a feedback-triggered recommendations refresh fires
    #[serde(default = "default_feedback_debounce_ms")]
    pub feedback_debounce_ms: u64,
}

fn default_catalog_api_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_recommendation_count() -> usize {
    10
}

fn default_feedback_debounce_ms() -> u64 {
    1000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: Config = envy::from_iter(std::iter::empty::<(String, String)>()).unwrap();
        assert_eq!(config.catalog_api_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.catalog_api_token, None);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.recommendation_count, 10);
        assert_eq!(config.feedback_debounce_ms, 1000);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let vars = vec![
            (
                "CATALOG_API_URL".to_string(),
                "https://catalog.example.com/api".to_string(),
            ),
            ("CATALOG_API_TOKEN".to_string(), "abc123".to_string()),
            ("FEEDBACK_DEBOUNCE_MS".to_string(), "250".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.catalog_api_url, "https://catalog.example.com/api");
        assert_eq!(config.catalog_api_token.as_deref(), Some("abc123"));
        assert_eq!(config.feedback_debounce_ms, 250);
    }
}
