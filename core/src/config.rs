//! Client configuration.

/// Environment variable consulted by `ClientConfig::from_env`.
pub const BASE_URL_ENV: &str = "API_URL";

/// Base URL used when `API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Settings injected into `RequestClient` at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix prepended verbatim to every request path.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read `API_URL`, falling back to `DEFAULT_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_uses_env_value() {
        let config = ClientConfig::from_lookup(|k| {
            (k == BASE_URL_ENV).then(|| "https://api.example.com".to_string())
        });
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn missing_or_empty_env_falls_back_to_default() {
        assert_eq!(ClientConfig::from_lookup(|_| None), ClientConfig::default());
        assert_eq!(
            ClientConfig::from_lookup(|_| Some(String::new())).base_url,
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn base_url_is_not_normalized() {
        assert_eq!(ClientConfig::new("http://h/").base_url, "http://h/");
    }
}
