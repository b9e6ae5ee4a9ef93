use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::ClientBuilder;

use crate::error::{Error, Result};

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one pipeline run, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub serpapi_api_key: String,
    pub google_api_key: String,
    pub search_endpoint: String,
    pub gemini_endpoint: String,
    pub model: String,
    pub request_timeout: Duration,
    pub output_dir: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("serpapi_api_key", &"<redacted>")
            .field("google_api_key", &"<redacted>")
            .field("search_endpoint", &self.search_endpoint)
            .field("gemini_endpoint", &self.gemini_endpoint)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Config {
    /// Builder shared by both API clients: request timeout and user agent.
    pub fn http_client_builder(&self) -> ClientBuilder {
        reqwest::blocking::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(USER_AGENT)
    }

    /// Reads the process environment, falling back to `./.env` for unset keys.
    pub fn from_env() -> Result<Self> {
        Self::with_env_file(|key| env::var(key).ok(), Path::new(".env"))
    }

    /// Layers the `KEY=value` pairs of `path` under `lookup`. A missing file is
    /// not an error; an unreadable or malformed one is.
    pub fn with_env_file(lookup: impl Fn(&str) -> Option<String>, path: &Path) -> Result<Self> {
        let file_vars = read_env_file(path)?;
        Self::from_lookup(|key| lookup(key).or_else(|| file_vars.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{key} environment variable is not set")))
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            serpapi_api_key: require("SERPAPI_API_KEY")?,
            google_api_key: require("GOOGLE_API_KEY")?,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            request_timeout,
            output_dir: get("BLOG_OUTPUT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let invalid = |e: dotenvy::Error| Error::Config(format!("Could not read {}: {e}", path.display()));
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.collect::<std::result::Result<HashMap<_, _>, _>>().map_err(invalid),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(invalid(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "serp"),
            ("GOOGLE_API_KEY", "google"),
        ]))
        .unwrap();

        assert_eq!(config.serpapi_api_key, "serp");
        assert_eq!(config.google_api_key, "google");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.search_endpoint, DEFAULT_SEARCH_ENDPOINT);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "serp"),
            ("GOOGLE_API_KEY", "google"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("BLOG_OUTPUT_DIR", "/tmp/posts"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/posts"));
    }

    #[test]
    fn test_missing_google_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[("SERPAPI_API_KEY", "serp")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "  "),
            ("GOOGLE_API_KEY", "google"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SERPAPI_API_KEY"));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        for raw in ["0", "soon", "-3"] {
            let result = Config::from_lookup(lookup(&[
                ("SERPAPI_API_KEY", "serp"),
                ("GOOGLE_API_KEY", "google"),
                ("REQUEST_TIMEOUT_SECS", raw),
            ]));
            assert!(result.is_err(), "timeout '{raw}' should be rejected");
        }
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::from_lookup(lookup(&[
            ("SERPAPI_API_KEY", "serp-secret"),
            ("GOOGLE_API_KEY", "google-secret"),
        ]))
        .unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_keys_read_from_env_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "SERPAPI_API_KEY=serp-from-file\nGOOGLE_API_KEY=\"google-from-file\"\n").unwrap();

        let config = Config::with_env_file(lookup(&[]), &path).unwrap();
        assert_eq!(config.serpapi_api_key, "serp-from-file");
        assert_eq!(config.google_api_key, "google-from-file");
    }

    #[test]
    fn test_environment_wins_over_env_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "SERPAPI_API_KEY=serp-from-file\nGOOGLE_API_KEY=google-from-file\n").unwrap();

        let config = Config::with_env_file(lookup(&[("GOOGLE_API_KEY", "google-from-env")]), &path).unwrap();
        assert_eq!(config.serpapi_api_key, "serp-from-file");
        assert_eq!(config.google_api_key, "google-from-env");
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempdir().unwrap();
        let config = Config::with_env_file(
            lookup(&[("SERPAPI_API_KEY", "serp"), ("GOOGLE_API_KEY", "google")]),
            &dir.path().join(".env"),
        )
        .unwrap();
        assert_eq!(config.serpapi_api_key, "serp");

        let err = Config::with_env_file(lookup(&[]), &dir.path().join(".env")).unwrap_err();
        assert!(err.to_string().contains("SERPAPI_API_KEY"));
    }
}
