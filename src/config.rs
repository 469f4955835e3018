use anyhow::Context;
use std::env;
use std::path::PathBuf;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Bearer token required on every method except `initialize` and notifications.
    pub token: String,
    /// Optional JSON file replacing the built-in corpus.
    pub corpus_path: Option<PathBuf>,
    /// Maximum accepted body size on `/mcp`.
    pub max_body_bytes: usize,
    pub request_timeout_secs: u64,
    pub shutdown_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `MCP_TOKEN` has no default; starting without it is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let token = lookup("MCP_TOKEN").unwrap_or_default();
        if token.trim().is_empty() {
            anyhow::bail!("MCP_TOKEN must be set to a non-empty bearer token");
        }

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8787")
                .parse()
                .context("PORT must be a port number")?,
            token,
            corpus_path: lookup("CORPUS_PATH").map(PathBuf::from),
            max_body_bytes: var("MAX_BODY_BYTES", "1048576")
                .parse()
                .context("MAX_BODY_BYTES must be an integer")?,
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be an integer")?,
            shutdown_timeout_secs: var("SHUTDOWN_TIMEOUT", "5")
                .parse()
                .context("SHUTDOWN_TIMEOUT must be an integer")?,
            log_format: LogFormat::parse(&var("LOG_FORMAT", "text")),
        })
    }

    /// Defaults for everything but the token. Used when embedding the server.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            token: token.into(),
            corpus_path: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 5,
            log_format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_with_token_defaults() {
        let config = Config::with_token("secret");
        assert_eq!(config.token, "secret");
        assert!(config.corpus_path.is_none());
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[("MCP_TOKEN", "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8787);
        assert_eq!(config.max_body_bytes, 1_048_576);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 5);
        assert!(config.corpus_path.is_none());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("MCP_TOKEN", "abc"),
            ("PORT", "9000"),
            ("CORPUS_PATH", "/data/corpus.json"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.corpus_path, Some(PathBuf::from("/data/corpus.json")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_or_blank_token_is_error() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MCP_TOKEN", "")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("MCP_TOKEN", "   ")])).is_err());
    }

    #[test]
    fn test_unparseable_numbers_are_errors() {
        for key in ["PORT", "MAX_BODY_BYTES", "REQUEST_TIMEOUT_SECS", "SHUTDOWN_TIMEOUT"] {
            let result = Config::from_lookup(lookup_from(&[("MCP_TOKEN", "abc"), (key, "lots")]));
            let err = result.unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
        assert!(Config::from_lookup(lookup_from(&[("MCP_TOKEN", "abc"), ("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_from_env_rejects_empty_token() {
        // No other test reads MCP_TOKEN from the process env.
        env::set_var("MCP_TOKEN", "");
        let result = Config::from_env();
        env::remove_var("MCP_TOKEN");
        assert!(result.is_err());
    }
}
