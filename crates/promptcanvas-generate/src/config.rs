//! Generator configuration parsed from environment variables.

use crate::types::GenerateError;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for GeneratorTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeouts: GeneratorTimeouts,
}

impl GeneratorConfig {
    /// Build typed generator config from environment variables.
    ///
    /// Optional:
    /// - `IMAGE_API_KEY_ENV`: names the env var holding the key (default `GEMINI_API_KEY`)
    /// - `IMAGE_API_BASE_URL`: service base URL
    /// - `IMAGE_MODEL`: model name
    /// - `IMAGE_REQUEST_TIMEOUT_SECS`: default 120
    /// - `IMAGE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// The variable named by `IMAGE_API_KEY_ENV` must be set.
    pub fn from_env() -> Result<Self, GenerateError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GeneratorConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GenerateError> {
        let key_var = lookup("IMAGE_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerateError::MissingApiKey { var: key_var.clone() })?;

        let base_url = lookup("IMAGE_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model = lookup("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeouts = GeneratorTimeouts {
            request_secs: parse_u64(&lookup, "IMAGE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "IMAGE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            timeouts,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64, GenerateError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| GenerateError::ConfigParse(format!("{key} must be a whole number of seconds, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = GeneratorConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.timeouts, GeneratorTimeouts::default());
    }

    #[test]
    fn test_indirect_key_and_overrides() {
        let cfg = GeneratorConfig::from_lookup(lookup_from(&[
            ("IMAGE_API_KEY_ENV", "MY_KEY"),
            ("MY_KEY", "k"),
            ("IMAGE_API_BASE_URL", "http://localhost:8080/v1/"),
            ("IMAGE_MODEL", "test-model"),
            ("IMAGE_REQUEST_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, "http://localhost:8080/v1");
        assert_eq!(cfg.model, "test-model");
        assert_eq!(cfg.timeouts.request_secs, 30);
        assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_key() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[("IMAGE_API_KEY_ENV", "NOPE")])).unwrap_err();
        assert_eq!(err, GenerateError::MissingApiKey { var: "NOPE".into() });
        let err = GeneratorConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey { .. }));
    }

    #[test]
    fn test_bad_timeout() {
        let err = GeneratorConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("IMAGE_CONNECT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, GenerateError::ConfigParse(_)));
    }
}
