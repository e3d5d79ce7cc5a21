//! Completion endpoint identity, read once from the environment.

use crate::error::{Result, WebAgentError};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const ENDPOINT_VAR: &str = "AZURE_ENDPOINT";
pub const MODEL_VAR: &str = "AZURE_MODEL_NAME";
pub const TOKEN_VAR: &str = "AZURE_TOKEN";

/// Endpoint address, model identifier and credential for the completion API.
#[derive(Clone)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub model: String,
    pub token: String,
}

impl ProviderConfig {
    /// Load `env_file` (if present) into the process environment, then read the provider values.
    pub fn from_env(env_file: &Path) -> Result<Self> {
        match dotenvy::from_path(env_file) {
            Ok(()) => debug!("Loaded environment from {}", env_file.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(WebAgentError::Config(format!(
                    "Failed to read {}: {}",
                    env_file.display(),
                    e
                )))
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Every value is required and must be non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                Some(_) => Err(WebAgentError::Config(format!(
                    "{key} is empty. Set it in .env or with: export {key}=..."
                ))),
                None => Err(WebAgentError::Config(format!(
                    "{key} not set. Set it in .env or with: export {key}=..."
                ))),
            }
        };

        Ok(Self {
            endpoint: require(ENDPOINT_VAR)?,
            model: require(MODEL_VAR)?,
            token: require(TOKEN_VAR)?,
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_all_values_present() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://models.example.com"),
            (MODEL_VAR, "gpt-4o-mini"),
            (TOKEN_VAR, " secret "),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "https://models.example.com");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.token, "secret");
    }

    #[test]
    fn test_missing_value_names_the_variable() {
        let err = ProviderConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://models.example.com"),
            (TOKEN_VAR, "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(MODEL_VAR));
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[
            (ENDPOINT_VAR, "https://models.example.com"),
            (MODEL_VAR, "gpt-4o-mini"),
            (TOKEN_VAR, "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AZURE_TOKEN is empty"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig {
            endpoint: "e".to_string(),
            model: "m".to_string(),
            token: "super-secret".to_string(),
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
