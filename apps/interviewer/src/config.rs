use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if the Gemini credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_missing_is_error() {
        let err = require_env("INTERVIEWER_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("INTERVIEWER_TEST_SURELY_UNSET_VAR"));
    }

    #[test]
    fn test_require_env_blank_is_error() {
        std::env::set_var("INTERVIEWER_TEST_BLANK_VAR", "   ");
        let err = require_env("INTERVIEWER_TEST_BLANK_VAR").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_require_env_present() {
        std::env::set_var("INTERVIEWER_TEST_SET_VAR", "abc123");
        assert_eq!(require_env("INTERVIEWER_TEST_SET_VAR").unwrap(), "abc123");
    }
}
