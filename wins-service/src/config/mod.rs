use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// RouteLLM OpenAI-compatible API root.
pub const DEFAULT_ROUTELLM_BASE_URL: &str = "https://routellm.abacus.ai/v1";

/// Model used for both endpoints unless overridden.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Process-wide configuration, built once in `main` and read-only afterwards.
#[derive(Debug, Clone)]
pub struct WinsConfig {
    pub common: core_config::Config,
    pub routellm: RouteLlmConfig,
    /// OTLP collector for span export; spans stay local when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RouteLlmConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
}

impl WinsConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(WinsConfig {
            common: common_config,
            routellm: RouteLlmConfig {
                api_key: Secret::new(get_env("ROUTELLM_API_KEY", None, is_prod)?),
                base_url: get_env("ROUTELLM_BASE_URL", Some(DEFAULT_ROUTELLM_BASE_URL), is_prod)?,
                model: get_env("ROUTELLM_MODEL", Some(DEFAULT_MODEL), is_prod)?,
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
        })
    }
}

// Empty values count as unset.
fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
