//! Command line / environment configuration.
//!
//! Every flag has an environment fallback, and `.env` is loaded before
//! parsing, so a deployment can be configured purely through the environment.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use chatdeck_types::config::{LlmProvider, ProviderConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "chatdeck-gateway", version, about = "Completion gateway for the chatdeck browser client")]
pub struct GatewayArgs {
    /// Address to listen on
    #[arg(long, env = "CHATDECK_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Provider secret key
    #[arg(long = "api-key", env = "OPENAI_API_KEY", hide_env_values = true, hide = true)]
    pub api_key: Option<String>,

    /// Provider preset: openai, deepseek or custom
    #[arg(long, env = "CHATDECK_PROVIDER", default_value = "openai")]
    pub provider: String,

    /// Override the provider base URL (required for `custom`)
    #[arg(long, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    #[arg(long, env = "CHATDECK_MODEL")]
    pub model: Option<String>,

    #[arg(long, env = "CHATDECK_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    #[arg(long, env = "CHATDECK_TEMPERATURE")]
    pub temperature: Option<f32>,

    /// File holding the system prompt (replaces the built-in one)
    #[arg(long, env = "CHATDECK_SYSTEM_PROMPT_FILE")]
    pub system_prompt_file: Option<PathBuf>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "CHATDECK_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory with the built browser client
    #[arg(long, env = "CHATDECK_WEB_DIR")]
    pub web_dir: Option<PathBuf>,
}

impl GatewayArgs {
    /// Trimmed key, `None` when unset or blank.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
    }

    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let Some(provider) = LlmProvider::parse(&self.provider) else {
            bail!("unknown provider '{}' (expected openai, deepseek or custom)", self.provider);
        };
        if provider == LlmProvider::Custom && self.api_base.is_none() {
            bail!("provider 'custom' needs --api-base / OPENAI_API_BASE");
        }

        let mut config = ProviderConfig {
            provider,
            api_base: self.api_base.clone(),
            ..ProviderConfig::default()
        };
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                bail!("temperature {} is outside 0.0..=2.0", temperature);
            }
            config.temperature = temperature;
        }
        if let Some(timeout) = self.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(path) = &self.system_prompt_file {
            let prompt = std::fs::read_to_string(path)
                .with_context(|| format!("reading system prompt from {}", path.display()))?;
            config.system_prompt = prompt.trim().to_string();
        }
        Ok(config)
    }
}
