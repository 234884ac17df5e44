// Configuration loader
//
// Loads ~/.keyi/config.toml if present, otherwise falls back to the
// provider API keys in the environment. Keys are read once at startup;
// an absent key means that provider tier is skipped, not an error.

use anyhow::{bail, Context, Result};
use std::fs;

use super::settings::{Config, ProviderEntry};

pub fn load_config() -> Result<Config> {
    let config = match try_load_from_file()? {
        Some(config) => config,
        None => load_from_env(),
    };

    if config.max_context_turns == 0 {
        bail!("max_context_turns must be at least 1");
    }

    if config.providers.is_empty() {
        tracing::warn!(
            "No providers configured; every reply will come from the deterministic responder"
        );
    }

    Ok(config)
}

fn try_load_from_file() -> Result<Option<Config>> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let config_path = home.join(".keyi/config.toml");

    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    tracing::info!(path = %config_path.display(), providers = config.providers.len(), "Loaded config file");
    Ok(Some(config))
}

fn load_from_env() -> Config {
    let mut providers = Vec::new();

    if let Ok(api_key) = std::env::var("ZHIPU_API_KEY") {
        if !api_key.is_empty() {
            providers.push(ProviderEntry {
                provider: "zhipu".to_string(),
                api_key,
                model: None,
                base_url: None,
            });
        }
    }

    if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
        if !api_key.is_empty() {
            providers.push(ProviderEntry {
                provider: "openai".to_string(),
                api_key,
                model: None,
                base_url: None,
            });
        }
    }

    Config {
        providers,
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_gets_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.providers.is_empty());
        assert_eq!(config.max_context_turns, 10);
        assert!(config.persist_crisis_reply);
        assert_eq!(config.server.bind_address, "127.0.0.1:8000");
        assert!(config.system_prompt.contains("可意"));
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
            system_prompt = "you are a test bot"
            max_context_turns = 6
            persist_crisis_reply = false

            [server]
            bind_address = "0.0.0.0:9000"

            [[providers]]
            provider = "zhipu"
            api_key = "zk-test"

            [[providers]]
            provider = "openai"
            api_key = "sk-test"
            model = "gpt-4o-mini"
            base_url = "http://localhost:9999/v1"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].provider, "zhipu");
        assert_eq!(config.providers[1].model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.max_context_turns, 6);
        assert!(!config.persist_crisis_reply);
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
    }
}
