//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.lucid`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AnchoringMode, ProviderKind};
    use lucid_protocols::ExplanationMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.pipeline.debounce_ms, 300);
    }

    #[test]
    fn test_load_relay_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [relay]
            provider = "gemini"
            api_key = "AIza-test"

            [relay.gemini]
            model = "gemini-2.0-flash"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.relay.provider, ProviderKind::Gemini);
        assert_eq!(config.relay.api_key.as_deref(), Some("AIza-test"));
        assert_eq!(config.relay.profile().model, "gemini-2.0-flash");
        assert_eq!(config.relay.profile().concise_max_tokens, 75);
    }

    #[test]
    fn test_load_pipeline_config() {
        let content = r#"
            [pipeline]
            debounce_ms = 250
            mode = "detailed"
            relay_url = "http://127.0.0.1:9000"

            [pipeline.panel]
            width = 360.0
            anchoring = "viewport"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.pipeline.debounce_ms, 250);
        assert_eq!(config.pipeline.mode, ExplanationMode::Detailed);
        assert_eq!(config.pipeline.relay_url, "http://127.0.0.1:9000");
        assert_eq!(config.pipeline.panel.width, 360.0);
        assert_eq!(config.pipeline.panel.height, 200.0);
        assert_eq!(config.pipeline.panel.anchoring, AnchoringMode::Viewport);
    }

    #[test]
    fn test_load_custom_mode() {
        let content = r#"
            [pipeline.mode]
            custom = "Explain it to a five year old."
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(
            config.pipeline.mode,
            ExplanationMode::Custom("Explain it to a five year old.".to_string())
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5050").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/lucid.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/lucid.toml")).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("LUCID_TEST_API_KEY", "sk-from-env");
        }
        let config = ConfigLoader::load_str("[relay]\napi_key = \"${LUCID_TEST_API_KEY}\"").unwrap();
        assert_eq!(config.relay.api_key.as_deref(), Some("sk-from-env"));
        unsafe {
            std::env::remove_var("LUCID_TEST_API_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${LUCID_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/logs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/logs"));
    }
}
