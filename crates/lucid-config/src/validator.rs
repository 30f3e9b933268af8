//! Configuration validation.

use lucid_protocols::MAX_TEXT_CHARS;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fail on the first error, otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_relay(config, &mut result);
        Self::validate_pipeline(config, &mut result);
        Self::validate_panel(config, &mut result);
        Self::validate_terminal(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        let relay = &config.relay;

        match relay.api_key.as_deref() {
            None => result.add_warning(ValidationWarning::new(
                "relay.api_key",
                "API key is not set, clients must configure it via /api/config",
            )),
            Some(key) if key.trim().is_empty() => result.add_error(ValidationError::new(
                "relay.api_key",
                "API key cannot be blank",
            )),
            Some(_) => {}
        }

        if let Some(ref url) = relay.base_url {
            if !is_http_url(url) {
                result.add_error(ValidationError::new(
                    "relay.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        let profile = relay.profile();
        let section = format!("relay.{}", relay.provider.as_str());
        if profile.model.is_empty() {
            result.add_error(ValidationError::new(
                format!("{}.model", section),
                "Model cannot be empty",
            ));
        }
        if !(0.0..=2.0).contains(&profile.temperature) {
            result.add_error(ValidationError::new(
                format!("{}.temperature", section),
                "temperature must be between 0.0 and 2.0",
            ));
        }
        if let Some(top_p) = profile.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                result.add_error(ValidationError::new(
                    format!("{}.top_p", section),
                    "top_p must be between 0.0 and 1.0",
                ));
            }
        }
        let budgets = [
            ("concise_max_tokens", profile.concise_max_tokens),
            ("question_max_tokens", profile.question_max_tokens),
            ("analysis_max_tokens", profile.analysis_max_tokens),
            ("improvements_max_tokens", profile.improvements_max_tokens),
        ];
        for (field, value) in budgets {
            if value == 0 {
                result.add_error(ValidationError::new(
                    format!("{}.{}", section, field),
                    "token budget must be greater than 0",
                ));
            }
        }
    }

    fn validate_pipeline(config: &Config, result: &mut ValidationResult) {
        let pipeline = &config.pipeline;

        if pipeline.debounce_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "pipeline.debounce_ms",
                "debounce disabled, every selection change triggers a request",
            ));
        }

        if pipeline.max_chars == 0 || pipeline.max_chars > MAX_TEXT_CHARS {
            result.add_error(ValidationError::new(
                "pipeline.max_chars",
                format!("max_chars must be between 1 and {}", MAX_TEXT_CHARS),
            ));
        }

        if pipeline.request_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "pipeline.request_timeout_secs",
                "request_timeout_secs must be greater than 0",
            ));
        }

        if !is_http_url(&pipeline.relay_url) {
            result.add_error(ValidationError::new(
                "pipeline.relay_url",
                "relay_url must start with http:// or https://",
            ));
        }

        if pipeline.history_limit == 0 {
            result.add_warning(ValidationWarning::new(
                "pipeline.history_limit",
                "history_limit is 0, no explanation history will be kept",
            ));
        }
    }

    fn validate_panel(config: &Config, result: &mut ValidationResult) {
        let panel = &config.pipeline.panel;

        if panel.width <= 0.0 {
            result.add_error(ValidationError::new(
                "pipeline.panel.width",
                "width must be greater than 0",
            ));
        }
        if panel.height <= 0.0 {
            result.add_error(ValidationError::new(
                "pipeline.panel.height",
                "height must be greater than 0",
            ));
        }
        if panel.gap < 0.0 {
            result.add_error(ValidationError::new("pipeline.panel.gap", "gap cannot be negative"));
        }
        if panel.margin < 0.0 {
            result.add_error(ValidationError::new(
                "pipeline.panel.margin",
                "margin cannot be negative",
            ));
        }
    }

    fn validate_terminal(config: &Config, result: &mut ValidationResult) {
        let terminal = &config.pipeline.terminal;

        if terminal.min_width <= 0.0 || terminal.min_width > terminal.max_width {
            result.add_error(ValidationError::new(
                "pipeline.terminal.min_width",
                "min_width must be positive and not exceed max_width",
            ));
            return;
        }

        if terminal.default_width < terminal.min_width || terminal.default_width > terminal.max_width {
            result.add_error(ValidationError::new(
                "pipeline.terminal.default_width",
                format!(
                    "default_width must be between {} and {}",
                    terminal.min_width, terminal.max_width
                ),
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
