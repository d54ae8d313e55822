//! Form engine configuration

use crate::error::{FormError, Result};
use crate::identifier::Separator;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Colour every colour field starts with.
pub const DEFAULT_COLOR: &str = "#000000";

/// Form engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Endpoint submissions are POSTed to
    pub submit_endpoint: String,
    /// Upper bound for one submission request
    pub request_timeout_secs: u64,
    /// Separator used when normalizing field identifiers
    pub identifier_separator: Separator,
    /// Initial value of colour fields
    pub default_color: String,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            submit_endpoint: "http://localhost:3000/api/form-submit".into(),
            request_timeout_secs: 10,
            identifier_separator: Separator::Dash,
            default_color: DEFAULT_COLOR.into(),
        }
    }
}

impl FormsConfig {
    /// Load from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults overridden by `CANVAS_FORMS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Apply `CANVAS_FORMS_*` environment overrides on top of `self`
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(endpoint) = std::env::var("CANVAS_FORMS_ENDPOINT") {
            self.submit_endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("CANVAS_FORMS_TIMEOUT_SECS") {
            self.request_timeout_secs = timeout
                .parse()
                .map_err(|_| FormError::Config(format!("invalid timeout: {}", timeout)))?;
        }
        if let Ok(separator) = std::env::var("CANVAS_FORMS_SEPARATOR") {
            self.identifier_separator = separator.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.submit_endpoint.trim().is_empty() {
            return Err(FormError::Config("submit_endpoint must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(FormError::Config("request_timeout_secs must be positive".into()));
        }
        if self.default_color.is_empty() {
            return Err(FormError::Config("default_color must not be empty".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
