use crate::adapters::http::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::core::debounce::DEFAULT_DEBOUNCE;
use crate::core::projection::{MAX_HOMEPAGE_COURSES, MAX_HOMEPAGE_INSTRUCTORS};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{
    validate_log_level, validate_positive_number, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_DEBOUNCE_MS: u64 = 60_000;
const MAX_DISPLAY_ITEMS: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub homepage: HomepageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomepageConfig {
    pub debounce_ms: u64,
    pub max_courses: usize,
    pub max_instructors: usize,
}

impl Default for HomepageConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            max_courses: MAX_HOMEPAGE_COURSES,
            max_instructors: MAX_HOMEPAGE_INSTRUCTORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        validate_range("homepage.debounce_ms", self.homepage.debounce_ms, 0, MAX_DEBOUNCE_MS)?;
        validate_range(
            "homepage.max_courses",
            self.homepage.max_courses,
            1,
            MAX_DISPLAY_ITEMS,
        )?;
        validate_range(
            "homepage.max_instructors",
            self.homepage.max_instructors,
            1,
            MAX_DISPLAY_ITEMS,
        )?;
        validate_log_level("logging.level", &self.logging.level)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.homepage.debounce_ms)
    }

    fn max_courses(&self) -> usize {
        self.homepage.max_courses
    }

    fn max_instructors(&self) -> usize {
        self.homepage.max_instructors
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
