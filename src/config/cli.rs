use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-tracker")]
#[command(about = "Browse instructors and courses on an Online Course Tracker backend")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "API root, e.g. http://localhost:8000/api")]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Delay before a filter edit triggers a course fetch")]
    pub debounce_ms: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the homepage, optionally filtered
    Home {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        instructor: Option<i64>,
    },
    /// Read filter edits from stdin and reprint the homepage as they settle
    Watch,
    /// List every instructor
    Instructors,
    /// List courses matching a filter
    Courses {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        instructor: Option<i64>,
    },
    /// Delete an instructor (the backend may cascade to their courses)
    DeleteInstructor { id: i64 },
}

impl CliConfig {
    /// Loads the config file, if any, then applies command line overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(base_url) = &self.api_base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = timeout;
        }
        if let Some(debounce) = self.debounce_ms {
            config.homepage.debounce_ms = debounce;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            config.logging.json = true;
        }

        Ok(config)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.resolve()?.validate()
    }
}
