use anyhow::Context;
use clap::Parser;
use course_tracker::app::commands;
use course_tracker::utils::{logger, validation::Validate};
use course_tracker::{CliConfig, Command, CourseApi, HomepageSettings, HttpCourseApi, TrackerError};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(&config.logging.level);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let api: Arc<dyn CourseApi> =
        Arc::new(HttpCourseApi::from_config(&config).context("Failed to build HTTP client")?);
    let settings = HomepageSettings::from_config(&config);
    let mut stdout = std::io::stdout();

    let outcome = match cli.command {
        Command::Home { search, instructor } => {
            commands::run_home(api, settings, search, instructor, &mut stdout).await
        }
        Command::Watch => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::run_watch(api, settings, stdin, &mut stdout).await
        }
        Command::Instructors => commands::run_instructors(api, &mut stdout).await,
        Command::Courses { search, instructor } => {
            commands::run_courses(api, search, instructor, &mut stdout).await
        }
        Command::DeleteInstructor { id } => {
            commands::run_delete_instructor(api, id, &mut stdout).await
        }
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e @ TrackerError::DeleteFailed { .. }) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Command failed"),
    }
}
