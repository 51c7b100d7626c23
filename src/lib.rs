pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::http::HttpCourseApi;
pub use crate::config::TomlConfig;
pub use crate::core::{
    directory::InstructorDirectory,
    homepage::{Homepage, HomepageSettings},
};
pub use crate::domain::model::{Course, FilterState, Instructor, InstructorRef};
pub use crate::domain::ports::{ConfigProvider, CourseApi};
pub use crate::utils::error::{Result, TrackerError};
