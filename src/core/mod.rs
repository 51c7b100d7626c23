pub mod courses;
pub mod debounce;
pub mod directory;
pub mod homepage;
pub mod projection;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Course, FilterState, Instructor, InstructorRef};
pub use crate::domain::ports::{ConfigProvider, CourseApi};
pub use crate::utils::error::Result;
