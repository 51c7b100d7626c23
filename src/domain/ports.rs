use crate::core::query::CourseQuery;
use crate::domain::model::{Course, Instructor};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote collaborator the core depends on. Implementations return the decoded
/// JSON array or an error; callers decide how failures are presented.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_instructors(&self) -> Result<Vec<Instructor>>;
    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>>;
    async fn delete_instructor(&self, id: i64) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn debounce_delay(&self) -> Duration;
    fn max_courses(&self) -> usize;
    fn max_instructors(&self) -> usize;
}
