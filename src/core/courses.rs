use crate::core::query::CourseQuery;
use crate::domain::model::Course;
use crate::domain::ports::CourseApi;
use std::sync::Arc;

/// Builds the course filter request and collapses every failure to an empty list.
#[derive(Clone)]
pub struct CourseQueryEngine {
    api: Arc<dyn CourseApi>,
}

impl CourseQueryEngine {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self { api }
    }

    pub async fn fetch_courses(&self, query: &str, instructor_id: Option<i64>) -> Vec<Course> {
        self.fetch(&CourseQuery::new(query, instructor_id)).await
    }

    pub async fn fetch(&self, query: &CourseQuery) -> Vec<Course> {
        tracing::debug!("Fetching courses: {}", query.path());
        match self.api.list_courses(query).await {
            Ok(courses) => {
                tracing::debug!("Fetched {} courses", courses.len());
                courses
            }
            Err(e) => {
                tracing::error!("Error fetching courses ({}): {}", query.path(), e);
                Vec::new()
            }
        }
    }
}
