use crate::domain::model::Instructor;
use crate::domain::ports::CourseApi;
use crate::utils::error::{Result, TrackerError};
use std::sync::Arc;

/// One read of the full instructor collection; failures yield an empty list.
pub async fn load_instructors(api: &dyn CourseApi) -> Vec<Instructor> {
    match api.list_instructors().await {
        Ok(instructors) => {
            tracing::debug!("Loaded {} instructors", instructors.len());
            instructors
        }
        Err(e) => {
            tracing::error!("Failed to load instructors: {}", e);
            Vec::new()
        }
    }
}

/// Instructor list with delete support.
///
/// A successful delete removes the instructor locally without refetching.
/// Course lists held elsewhere are not touched: whether the backend cascaded
/// the delete only shows up on their next fetch.
pub struct InstructorDirectory {
    api: Arc<dyn CourseApi>,
    instructors: Vec<Instructor>,
    deleting: Option<i64>,
}

impl InstructorDirectory {
    pub fn new(api: Arc<dyn CourseApi>) -> Self {
        Self {
            api,
            instructors: Vec::new(),
            deleting: None,
        }
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting == Some(id)
    }

    /// Replaces the list with a fresh read. A failed read keeps the current list.
    pub async fn refresh(&mut self) -> &[Instructor] {
        match self.api.list_instructors().await {
            Ok(instructors) => self.instructors = instructors,
            Err(e) => tracing::error!("Failed to load instructors: {}", e),
        }
        &self.instructors
    }

    /// Deletes on the backend. Unlike list reads, failure is returned to the
    /// caller so it can be shown to the user.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.deleting = Some(id);
        let outcome = self.api.delete_instructor(id).await;
        self.deleting = None;

        match outcome {
            Ok(()) => {
                self.instructors.retain(|i| i.id != id);
                tracing::info!("Deleted instructor {}", id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Delete failed for instructor {}: {}", id, e);
                Err(match e {
                    e @ TrackerError::DeleteFailed { .. } => e,
                    other => TrackerError::DeleteFailed {
                        id,
                        reason: other.to_string(),
                    },
                })
            }
        }
    }
}
