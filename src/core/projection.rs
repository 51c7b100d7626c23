use crate::domain::model::{Course, Instructor};

pub const MAX_HOMEPAGE_COURSES: usize = 8;
pub const MAX_HOMEPAGE_INSTRUCTORS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub max_courses: usize,
    pub max_instructors: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            max_courses: MAX_HOMEPAGE_COURSES,
            max_instructors: MAX_HOMEPAGE_INSTRUCTORS,
        }
    }
}

/// What the homepage shows for one snapshot of aggregator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomepageView {
    pub loading: bool,
    pub courses: Vec<Course>,
    pub instructors: Vec<Instructor>,
    pub query_text: String,
    pub selected_instructor_id: Option<i64>,
    /// Name of the selected instructor; empty when nothing is selected or the id is unknown.
    pub instructor_label: String,
}

impl HomepageView {
    pub fn is_filtered_by_instructor(&self) -> bool {
        self.selected_instructor_id.is_some()
    }
}

pub fn instructor_label(instructors: &[Instructor], selected: Option<i64>) -> String {
    selected
        .and_then(|id| instructors.iter().find(|i| i.id == id))
        .map(|i| i.name.clone())
        .unwrap_or_default()
}

pub fn project(
    courses: &[Course],
    instructors: &[Instructor],
    selected_instructor_id: Option<i64>,
    limits: DisplayLimits,
) -> (Vec<Course>, Vec<Instructor>, String) {
    (
        courses.iter().take(limits.max_courses).cloned().collect(),
        instructors
            .iter()
            .take(limits.max_instructors)
            .cloned()
            .collect(),
        // looked up in the full list, not the truncated one
        instructor_label(instructors, selected_instructor_id),
    )
}
