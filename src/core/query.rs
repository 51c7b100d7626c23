use crate::domain::model::FilterState;
use url::form_urlencoded;

pub const COURSES_PATH: &str = "/courses/";
pub const INSTRUCTORS_PATH: &str = "/instructors/";

pub fn instructor_path(id: i64) -> String {
    format!("{}{}/", INSTRUCTORS_PATH, id)
}

/// Filter parameters for `GET /courses/`. Empty values are never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub search: Option<String>,
    pub instructor_id: Option<i64>,
}

impl CourseQuery {
    pub fn new(query: &str, instructor_id: Option<i64>) -> Self {
        Self {
            search: (!query.is_empty()).then(|| query.to_string()),
            instructor_id,
        }
    }

    pub fn from_filter(filter: &FilterState) -> Self {
        Self::new(&filter.query_text, filter.selected_instructor_id)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.instructor_id.is_none()
    }

    pub fn query_string(&self) -> Option<String> {
        if self.is_unfiltered() {
            return None;
        }

        let mut params = form_urlencoded::Serializer::new(String::new());
        if let Some(search) = &self.search {
            params.append_pair("search", search);
        }
        if let Some(id) = self.instructor_id {
            params.append_pair("instructor_id", &id.to_string());
        }
        Some(params.finish())
    }

    /// Path relative to the API root, e.g. `/courses/?search=algo&instructor_id=3`.
    pub fn path(&self) -> String {
        match self.query_string() {
            Some(qs) => format!("{}?{}", COURSES_PATH, qs),
            None => COURSES_PATH.to_string(),
        }
    }
}
