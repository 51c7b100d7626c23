use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// The instructor summary the backend embeds in each course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_lessons: i64,
    #[serde(default)]
    pub instructor: Option<InstructorRef>,
}

impl Course {
    pub fn instructor_name(&self) -> Option<&str> {
        self.instructor
            .as_ref()
            .map(|i| i.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Homepage search and filter inputs. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query_text: String,
    pub selected_instructor_id: Option<i64>,
}
