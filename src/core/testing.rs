use crate::core::query::CourseQuery;
use crate::domain::model::{Course, Instructor, InstructorRef};
use crate::domain::ports::CourseApi;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type CourseResponder = Box<dyn Fn(&CourseQuery) -> (Duration, Option<Vec<Course>>) + Send + Sync>;

/// In-memory backend. `None` from a responder means a 500 response.
pub(crate) struct FakeApi {
    instructors: Option<Vec<Instructor>>,
    courses: CourseResponder,
    latency: Duration,
    instructor_successes: Option<usize>,
    fail_deletes: bool,
    course_queries: Mutex<Vec<CourseQuery>>,
    instructor_calls: AtomicUsize,
    deleted: Mutex<Vec<i64>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            instructors: Some(Vec::new()),
            courses: Box::new(|_| (Duration::ZERO, Some(Vec::new()))),
            latency: Duration::ZERO,
            instructor_successes: None,
            fail_deletes: false,
            course_queries: Mutex::new(Vec::new()),
            instructor_calls: AtomicUsize::new(0),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_instructors(mut self, instructors: Vec<Instructor>) -> Self {
        self.instructors = Some(instructors);
        self
    }

    pub fn failing_instructors(mut self) -> Self {
        self.instructors = None;
        self
    }

    /// The first `successes` instructor reads succeed, later ones fail.
    pub fn failing_instructors_after(mut self, successes: usize) -> Self {
        self.instructor_successes = Some(successes);
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = Box::new(move |_| (Duration::ZERO, Some(courses.clone())));
        self
    }

    pub fn failing_courses(mut self) -> Self {
        self.courses = Box::new(|_| (Duration::ZERO, None));
        self
    }

    pub fn with_course_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&CourseQuery) -> (Duration, Option<Vec<Course>>) + Send + Sync + 'static,
    {
        self.courses = Box::new(responder);
        self
    }

    /// Applied to every call on top of per-query course delays.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn course_queries(&self) -> Vec<CourseQuery> {
        self.course_queries.lock().unwrap().clone()
    }

    pub fn course_paths(&self) -> Vec<String> {
        self.course_queries().iter().map(CourseQuery::path).collect()
    }

    pub fn instructor_calls(&self) -> usize {
        self.instructor_calls.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CourseApi for FakeApi {
    async fn list_instructors(&self) -> Result<Vec<Instructor>> {
        let call = self.instructor_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        let exhausted = self.instructor_successes.is_some_and(|successes| call >= successes);
        self.instructors.clone().filter(|_| !exhausted).ok_or(TrackerError::RequestFailed {
            status: 500,
            path: "/instructors/".to_string(),
        })
    }

    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        self.course_queries.lock().unwrap().push(query.clone());
        let (delay, courses) = (self.courses)(query);
        tokio::time::sleep(self.latency + delay).await;
        courses.ok_or_else(|| TrackerError::RequestFailed {
            status: 500,
            path: query.path(),
        })
    }

    async fn delete_instructor(&self, id: i64) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        if self.fail_deletes {
            return Err(TrackerError::RequestFailed {
                status: 500,
                path: format!("/instructors/{}/", id),
            });
        }
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

pub(crate) fn instructor(id: i64, name: &str) -> Instructor {
    Instructor {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        bio: None,
    }
}

pub(crate) fn course(id: i64, title: &str, instructor: Option<(i64, &str)>) -> Course {
    Course {
        id,
        title: title.to_string(),
        description: format!("About {}", title),
        total_lessons: 10,
        instructor: instructor.map(|(id, name)| InstructorRef {
            id,
            name: name.to_string(),
        }),
    }
}
