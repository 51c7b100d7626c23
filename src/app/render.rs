use crate::core::projection::HomepageView;
use crate::domain::model::{Course, Instructor};
use std::fmt;

pub const HOMEPAGE_TITLE: &str = "Welcome to Online Course Tracker";
pub const NO_COURSES: &str = "No courses found for the selected filter.";
pub const NO_INSTRUCTORS: &str = "No instructors available.";

/// Text form of a homepage view.
pub struct HomepageText<'a>(pub &'a HomepageView);

/// Bare course list, as printed by `courses`.
pub struct CourseList<'a>(pub &'a [Course]);

/// Instructor list page, as printed by `instructors`.
pub struct InstructorList<'a>(pub &'a [Instructor]);

impl fmt::Display for HomepageText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        if view.loading {
            return writeln!(f, "Loading homepage...");
        }

        writeln!(f, "{}", HOMEPAGE_TITLE)?;
        if !view.query_text.is_empty() {
            writeln!(f, "Search: {}", view.query_text)?;
        }
        writeln!(f)?;

        let heading = if view.is_filtered_by_instructor() {
            format!("Available Courses by {}", view.instructor_label)
        } else {
            "Available Courses".to_string()
        };
        let heading = heading.trim_end();
        writeln!(f, "{}", heading)?;
        writeln!(f, "{}", "=".repeat(heading.len()))?;
        if view.courses.is_empty() {
            writeln!(f, "{}", NO_COURSES)?;
        }
        for course in &view.courses {
            write_course(f, course)?;
        }

        writeln!(f)?;
        writeln!(f, "Instructors")?;
        writeln!(f, "===========")?;
        if view.instructors.is_empty() {
            writeln!(f, "{}", NO_INSTRUCTORS)?;
        }
        for instructor in &view.instructors {
            write_instructor(f, instructor)?;
        }
        Ok(())
    }
}

impl fmt::Display for CourseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "{}", NO_COURSES)?;
        }
        self.0.iter().try_for_each(|course| write_course(f, course))
    }
}

impl fmt::Display for InstructorList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No instructors yet.")?;
        }
        self.0
            .iter()
            .try_for_each(|instructor| write_instructor(f, instructor))
    }
}

pub fn render_homepage(view: &HomepageView) -> String {
    HomepageText(view).to_string()
}

pub fn render_courses(courses: &[Course]) -> String {
    CourseList(courses).to_string()
}

pub fn render_instructors(instructors: &[Instructor]) -> String {
    InstructorList(instructors).to_string()
}

fn write_course(f: &mut fmt::Formatter<'_>, course: &Course) -> fmt::Result {
    writeln!(f, "- [{}] {}", course.id, course.title)?;
    writeln!(f, "  Instructor: {}", course.instructor_name().unwrap_or("N/A"))?;
    if !course.description.is_empty() {
        writeln!(f, "  {}", course.description)?;
    }
    writeln!(f, "  Lessons: {}", course.total_lessons)
}

fn write_instructor(f: &mut fmt::Formatter<'_>, instructor: &Instructor) -> fmt::Result {
    writeln!(f, "- [{}] {} <{}>", instructor.id, instructor.name, instructor.email)?;
    if let Some(bio) = instructor.bio.as_deref().filter(|bio| !bio.is_empty()) {
        writeln!(f, "  {}", bio)?;
    }
    Ok(())
}
