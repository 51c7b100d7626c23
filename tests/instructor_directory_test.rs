use course_tracker::{CourseApi, HttpCourseApi, InstructorDirectory, TrackerError};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn api_for(server: &MockServer) -> Arc<dyn CourseApi> {
    Arc::new(HttpCourseApi::new(server.url("/api/"), Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_delete_removes_instructor_without_refetch() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/instructors/");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "name": "Ada", "email": "ada@example.com", "bio": "Math"},
            {"id": 2, "name": "Grace", "email": "grace@example.com", "bio": null}
        ]));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/instructors/1/");
        then.status(204);
    });

    let mut directory = InstructorDirectory::new(api_for(&server));
    assert_eq!(directory.refresh().await.len(), 2);

    directory.delete(1).await.unwrap();

    delete.assert();
    list.assert_hits(1);
    let names: Vec<&str> = directory.instructors().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Grace"]);
}

#[tokio::test]
async fn test_delete_failure_surfaces_error() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/instructors/");
        then.status(200).json_body(serde_json::json!([
            {"id": 1, "name": "Ada", "email": "ada@example.com"}
        ]));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/instructors/1/");
        then.status(500);
    });

    let mut directory = InstructorDirectory::new(api_for(&server));
    directory.refresh().await;

    let err = directory.delete(1).await.unwrap_err();

    delete.assert();
    assert!(matches!(err, TrackerError::DeleteFailed { id: 1, .. }));
    assert_eq!(err.user_friendly_message(), "Failed to delete instructor");
    assert_eq!(directory.instructors().len(), 1);
    Ok(())
}
