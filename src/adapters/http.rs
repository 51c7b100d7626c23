use crate::core::query::{instructor_path, CourseQuery, INSTRUCTORS_PATH};
use crate::domain::model::{Course, Instructor};
use crate::domain::ports::{ConfigProvider, CourseApi};
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `CourseApi` over the REST backend. Every path is appended to `base_url`.
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    client: Client,
    base_url: String,
}

impl HttpCourseApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let response = self.client.request(method, &url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TrackerError::RequestFailed {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    // A `null` body is treated as an empty list.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response = self.send(Method::GET, path).await?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let items: Option<Vec<T>> = serde_json::from_slice(&body)?;
        Ok(items.unwrap_or_default())
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn list_instructors(&self) -> Result<Vec<Instructor>> {
        self.get_list(INSTRUCTORS_PATH).await
    }

    async fn list_courses(&self, query: &CourseQuery) -> Result<Vec<Course>> {
        self.get_list(&query.path()).await
    }

    async fn delete_instructor(&self, id: i64) -> Result<()> {
        let path = instructor_path(id);
        self.send(Method::DELETE, &path)
            .await
            .map(|_| ())
            .map_err(|e| TrackerError::DeleteFailed {
                id,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn api_for(server: &MockServer) -> HttpCourseApi {
        HttpCourseApi::new(server.url("/api/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let api = HttpCourseApi::new("http://localhost:8000/api/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(api.url("/courses/"), "http://localhost:8000/api/courses/");
    }

    #[tokio::test]
    async fn test_list_instructors() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/instructors/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": 1, "name": "Ada", "email": "ada@example.com", "bio": "Math"},
                    {"id": 2, "name": "Grace", "email": "grace@example.com"}
                ]));
        });

        let instructors = api_for(&server).list_instructors().await.unwrap();

        mock.assert();
        assert_eq!(instructors.len(), 2);
        assert_eq!(instructors[0].bio.as_deref(), Some("Math"));
        assert_eq!(instructors[1].bio, None);
    }

    #[tokio::test]
    async fn test_list_courses_sends_filters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/courses/")
                .query_param("search", "algo")
                .query_param("instructor_id", "3");
            then.status(200).json_body(serde_json::json!([
                {
                    "id": 7,
                    "title": "Algorithms",
                    "description": "Sorting and searching",
                    "total_lessons": 24,
                    "instructor": {"id": 3, "name": "Ada"}
                }
            ]));
        });

        let courses = api_for(&server)
            .list_courses(&CourseQuery::new("algo", Some(3)))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].instructor_name(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_unfiltered_courses_have_no_query_params() {
        let server = MockServer::start();
        let filtered = server.mock(|when, then| {
            when.method(GET).path("/api/courses/").query_param_exists("search");
            then.status(200).json_body(serde_json::json!([]));
        });
        let unfiltered = server.mock(|when, then| {
            when.method(GET).path("/api/courses/");
            then.status(200).json_body(serde_json::json!([
                {"id": 1, "title": "Rust", "description": "", "total_lessons": 3, "instructor": null}
            ]));
        });

        let courses = api_for(&server)
            .list_courses(&CourseQuery::default())
            .await
            .unwrap();

        filtered.assert_hits(0);
        unfiltered.assert();
        assert_eq!(courses.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_request_failure() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/instructors/");
            then.status(500);
        });

        let err = api_for(&server).list_instructors().await.unwrap_err();

        mock.assert();
        assert!(matches!(err, TrackerError::RequestFailed { status: 500, .. }));
        assert!(err.is_operation_failure());
    }

    #[tokio::test]
    async fn test_null_body_is_empty_list() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/courses/");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("null");
        });

        let courses = api_for(&server)
            .list_courses(&CourseQuery::default())
            .await
            .unwrap();

        assert!(courses.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/instructors/");
            then.status(200).body("<html>not json</html>");
        });

        let err = api_for(&server).list_instructors().await.unwrap_err();

        assert!(matches!(err, TrackerError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_delete_instructor() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/instructors/4/");
            then.status(204);
        });

        api_for(&server).delete_instructor(4).await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_delete_failure_is_delete_failed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/api/instructors/4/");
            then.status(404);
        });

        let err = api_for(&server).delete_instructor(4).await.unwrap_err();

        assert!(matches!(err, TrackerError::DeleteFailed { id: 4, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let api = HttpCourseApi::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

        let err = api.list_instructors().await.unwrap_err();

        assert!(matches!(err, TrackerError::NetworkError(_)));
    }
}
