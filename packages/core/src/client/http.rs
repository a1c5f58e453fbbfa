//! HTTP implementation of the course API
//!
//! # Routes
//!
//! | Operation         | Method | Path                                   |
//! |-------------------|--------|----------------------------------------|
//! | `get_course`      | GET    | `/courses/{id}`                        |
//! | `save_curriculum` | PUT    | `/courses/{id}/curriculum`             |
//! | `create_course`   | POST   | `/courses`                             |
//! | `update_course`   | PATCH  | `/courses/{id}`                        |
//! | `delete_course`   | DELETE | `/courses/{id}`                        |
//! | `create_coupon`   | POST   | `/courses/{id}/coupons`                |
//! | `update_coupon`   | PATCH  | `/courses/{id}/coupons/{couponId}`     |
//! | `delete_coupon`   | DELETE | `/courses/{id}/coupons/{couponId}`     |
//!
//! Paths are appended to the configured base URL. Status mapping follows
//! [`ApiError::from_status`].

use crate::client::{ApiError, CourseApi};
use crate::config::ClientConfig;
use crate::models::{Coupon, CouponInput, CouponPatch, Course, CourseInput, CoursePatch, Curriculum};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Serialize)]
struct CurriculumPayload<'a> {
    curriculum: &'a Curriculum,
}

/// Course API client speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    client: Client,
    base_url: Url,
}

impl HttpCourseApi {
    /// Build a client from validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::transport)?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::transport(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::transport(format!("Base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn checked(response: Response, resource: &str, id: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body, resource, id))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
        id: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = Self::checked(response, resource, id).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder, resource: &str, id: &str) -> Result<(), ApiError> {
        let response = request.send().await?;
        Self::checked(response, resource, id).await?;
        Ok(())
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn get_course(&self, course_id: &str) -> Result<Course, ApiError> {
        tracing::debug!("GET course {}", course_id);
        let url = self.endpoint(&["courses", course_id])?;
        self.send_json(self.client.get(url), "course", course_id).await
    }

    async fn save_curriculum(
        &self,
        course_id: &str,
        curriculum: &Curriculum,
    ) -> Result<(), ApiError> {
        tracing::debug!(
            "PUT curriculum for course {} ({} sections)",
            course_id,
            curriculum.section_count()
        );
        let url = self.endpoint(&["courses", course_id, "curriculum"])?;
        let request = self.client.put(url).json(&CurriculumPayload { curriculum });
        self.send_empty(request, "course", course_id).await
    }

    async fn create_course(&self, input: CourseInput) -> Result<Course, ApiError> {
        let url = self.endpoint(&["courses"])?;
        self.send_json(self.client.post(url).json(&input), "course", &input.title)
            .await
    }

    async fn update_course(&self, course_id: &str, patch: CoursePatch) -> Result<Course, ApiError> {
        let url = self.endpoint(&["courses", course_id])?;
        self.send_json(self.client.patch(url).json(&patch), "course", course_id)
            .await
    }

    async fn delete_course(&self, course_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["courses", course_id])?;
        self.send_empty(self.client.delete(url), "course", course_id).await
    }

    async fn create_coupon(&self, course_id: &str, input: CouponInput) -> Result<Coupon, ApiError> {
        let url = self.endpoint(&["courses", course_id, "coupons"])?;
        self.send_json(self.client.post(url).json(&input), "course", course_id)
            .await
    }

    async fn update_coupon(
        &self,
        course_id: &str,
        coupon_id: &str,
        patch: CouponPatch,
    ) -> Result<Coupon, ApiError> {
        let url = self.endpoint(&["courses", course_id, "coupons", coupon_id])?;
        self.send_json(self.client.patch(url).json(&patch), "coupon", coupon_id)
            .await
    }

    async fn delete_coupon(&self, course_id: &str, coupon_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["courses", course_id, "coupons", coupon_id])?;
        self.send_empty(self.client.delete(url), "coupon", coupon_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpCourseApi {
        let config = ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        };
        HttpCourseApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = api("https://api.example.com/v1");
        let url = api.endpoint(&["courses", "c-1", "curriculum"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/courses/c-1/curriculum");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let api = api("https://api.example.com/v1/");
        let url = api.endpoint(&["courses"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/courses");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = api("http://localhost:4000");
        let url = api.endpoint(&["courses", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/courses/a%20b%2Fc");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig {
            base_url: "ftp://example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpCourseApi::new(&config),
            Err(ApiError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        let api = api("http://127.0.0.1:9");
        let err = api.get_course("c-1").await.unwrap_err();
        assert!(err.is_transient(), "expected transport error, got {:?}", err);
    }
}
