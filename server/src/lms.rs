//! HTTP client for the LMS proxy.
//!
//! Every request carries the configured timeout. The token only ever travels
//! as the `token` query parameter and is never part of a log line.

use {
    crate::error::{FetchError, SessionError},
    canvas_dashboard_core::model::{Assignment, Course, CourseId, Submission, Token},
    reqwest::Client,
    serde::de::DeserializeOwned,
    std::time::Duration,
};

/// Longest payload excerpt kept in an error message.
const EXCERPT_LEN: usize = 200;

#[derive(Debug, Clone)]
pub struct LmsClient {
    client: Client,
    base_url: String,
}

impl LmsClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    /// Liveness check against the backend root; any 2xx counts as alive.
    pub async fn probe(&self) -> Result<(), SessionError> {
        let url = format!("{}/", self.base_url);
        tracing::debug!("GET {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            SessionError::BackendUnavailable(FetchError::from_reqwest(e).to_string())
        })?;
        if !response.status().is_success() {
            let e = FetchError::HttpStatus(response.status());
            return Err(SessionError::BackendUnavailable(e.to_string()));
        }
        Ok(())
    }

    /// The course list. A payload that is not a list of courses means the
    /// token was rejected, unless the proxy reports its own `error` field.
    pub async fn fetch_courses(&self, token: &Token) -> Result<Vec<Course>, SessionError> {
        let body = self
            .get_text("/courses", token)
            .await
            .map_err(|e| SessionError::Network(e.to_string()))?;
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) else {
            tracing::warn!("Course list is not JSON: {}", excerpt(&body));
            return Err(SessionError::Auth);
        };
        if value.is_array() {
            return serde_json::from_value(value).map_err(|e| {
                tracing::warn!("Malformed course list: {e}");
                SessionError::Auth
            });
        }
        if value.get("error").is_some() {
            return Err(SessionError::Upstream(value.to_string()));
        }
        tracing::warn!("Course list rejected: {}", excerpt(&value.to_string()));
        Err(SessionError::Auth)
    }

    pub async fn fetch_assignments(
        &self,
        token: &Token,
        course_id: CourseId,
    ) -> Result<Vec<Assignment>, FetchError> {
        let path = format!("/courses/{course_id}/assignments");
        let mut assignments: Vec<Assignment> = self.get_list(&path, token).await?;
        for assignment in assignments.iter_mut() {
            assignment.course_id = course_id;
        }
        Ok(assignments)
    }

    pub async fn fetch_submissions(
        &self,
        token: &Token,
        course_id: CourseId,
    ) -> Result<Vec<Submission>, FetchError> {
        let path = format!("/courses/{course_id}/submissions");
        self.get_list(&path, token).await
    }

    async fn get_text(&self, path: &str, token: &Token) -> Result<String, FetchError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .query(&[("token", token.expose())])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;
        response.text().await.map_err(FetchError::from_reqwest)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Token,
    ) -> Result<Vec<T>, FetchError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .query(&[("token", token.expose())])
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }
        let body = response.text().await.map_err(FetchError::from_reqwest)?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if !value.is_array() {
            return Err(FetchError::NotAList(excerpt(&body)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.into(),
    }
}
