//! Errors of the fetch cycle and the session controller.

use {
    canvas_dashboard_core::model::TokenError,
    thiserror::Error,
    tokio::sync::{mpsc, oneshot},
};

/// Fatal outcome of a connect attempt. The `Display` text is shown to the user
/// as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Enter your Canvas access token!")]
    EmptyToken,
    #[error("Already connecting, wait for the current attempt to finish")]
    AlreadyConnecting,
    #[error("The Canvas backend is not reachable: {0}")]
    BackendUnavailable(String),
    #[error("Canvas rejected the access token")]
    Auth,
    #[error("Canvas reported an error: {0}")]
    Upstream(String),
    #[error("Network error while loading courses: {0}")]
    Network(String),
    #[error("No courses found (received: [{}])", .raw_names.join(", "))]
    NoCourses { raw_names: Vec<String> },
    #[error("The connection attempt was cancelled by a disconnect")]
    Superseded,
    #[error("The session controller has stopped")]
    ControllerGone,
}

impl From<TokenError> for SessionError {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Empty => Self::EmptyToken,
        }
    }
}

// A closed channel in either direction means the controller task has ended.
impl<T> From<mpsc::error::SendError<T>> for SessionError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::ControllerGone
    }
}

impl From<oneshot::error::RecvError> for SessionError {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::ControllerGone
    }
}

/// Failure of a single request to the LMS proxy.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("expected a list, got: {0}")]
    NotAList(String),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e.without_url())
        }
    }
}

#[test]
fn test_no_courses_message() {
    let e = SessionError::NoCourses {
        raw_names: vec!["Sandbox".into(), "Orientation".into()],
    };
    assert_eq!(e.to_string(), "No courses found (received: [Sandbox, Orientation])");
    assert_eq!(SessionError::from(TokenError::Empty), SessionError::EmptyToken);
}
