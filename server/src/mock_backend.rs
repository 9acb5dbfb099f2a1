//! In-process stand-in for the LMS proxy, used by tests.

use {
    axum::{
        Router,
        extract::{Path, Query, State},
        http::{StatusCode, header},
        response::{IntoResponse, Response},
        routing::get,
    },
    canvas_dashboard_core::model::CourseId,
    serde::Deserialize,
    std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    },
};

pub const TOKEN: &str = "test-token";

const INVALID_TOKEN: &str = r#"{"errors":[{"message":"Invalid access token."}]}"#;

/// Canned responses. Per-course payloads are raw JSON text; a course with no
/// entry answers 404.
#[derive(Debug, Clone)]
pub struct MockBackend {
    pub alive: bool,
    pub courses_payload: Option<String>,
    pub courses_delay: Duration,
    pub assignments: HashMap<CourseId, String>,
    pub submissions: HashMap<CourseId, String>,
    pub assignments_delay: HashMap<CourseId, Duration>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            alive: true,
            courses_payload: None,
            courses_delay: Duration::ZERO,
            assignments: HashMap::new(),
            submissions: HashMap::new(),
            assignments_delay: HashMap::new(),
        }
    }
}

impl MockBackend {
    /// Courses with empty assignment and submission lists.
    pub fn with_courses(courses: &[(CourseId, &str)]) -> Self {
        let list: Vec<serde_json::Value> = courses
            .iter()
            .map(|(id, name)| serde_json::json!({ "id": id, "name": name }))
            .collect();
        Self {
            courses_payload: Some(serde_json::Value::from(list).to_string()),
            assignments: courses.iter().map(|(id, _)| (*id, "[]".into())).collect(),
            submissions: courses.iter().map(|(id, _)| (*id, "[]".into())).collect(),
            ..Self::default()
        }
    }
}

pub struct SpawnedBackend {
    pub url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl SpawnedBackend {
    /// Paths requested so far, without query strings.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    backend: Arc<MockBackend>,
    hits: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

pub async fn spawn(backend: MockBackend) -> SpawnedBackend {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        backend: Arc::new(backend),
        hits: hits.clone(),
    };
    let app = Router::new()
        .route("/", get(root))
        .route("/courses", get(courses))
        .route("/courses/{id}/assignments", get(assignments))
        .route("/courses/{id}/submissions", get(submissions))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    SpawnedBackend {
        url: format!("http://{addr}"),
        hits,
    }
}

/// A URL nobody is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn json(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn root(State(state): State<MockState>) -> Response {
    state.hits.lock().unwrap().push("/".into());
    if state.backend.alive {
        json(StatusCode::OK, r#"{"message":"Canvas backend is running."}"#.into())
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

async fn courses(State(state): State<MockState>, Query(query): Query<TokenQuery>) -> Response {
    state.hits.lock().unwrap().push("/courses".into());
    if query.token.as_deref() != Some(TOKEN) {
        return json(StatusCode::UNAUTHORIZED, INVALID_TOKEN.into());
    }
    tokio::time::sleep(state.backend.courses_delay).await;
    let payload = state.backend.courses_payload.clone().unwrap_or("[]".into());
    json(StatusCode::OK, payload)
}

async fn assignments(
    State(state): State<MockState>,
    Path(id): Path<CourseId>,
    Query(query): Query<TokenQuery>,
) -> Response {
    state
        .hits
        .lock()
        .unwrap()
        .push(format!("/courses/{id}/assignments"));
    if let Some(delay) = state.backend.assignments_delay.get(&id) {
        tokio::time::sleep(*delay).await;
    }
    per_course(&query, state.backend.assignments.get(&id))
}

async fn submissions(
    State(state): State<MockState>,
    Path(id): Path<CourseId>,
    Query(query): Query<TokenQuery>,
) -> Response {
    state
        .hits
        .lock()
        .unwrap()
        .push(format!("/courses/{id}/submissions"));
    per_course(&query, state.backend.submissions.get(&id))
}

fn per_course(query: &TokenQuery, payload: Option<&String>) -> Response {
    if query.token.as_deref() != Some(TOKEN) {
        return json(StatusCode::UNAUTHORIZED, INVALID_TOKEN.into());
    }
    match payload {
        Some(payload) => json(StatusCode::OK, payload.clone()),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
