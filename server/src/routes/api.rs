use {
    crate::controller::{Snapshot, command::Command},
    axum::{Json, extract::State, http::StatusCode},
    tokio::sync::mpsc,
};

/// The controller state as JSON. The token is never part of it.
pub async fn session(
    State(sender): State<mpsc::Sender<Command>>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    super::snapshot(&sender)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
}
