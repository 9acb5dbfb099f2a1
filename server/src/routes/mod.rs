use {
    crate::{
        controller::{Snapshot, command::Command},
        error::SessionError,
    },
    axum::{
        Router,
        response::Html,
        routing::{get, post},
    },
    tokio::sync::{mpsc, oneshot},
};

pub mod api;
pub mod connect;
pub mod dashboard;
pub mod disconnect;
pub mod leaderboard;
mod render;

pub fn router(sender: mpsc::Sender<Command>) -> Router {
    Router::new()
        .route("/", get(dashboard::form))
        .route("/connect", post(connect::action))
        .route("/disconnect", post(disconnect::action))
        .route("/leaderboard", get(leaderboard::action))
        .route("/api/session", get(api::session))
        .with_state(sender)
}

fn error_to_html(e: anyhow::Error) -> Html<String> {
    Html(format!("An error occurred: {e:?}"))
}

/// Sends `command` to the controller and waits for the reply on `reply`.
async fn ask<T>(
    sender: &mpsc::Sender<Command>,
    command: Command,
    reply: oneshot::Receiver<T>,
) -> Result<T, SessionError> {
    sender.send(command).await?;
    Ok(reply.await?)
}

async fn snapshot(sender: &mpsc::Sender<Command>) -> Result<Snapshot, SessionError> {
    let (tx, rx) = oneshot::channel();
    ask(sender, Command::Snapshot { response: tx }, rx).await
}
