use {
    super::render,
    crate::controller::command::Command,
    axum::{extract::State, response::Html},
    tokio::sync::{mpsc, oneshot},
};

pub async fn action(State(sender): State<mpsc::Sender<Command>>) -> Html<String> {
    async fn inner_disconnect(sender: mpsc::Sender<Command>) -> anyhow::Result<Html<String>> {
        let (tx, rx) = oneshot::channel();
        let snapshot = super::ask(&sender, Command::Disconnect { response: tx }, rx).await?;
        Ok(Html(render::page(&snapshot)))
    }

    inner_disconnect(sender)
        .await
        .unwrap_or_else(super::error_to_html)
}
