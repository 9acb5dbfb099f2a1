use {
    super::render,
    crate::controller::command::Command,
    axum::{
        extract::{Form, State},
        response::Html,
    },
    tokio::sync::{mpsc, oneshot},
};

/// Runs a fetch cycle and renders its outcome. An empty field reuses the
/// stored token.
pub async fn action(
    State(sender): State<mpsc::Sender<Command>>,
    Form(input): Form<ConnectInput>,
) -> Html<String> {
    async fn inner_connect(
        sender: mpsc::Sender<Command>,
        input: ConnectInput,
    ) -> anyhow::Result<Html<String>> {
        let (tx, rx) = oneshot::channel();
        let command = if input.token.trim().is_empty() {
            Command::Reconnect { response: tx }
        } else {
            Command::Connect {
                token: input.token,
                response: tx,
            }
        };
        let snapshot = match super::ask(&sender, command, rx).await? {
            Ok(snapshot) => snapshot,
            // The controller keeps the error of a failed cycle; local
            // rejections are shown once.
            Err(e) => {
                let snapshot = super::snapshot(&sender).await?;
                return Ok(Html(render::page_with_notice(&snapshot, &e.to_string())));
            }
        };
        Ok(Html(render::page(&snapshot)))
    }

    inner_connect(sender, input)
        .await
        .unwrap_or_else(super::error_to_html)
}

#[derive(serde::Deserialize, Debug)]
pub struct ConnectInput {
    #[serde(default)]
    token: String,
}
