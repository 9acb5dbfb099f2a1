use {
    super::render,
    crate::{
        controller::{Tab, command::Command},
        error::SessionError,
    },
    axum::{
        extract::{Query, State},
        response::Html,
    },
    tokio::sync::mpsc,
};

#[derive(serde::Deserialize, Debug)]
pub struct TabQuery {
    tab: Option<Tab>,
}

pub async fn form(
    State(sender): State<mpsc::Sender<Command>>,
    Query(query): Query<TabQuery>,
) -> Html<String> {
    async fn inner_dashboard(
        sender: mpsc::Sender<Command>,
        tab: Option<Tab>,
    ) -> anyhow::Result<Html<String>> {
        if let Some(tab) = tab {
            sender
                .send(Command::SelectTab { tab })
                .await
                .map_err(SessionError::from)?;
        }
        let snapshot = super::snapshot(&sender).await?;
        Ok(Html(render::page(&snapshot)))
    }

    inner_dashboard(sender, query.tab)
        .await
        .unwrap_or_else(super::error_to_html)
}
