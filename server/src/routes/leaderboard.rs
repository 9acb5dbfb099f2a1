use {
    super::render,
    crate::controller::command::Command,
    axum::{extract::State, response::Html},
    tokio::sync::{mpsc, oneshot},
};

pub async fn action(State(sender): State<mpsc::Sender<Command>>) -> Html<String> {
    async fn inner_leaderboard(sender: mpsc::Sender<Command>) -> anyhow::Result<Html<String>> {
        let (tx, rx) = oneshot::channel();
        let command = Command::Leaderboard { response: tx };
        let entries = super::ask(&sender, command, rx).await?;
        let mut result = String::new();
        result.push_str(include_str!("../../html/head.html"));
        result.push_str("<p><a href=\"/\">Back to dashboard</a></p>\n");
        result.push_str(&render::leaderboard_table(&entries));
        result.push_str("</body></html>");
        Ok(Html(result))
    }
    inner_leaderboard(sender)
        .await
        .unwrap_or_else(super::error_to_html)
}
