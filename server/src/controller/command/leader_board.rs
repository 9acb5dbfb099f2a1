use {
    crate::controller::Controller, canvas_dashboard_core::leaderboard::LeaderboardEntry,
    tokio::sync::oneshot,
};

/// The ranking of the current session; empty while not connected.
pub fn handle(controller: &Controller, response: oneshot::Sender<Vec<LeaderboardEntry>>) {
    response.send(controller.session.leaderboard.clone()).ok();
}
