use {
    super::{ConnectResponse, Snapshot, Tab},
    canvas_dashboard_core::leaderboard::LeaderboardEntry,
    tokio::sync::oneshot,
};

pub mod connect;
pub mod disconnect;
pub mod leader_board;

/// Commands the app can send to the controller
#[derive(Debug)]
pub enum Command {
    /// Starts a fetch cycle; answered once the cycle concludes.
    Connect {
        token: String,
        response: ConnectResponse,
    },
    /// Connect with the token remembered from an earlier session.
    Reconnect { response: ConnectResponse },
    Disconnect {
        response: oneshot::Sender<Snapshot>,
    },
    Snapshot {
        response: oneshot::Sender<Snapshot>,
    },
    SelectTab { tab: Tab },
    Leaderboard {
        response: oneshot::Sender<Vec<LeaderboardEntry>>,
    },
}
