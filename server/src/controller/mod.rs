use {
    self::command::Command,
    crate::{config::Config, error::SessionError, lms::LmsClient, store::TokenStore},
    canvas_dashboard_core::{
        model::Token,
        session::{CycleId, Session},
    },
    serde::{Deserialize, Serialize},
    std::{fmt, path::Path, sync::Arc},
    tokio::{
        sync::{mpsc, oneshot},
        task::JoinHandle,
    },
};

pub mod command;
pub mod cycle;

/// Dashboard views. Only selects what is rendered; aggregation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Courses,
    Assignments,
    Grades,
    Leaderboard,
    Streaks,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Courses,
        Tab::Assignments,
        Tab::Grades,
        Tab::Leaderboard,
        Tab::Streaks,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Assignments => "assignments",
            Self::Grades => "grades",
            Self::Leaderboard => "leaderboard",
            Self::Streaks => "streaks",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Courses => "Courses",
            Self::Assignments => "Assignments",
            Self::Grades => "Grades",
            Self::Leaderboard => "Leaderboard",
            Self::Streaks => "Streaks",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// What the presentation layer gets to see of the controller.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: ConnectionStatus,
    pub active_tab: Tab,
    pub last_error: Option<String>,
    /// A token from an earlier connect is available for reconnecting.
    pub has_stored_token: bool,
    pub session: Arc<Session>,
}

pub type ConnectResponse = oneshot::Sender<Result<Snapshot, SessionError>>;

enum Phase {
    /// Also the landing state of a failed cycle; the error is kept in
    /// `last_error`.
    Disconnected,
    Connecting {
        cycle: CycleId,
        token: Token,
        response: ConnectResponse,
        task: JoinHandle<()>,
    },
    Connected,
}

pub struct CycleOutcome {
    pub cycle: CycleId,
    pub result: Result<Session, SessionError>,
}

/// Owns the one session of this process. Runs as a single task; commands are
/// handled one at a time and at most one fetch cycle is in flight.
pub struct Controller {
    phase: Phase,
    session: Arc<Session>,
    remembered_token: Option<Token>,
    last_error: Option<String>,
    active_tab: Tab,
    default_tab: Tab,
    store: TokenStore,
    client: LmsClient,
    policy: cycle::CoursePolicy,
    /// Sequence number of the last cycle started.
    cycles: u64,
    channel: mpsc::Receiver<Command>,
    finished_tx: mpsc::Sender<CycleOutcome>,
    finished: mpsc::Receiver<CycleOutcome>,
}

impl Controller {
    pub fn new(config: &Config) -> anyhow::Result<(Self, mpsc::Sender<Command>)> {
        let client = LmsClient::new(&config.backend_url, config.request_timeout())?;
        let store = TokenStore::new(Path::new(&config.token_store_path));
        let remembered_token = store.load();
        let (sender, channel) = mpsc::channel(config.state_channel_size);
        let (finished_tx, finished) = mpsc::channel(1);
        let controller = Self {
            phase: Phase::Disconnected,
            session: Arc::new(Session::empty()),
            remembered_token,
            last_error: None,
            active_tab: config.default_tab,
            default_tab: config.default_tab,
            store,
            client,
            policy: cycle::CoursePolicy::default(),
            cycles: 0,
            channel,
            finished_tx,
            finished,
        };
        Ok((controller, sender))
    }

    pub fn spawn(mut self) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    command = self.channel.recv() => {
                        let Some(command) = command else {
                            break;
                        };
                        self.handle(command);
                    }
                    Some(outcome) = self.finished.recv() => {
                        command::connect::handle_finished(&mut self, outcome);
                    }
                }
            }
            tracing::info!("Session controller stopped");
        })
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Connect { token, response } => {
                command::connect::handle(self, &token, response)
            }
            Command::Reconnect { response } => command::connect::handle_reconnect(self, response),
            Command::Disconnect { response } => command::disconnect::handle(self, response),
            Command::Snapshot { response } => {
                response.send(self.snapshot()).ok();
            }
            Command::SelectTab { tab } => {
                tracing::debug!("Selected tab {tab}");
                self.active_tab = tab;
            }
            Command::Leaderboard { response } => command::leader_board::handle(self, response),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        match self.phase {
            Phase::Disconnected => ConnectionStatus::Disconnected,
            Phase::Connecting { .. } => ConnectionStatus::Connecting,
            Phase::Connected => ConnectionStatus::Connected,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status(),
            active_tab: self.active_tab,
            last_error: self.last_error.clone(),
            has_stored_token: self.remembered_token.is_some(),
            session: self.session.clone(),
        }
    }
}


#[test]
fn test_tab_slugs() {
    for tab in Tab::ALL {
        let json = serde_json::to_string(&tab).unwrap();
        assert_eq!(json, format!("\"{}\"", tab.slug()));
    }
}
