//! Durable storage for the access token between restarts.

use {
    canvas_dashboard_core::model::Token,
    serde::{Deserialize, Serialize},
    std::{
        borrow::Cow,
        io,
        path::{Path, PathBuf},
    },
};

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken<'a> {
    canvas_token: Cow<'a, str>,
}

/// Keeps the raw token under the single key `canvas_token` in a JSON file.
///
/// Storage problems never reach the caller: `load` degrades to `None` and
/// failed writes are logged.
#[derive(Debug, Clone)]
pub struct TokenStore {
    dest_path: PathBuf,
}

impl TokenStore {
    pub fn new(path: &Path) -> Self {
        Self {
            dest_path: path.into(),
        }
    }

    pub fn load(&self) -> Option<Token> {
        let contents = match std::fs::read_to_string(&self.dest_path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read stored token: {e:?}");
                }
                return None;
            }
        };
        let stored: StoredToken<'_> = serde_json::from_str(&contents)
            .inspect_err(|e| tracing::warn!("Ignoring malformed token store: {e}"))
            .ok()?;
        let token = Token::new(&stored.canvas_token).ok()?;
        tracing::info!("Restored stored token {token}");
        Some(token)
    }

    pub fn save(&self, token: &Token) {
        let stored = StoredToken {
            canvas_token: Cow::Borrowed(token.expose()),
        };
        let payload = match serde_json::to_string(&stored) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize token: {e:?}");
                return;
            }
        };
        let mut output_path = self.dest_path.clone();
        output_path.set_extension("tmp");
        let result = std::fs::write(&output_path, payload)
            .and_then(|()| std::fs::rename(&output_path, &self.dest_path));
        match result {
            Ok(()) => tracing::debug!("Persisted token {token}"),
            Err(e) => tracing::error!("Failed to persist token: {e:?}"),
        }
    }

    pub fn clear(&self) {
        match std::fs::remove_file(&self.dest_path) {
            Ok(()) => tracing::debug!("Cleared stored token"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => (),
            Err(e) => tracing::error!("Failed to clear stored token: {e:?}"),
        }
    }
}
