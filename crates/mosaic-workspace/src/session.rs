// Session persistence: every workspace slot saved across app restarts.
// Written at checkpoints (quit), never inline with a workspace switch.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::WorkspaceSnapshot;

// ──────────────────────────────────────────────
// Serializable session type
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Index of the workspace on screen when the session was written.
    #[serde(default)]
    pub current: usize,
    #[serde(default)]
    pub workspaces: Vec<Option<WorkspaceSnapshot>>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.workspaces.iter().flatten().all(WorkspaceSnapshot::is_empty)
    }
}

// ──────────────────────────────────────────────
// Session file I/O
// ──────────────────────────────────────────────

fn session_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("mosaic").join("session.json"))
}

pub fn save_session_to(path: &Path, session: &Session) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json)
}

pub fn load_session_from(path: &Path) -> io::Result<Session> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_session(session: &Session) {
    let path = match session_path() {
        Some(p) => p,
        None => {
            log::warn!("Could not determine config directory for session save");
            return;
        }
    };

    if let Err(e) = save_session_to(&path, session) {
        log::error!("Failed to write session file: {}", e);
    }
}

pub fn load_session() -> Option<Session> {
    let path = session_path()?;
    match load_session_from(&path) {
        Ok(session) => Some(session),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Failed to load session {}: {}", path.display(), e);
            None
        }
    }
}
