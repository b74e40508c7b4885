//! Session cache.
//!
//! Remembers where the page was left between runs: the active section and
//! the scroll offset. Entries live under `.cache/` keyed by a hash of the
//! page content signature, so a cached section index is never applied to a
//! page with different sections. Write errors are ignored to keep the UI
//! responsive.

use crate::content::{SECTION_COUNT, content_signature};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub active_section: usize,
    pub scroll_y: f32,
}

/// Load the cached session for the current page content, if present and
/// still plausible.
pub fn load_session() -> Option<Session> {
    let data = fs::read_to_string(session_path()).ok()?;
    let session: Session = toml::from_str(&data).ok()?;
    if session.active_section >= SECTION_COUNT || !session.scroll_y.is_finite() {
        return None;
    }
    Some(session)
}

/// Persist the current session. Errors are ignored.
pub fn save_session(session: &Session) {
    let path = session_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(contents) = toml::to_string(session) {
        let _ = fs::write(path, contents);
    }
}

fn hash_dir() -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(content_signature().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    Path::new(CACHE_DIR).join(hash)
}

fn session_path() -> PathBuf {
    hash_dir().join("session.toml")
}
