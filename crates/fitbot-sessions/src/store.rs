use crate::session::Session;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// All live sessions, keyed by recipient ID.
///
/// Owned by a single task; callers that share it across threads must
/// wrap it themselves.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
    record_history: bool,
    default_display_name: String,
}

impl SessionStore {
    /// Create an empty store. `default_display_name` is used when a new
    /// session arrives without a usable name hint.
    pub fn new(default_display_name: &str, record_history: bool) -> Self {
        Self {
            sessions: HashMap::new(),
            record_history,
            default_display_name: default_display_name.to_string(),
        }
    }

    /// Return the recipient's session, creating one at `START` if needed.
    ///
    /// The name hint only matters on creation; existing sessions keep the
    /// name they were created with.
    pub fn get_or_create(
        &mut self,
        recipient_id: &str,
        display_name_hint: Option<&str>,
        now: DateTime<Utc>,
    ) -> &mut Session {
        let record_history = self.record_history;
        let fallback = self.default_display_name.as_str();
        self.sessions
            .entry(recipient_id.to_string())
            .or_insert_with(|| {
                let name = display_name_hint
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(fallback);
                info!("new session for {recipient_id} ({name})");
                if record_history {
                    Session::with_history(recipient_id, name, now)
                } else {
                    Session::new(recipient_id, name, now)
                }
            })
    }

    pub fn get(&self, recipient_id: &str) -> Option<&Session> {
        self.sessions.get(recipient_id)
    }

    pub fn contains(&self, recipient_id: &str) -> bool {
        self.sessions.contains_key(recipient_id)
    }

    /// Mark activity for a recipient. Returns `false` if there is no session.
    pub fn touch(&mut self, recipient_id: &str, now: DateTime<Utc>) -> bool {
        match self.sessions.get_mut(recipient_id) {
            Some(session) => {
                session.touch(now);
                true
            }
            None => false,
        }
    }

    /// Delete a session. Returns it if it existed.
    pub fn remove(&mut self, recipient_id: &str) -> Option<Session> {
        let removed = self.sessions.remove(recipient_id);
        if removed.is_some() {
            debug!("session removed: {recipient_id}");
        }
        removed
    }

    /// Remove every session idle for longer than `threshold` at `now`.
    /// Returns how many were removed.
    pub fn sweep(&mut self, now: DateTime<Utc>, threshold: Duration) -> usize {
        let threshold = chrono::Duration::from_std(threshold).unwrap_or(chrono::Duration::MAX);
        let before = self.sessions.len();
        self.sessions.retain(|id, session| {
            let expired = session.is_expired(now, threshold);
            if expired {
                info!("removing inactive session: {id}");
            }
            !expired
        });
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
