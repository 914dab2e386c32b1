use chrono::{DateTime, Utc};
use fitbot_core::{stage::Stage, value::Scalar};
use serde::Serialize;
use std::collections::BTreeMap;

/// Form data accumulated across the steps of a flow.
pub type SessionData = BTreeMap<String, Scalar>;

/// One recorded input, kept for diagnostics only.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub input: String,
    pub at: DateTime<Utc>,
}

/// Conversation state for one recipient.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    recipient_id: String,
    display_name: String,
    pub stage: Stage,
    pub data: SessionData,
    last_activity: DateTime<Utc>,
    created_at: DateTime<Utc>,
    history: Option<Vec<HistoryEntry>>,
}

impl Session {
    /// A fresh session at `START`.
    pub fn new(recipient_id: &str, display_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            recipient_id: recipient_id.to_string(),
            display_name: display_name.to_string(),
            stage: Stage::Start,
            data: SessionData::new(),
            last_activity: now,
            created_at: now,
            history: None,
        }
    }

    /// Same as [`Session::new`], but with input history recording turned on.
    pub fn with_history(recipient_id: &str, display_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            history: Some(Vec::new()),
            ..Self::new(recipient_id, display_name, now)
        }
    }

    pub fn recipient_id(&self) -> &str {
        &self.recipient_id
    }

    /// Name captured at creation. Never changes afterwards.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Recorded inputs, or `None` when recording is off.
    pub fn history(&self) -> Option<&[HistoryEntry]> {
        self.history.as_deref()
    }

    /// Mark activity at `now`. Earlier timestamps are ignored so the
    /// activity clock never moves backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    /// Append an input to the history, if recording is on.
    pub fn record_input(&mut self, input: &str, at: DateTime<Utc>) {
        if let Some(history) = self.history.as_mut() {
            history.push(HistoryEntry {
                input: input.to_string(),
                at,
            });
        }
    }

    /// Whether the session has been idle longer than `threshold` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, threshold: chrono::Duration) -> bool {
        now - self.last_activity > threshold
    }
}
