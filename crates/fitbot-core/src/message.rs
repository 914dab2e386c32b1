use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an inbound message was posted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// One-to-one chat with the sender.
    #[default]
    Direct,
    /// Group chat.
    Group,
    /// Broadcast list or status update.
    Broadcast,
}

impl ChannelKind {
    /// Classify a sender identifier by its address suffix.
    ///
    /// WhatsApp-style addressing: `...@g.us` is a group, anything under
    /// `@broadcast` (including `status@broadcast`) is a broadcast.
    pub fn classify(sender_id: &str) -> Self {
        if sender_id.contains("@g.us") {
            Self::Group
        } else if sender_id.contains("@broadcast") {
            Self::Broadcast
        } else {
            Self::Direct
        }
    }
}

/// An incoming message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "console", "whatsapp").
    pub channel: String,
    /// Platform-specific sender ID.
    pub sender_id: String,
    /// Human-readable sender name, when the transport ships one with the event.
    pub sender_name: Option<String>,
    /// Message text content.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: ChannelKind,
    /// Platform-specific target for routing the response. Defaults to the sender.
    #[serde(default)]
    pub reply_target: Option<String>,
}

impl IncomingMessage {
    /// Build a direct-chat message with a fresh ID and the current time.
    pub fn direct(channel: &str, sender_id: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel: channel.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: None,
            text: text.to_string(),
            timestamp: Utc::now(),
            kind: ChannelKind::classify(sender_id),
            reply_target: None,
        }
    }

    /// Whether this message came from a one-to-one chat.
    ///
    /// Checks both the kind reported by the transport and the sender
    /// address, so a transport that forgets to tag groups is still safe.
    pub fn is_direct(&self) -> bool {
        self.kind == ChannelKind::Direct
            && ChannelKind::classify(&self.sender_id) == ChannelKind::Direct
    }

    /// Where replies to this message should go.
    pub fn reply_target(&self) -> &str {
        self.reply_target.as_deref().unwrap_or(&self.sender_id)
    }
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Platform-specific recipient.
    pub target: String,
    pub text: String,
}

impl OutgoingMessage {
    pub fn new(target: &str, text: &str) -> Self {
        Self {
            target: target.to_string(),
            text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_group_and_broadcast() {
        assert_eq!(
            ChannelKind::classify("120363001234567890@g.us"),
            ChannelKind::Group
        );
        assert_eq!(
            ChannelKind::classify("status@broadcast"),
            ChannelKind::Broadcast
        );
        assert_eq!(
            ChannelKind::classify("5511999887766@c.us"),
            ChannelKind::Direct
        );
    }

    #[test]
    fn test_is_direct_checks_address_too() {
        let mut msg = IncomingMessage::direct("console", "5511999887766@c.us", "oi");
        assert!(msg.is_direct());

        msg.sender_id = "120363001234567890@g.us".into();
        msg.kind = ChannelKind::Direct;
        assert!(!msg.is_direct(), "group suffix must win over a wrong tag");
    }

    #[test]
    fn test_reply_target_defaults_to_sender() {
        let mut msg = IncomingMessage::direct("console", "alice@c.us", "1");
        assert_eq!(msg.reply_target(), "alice@c.us");
        msg.reply_target = Some("chat-42".into());
        assert_eq!(msg.reply_target(), "chat-42");
    }
}
