//! Message processing pipeline: the handle_message flow.

use super::{DeliveryOutcome, Gateway};
use chrono::Utc;
use fitbot_core::{
    message::{IncomingMessage, OutgoingMessage},
    sanitize,
    stage::Stage,
};
use fitbot_dialogue::Effect;
use tracing::{debug, error, info, warn};

impl Gateway {
    /// Process a single incoming message through the full pipeline.
    pub(super) async fn handle_message(&mut self, incoming: IncomingMessage) {
        let preview = if incoming.text.chars().count() > 60 {
            let truncated: String = incoming.text.chars().take(60).collect();
            format!("{truncated}...")
        } else {
            incoming.text.clone()
        };
        info!("[{}] {} says: {}", incoming.channel, incoming.sender_id, preview);

        // --- 1. DIRECT CHATS ONLY ---
        if !incoming.is_direct() {
            debug!(
                "ignoring {:?} message from {}",
                incoming.kind, incoming.sender_id
            );
            return;
        }

        let Some(channel) = self.channels.get(&incoming.channel).cloned() else {
            warn!("message from unknown channel {}", incoming.channel);
            return;
        };

        // --- 2. SANITIZE INPUT ---
        let sanitized = sanitize::sanitize(&incoming.text);
        if sanitized.was_modified {
            warn!(
                "sanitized input from {}: {:?}",
                incoming.sender_id, sanitized.warnings
            );
        }
        let text = sanitized.text;

        // --- 3. SESSION ---
        let recipient = incoming.sender_id.clone();
        let name_hint = if self.sessions.contains(&recipient) {
            None
        } else {
            match incoming.sender_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Some(name.to_string()),
                _ => channel.resolve_display_name(&recipient).await,
            }
        };

        let now = Utc::now();
        let session = self
            .sessions
            .get_or_create(&recipient, name_hint.as_deref(), now);
        session.touch(now);
        session.record_input(&text, now);

        // --- 4. DIALOGUE ---
        let mut end_session = false;
        let replies = match self.engine.process(session, &text) {
            Ok(outcome) => {
                outcome.apply(session);
                for effect in &outcome.effects {
                    match effect {
                        Effect::EndSession => end_session = true,
                        Effect::Notify { event, details } => {
                            info!(
                                "{event} | {} ({}) | {:?}",
                                session.display_name(),
                                recipient,
                                details
                            );
                        }
                    }
                }
                outcome.messages
            }
            Err(e) => {
                error!("dialogue error for {recipient} at {}: {e}", session.stage);
                session.stage = Stage::Start;
                session.data.clear();
                vec![self.engine.apology(session.display_name())]
            }
        };

        if end_session {
            if let Some(ended) = self.sessions.remove(&recipient) {
                let lasted = now - ended.created_at();
                info!("session ended by {recipient} after {}s", lasted.num_seconds());
            }
        }

        // --- 5. DELIVER ---
        let target = incoming.reply_target();
        for reply in replies {
            let outcome = self
                .outbox
                .deliver(channel.as_ref(), OutgoingMessage::new(target, &reply))
                .await;
            if outcome != DeliveryOutcome::Primary {
                debug!("reply to {target}: {outcome:?}");
            }
        }
    }
}
