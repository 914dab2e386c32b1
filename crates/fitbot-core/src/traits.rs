use crate::{
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
};
use async_trait::async_trait;

/// Messaging Channel trait: the transport.
///
/// Every messaging platform implements this trait to receive and send
/// messages. The dialogue core never reaches past it: read receipts,
/// pairing and session credentials are the adapter's business, and an
/// adapter must keep read receipts idempotent and free of side effects.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, BotError>;

    /// Send a text message through the primary delivery path.
    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError>;

    /// Alternate delivery path, tried when `send` fails or times out.
    async fn send_fallback(&self, message: OutgoingMessage) -> Result<(), BotError> {
        self.send(message).await
    }

    /// Best-effort lookup of a sender's display name.
    async fn resolve_display_name(&self, _sender_id: &str) -> Option<String> {
        None
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BotError>;
}
