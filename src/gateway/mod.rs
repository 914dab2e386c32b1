//! Gateway: the event loop connecting channels, sessions and the dialogue engine.
//!
//! One task owns all conversation state. Inbound messages from every channel
//! are merged into a single queue and handled one at a time, so sends for a
//! recipient go out in the order their messages arrived and the sweep never
//! runs in the middle of a handler.

mod outbox;
mod pipeline;


pub use outbox::{DeliveryOutcome, SendThrottle};

use chrono::Utc;
use fitbot_core::{config::SessionConfig, message::IncomingMessage, traits::Channel};
use fitbot_dialogue::Engine;
use fitbot_sessions::SessionStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// The central gateway that routes messages between channels and the engine.
pub struct Gateway {
    pub(super) engine: Engine,
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) sessions: SessionStore,
    pub(super) outbox: SendThrottle,
    pub(super) session_config: SessionConfig,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        engine: Engine,
        channels: HashMap<String, Arc<dyn Channel>>,
        sessions: SessionStore,
        outbox: SendThrottle,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            engine,
            channels,
            sessions,
            outbox,
            session_config,
        }
    }

    /// Run the main event loop until ctrl-c or until every channel closes.
    pub async fn run(mut self) -> anyhow::Result<()> {
        info!(
            "fitbot gateway running | channels: {} | session timeout: {}m | sweep every {}m",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.session_config.inactivity_timeout_minutes,
            self.session_config.sweep_interval_minutes,
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        let period = self.session_config.sweep_interval();
        let first = tokio::time::Instant::now()
            .checked_add(period)
            .unwrap_or_else(tokio::time::Instant::now);
        let mut sweep = tokio::time::interval_at(first, period);

        loop {
            tokio::select! {
                incoming = rx.recv() => match incoming {
                    Some(incoming) => self.handle_message(incoming).await,
                    None => {
                        info!("All channels closed");
                        break;
                    }
                },
                _ = sweep.tick() => {
                    self.sweep_sessions();
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Drop sessions idle for longer than the inactivity timeout.
    pub(super) fn sweep_sessions(&mut self) -> usize {
        let removed = self
            .sessions
            .sweep(Utc::now(), self.session_config.inactivity_timeout());
        if removed > 0 {
            info!(
                "swept {removed} inactive session(s), {} active",
                self.sessions.len()
            );
        }
        removed
    }

    /// Graceful shutdown: stop channels.
    async fn shutdown(&self) {
        info!("Shutting down ({} active session(s))...", self.sessions.len());

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }
}
