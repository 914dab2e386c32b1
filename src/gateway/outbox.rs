//! Throttled delivery of replies.

use fitbot_core::{config::DeliveryConfig, message::OutgoingMessage, traits::Channel};
use std::time::Duration;
use tokio::time::{sleep_until, timeout, Instant};
use tracing::{debug, warn};

/// How a reply left the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Primary,
    Fallback,
    /// Both paths failed; the reply is lost.
    Dropped,
}

/// Global send pacing shared by every recipient and channel.
///
/// Consecutive deliveries start at least `min_interval` apart, measured
/// from the end of the previous delivery. Each path gets `send_timeout`.
#[derive(Debug)]
pub struct SendThrottle {
    min_interval: Duration,
    send_timeout: Duration,
    last_send: Option<Instant>,
}

impl SendThrottle {
    pub fn new(min_interval: Duration, send_timeout: Duration) -> Self {
        Self {
            min_interval,
            send_timeout,
            last_send: None,
        }
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self::new(config.min_send_interval(), config.send_timeout())
    }

    /// Deliver one message: primary path, then fallback, then give up.
    pub async fn deliver(&mut self, channel: &dyn Channel, message: OutgoingMessage) -> DeliveryOutcome {
        self.wait_turn().await;
        let outcome = self.attempt(channel, message).await;
        self.last_send = Some(Instant::now());
        outcome
    }

    async fn wait_turn(&self) {
        if let Some(last) = self.last_send {
            let ready = last + self.min_interval;
            if Instant::now() < ready {
                debug!("throttling send for {:?}", ready - Instant::now());
                sleep_until(ready).await;
            }
        }
    }

    async fn attempt(&self, channel: &dyn Channel, message: OutgoingMessage) -> DeliveryOutcome {
        let target = message.target.clone();

        match timeout(self.send_timeout, channel.send(message.clone())).await {
            Ok(Ok(())) => return DeliveryOutcome::Primary,
            Ok(Err(e)) => warn!("{}: send to {target} failed, trying fallback: {e}", channel.name()),
            Err(_) => warn!(
                "{}: send to {target} timed out after {:?}, trying fallback",
                channel.name(),
                self.send_timeout
            ),
        }

        match timeout(self.send_timeout, channel.send_fallback(message)).await {
            Ok(Ok(())) => DeliveryOutcome::Fallback,
            Ok(Err(e)) => {
                warn!("{}: fallback to {target} failed, dropping reply: {e}", channel.name());
                DeliveryOutcome::Dropped
            }
            Err(_) => {
                warn!("{}: fallback to {target} timed out, dropping reply", channel.name());
                DeliveryOutcome::Dropped
            }
        }
    }
}
