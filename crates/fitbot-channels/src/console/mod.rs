//! Console channel.
//!
//! Reads one message per stdin line and prints replies to stdout, so the
//! bot can be driven from a terminal or a script without a messaging
//! account. A line shaped like `5511988887777@c.us: oi` is attributed to
//! that address; any other line comes from the configured default sender.


use async_trait::async_trait;
use fitbot_core::{
    config::ConsoleConfig,
    error::BotError,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

/// Channel name used in logs and message metadata.
pub const NAME: &str = "console";

type Output = Box<dyn AsyncWrite + Send + Unpin>;

/// Line-oriented stdin/stdout channel.
pub struct ConsoleChannel {
    config: ConsoleConfig,
    out: Mutex<Output>,
}

impl ConsoleChannel {
    /// Create a console channel writing to stdout.
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_output(config, Box::new(tokio::io::stdout()))
    }

    /// Create a console channel writing replies to `out`.
    pub fn with_output(config: ConsoleConfig, out: Output) -> Self {
        Self {
            config,
            out: Mutex::new(out),
        }
    }
}

/// Split an input line into `(sender, text)`.
///
/// Returns `None` for blank lines.
pub fn parse_line<'a>(line: &'a str, default_sender: &'a str) -> Option<(&'a str, &'a str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some((id, text)) = line.split_once(':') {
        let id = id.trim();
        if id.contains('@') && !id.contains(char::is_whitespace) {
            return Some((id, text.trim()));
        }
    }
    Some((default_sender, line))
}

/// Render a reply the way it is printed.
pub fn format_reply(message: &OutgoingMessage) -> String {
    format!("[to {}] {}\n", message.target, message.text)
}

/// Forward every non-blank line of `reader` into `tx` until EOF.
pub(crate) async fn read_lines<R>(reader: R, default_sender: String, tx: mpsc::Sender<IncomingMessage>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("console input closed");
                break;
            }
            Err(e) => {
                warn!("console read error: {e}");
                break;
            }
        };

        let Some((sender, text)) = parse_line(&line, &default_sender) else {
            continue;
        };
        debug!("console: {sender} -> {} chars", text.len());

        let msg = IncomingMessage::direct(NAME, sender, text);
        if tx.send(msg).await.is_err() {
            break;
        }
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str {
        NAME
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, BotError> {
        let (tx, rx) = mpsc::channel(64);
        let default_sender = self.config.default_sender.clone();

        info!("Console channel reading stdin (default sender {default_sender})");
        tokio::spawn(async move {
            read_lines(BufReader::new(tokio::io::stdin()), default_sender, tx).await;
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError> {
        let mut out = self.out.lock().await;
        out.write_all(format_reply(&message).as_bytes())
            .await
            .map_err(|e| BotError::Channel(format!("console write failed: {e}")))?;
        out.flush()
            .await
            .map_err(|e| BotError::Channel(format!("console flush failed: {e}")))?;
        Ok(())
    }

    async fn resolve_display_name(&self, sender_id: &str) -> Option<String> {
        self.config
            .contacts
            .get(sender_id)
            .filter(|name| !name.trim().is_empty())
            .cloned()
    }

    async fn stop(&self) -> Result<(), BotError> {
        info!("Console channel stopped");
        let mut out = self.out.lock().await;
        out.flush().await?;
        Ok(())
    }
}
