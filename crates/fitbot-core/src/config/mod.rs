mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::BotError;
use defaults::*;

/// Top-level fitbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
}

/// Which built-in menu tree to run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuVariant {
    /// Main menu 1-5, one-step slot booking.
    #[default]
    Standard,
    /// Main menu 1-6 with exit, named booking with confirmation, payment options.
    Extended,
}

impl MenuVariant {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Business name shown in the greeting.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub variant: MenuVariant,
    /// Optional TOML menu tree. When set, it replaces the built-in variant.
    #[serde(default)]
    pub menu_file: Option<String>,
    /// Placeholder used when a sender's name cannot be resolved.
    #[serde(default = "default_display_name")]
    pub default_display_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily-rotated log files. Unset = stdout only.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            variant: MenuVariant::default(),
            menu_file: None,
            default_display_name: default_display_name(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are swept.
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_minutes: u64,
    /// How often the sweep runs.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
    /// Keep a per-session log of raw inputs (diagnostics only).
    #[serde(default)]
    pub record_history: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_minutes: default_inactivity_timeout(),
            sweep_interval_minutes: default_sweep_interval(),
            record_history: false,
        }
    }
}

impl SessionConfig {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_minutes.saturating_mul(60))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_minutes.saturating_mul(60))
    }
}

/// Outgoing message pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Minimum gap between any two outgoing sends, across all recipients.
    #[serde(default = "default_min_send_interval")]
    pub min_send_interval_ms: u64,
    /// How long to wait on one send attempt before trying the fallback path.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            min_send_interval_ms: default_min_send_interval(),
            send_timeout_ms: default_send_timeout(),
        }
    }
}

impl DeliveryConfig {
    pub fn min_send_interval(&self) -> Duration {
        Duration::from_millis(self.min_send_interval_ms)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

/// Upper bound for the session timers.
pub const MAX_SESSION_MINUTES: u64 = 7 * 24 * 60;
/// Upper bound for the delivery timers.
pub const MAX_DELIVERY_MS: u64 = 60 * 60 * 1000;

impl Config {
    /// Reject settings that would make the bot misbehave at runtime.
    pub fn validate(&self) -> Result<(), BotError> {
        if self.session.inactivity_timeout_minutes == 0 {
            return Err(BotError::Config(
                "session.inactivity_timeout_minutes must be greater than 0".into(),
            ));
        }
        if self.session.sweep_interval_minutes == 0 {
            return Err(BotError::Config(
                "session.sweep_interval_minutes must be greater than 0".into(),
            ));
        }
        if self.delivery.send_timeout_ms == 0 {
            return Err(BotError::Config(
                "delivery.send_timeout_ms must be greater than 0".into(),
            ));
        }
        for (key, value) in [
            ("session.inactivity_timeout_minutes", self.session.inactivity_timeout_minutes),
            ("session.sweep_interval_minutes", self.session.sweep_interval_minutes),
        ] {
            if value > MAX_SESSION_MINUTES {
                return Err(BotError::Config(format!(
                    "{key} must be at most {MAX_SESSION_MINUTES} (one week)"
                )));
            }
        }
        for (key, value) in [
            ("delivery.min_send_interval_ms", self.delivery.min_send_interval_ms),
            ("delivery.send_timeout_ms", self.delivery.send_timeout_ms),
        ] {
            if value > MAX_DELIVERY_MS {
                return Err(BotError::Config(format!(
                    "{key} must be at most {MAX_DELIVERY_MS} (one hour)"
                )));
            }
        }
        if self.bot.default_display_name.trim().is_empty() {
            return Err(BotError::Config(
                "bot.default_display_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults (console channel enabled) if the file does not exist.
pub fn load(path: &str) -> Result<Config, BotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config {
            channel: ChannelConfig {
                console: Some(ConsoleConfig::default()),
            },
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| BotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config = parse(&content)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, BotError> {
    toml::from_str(content).map_err(|e| BotError::Config(format!("failed to parse config: {}", e)))
}
