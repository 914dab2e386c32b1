use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::defaults::*;

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub console: Option<ConsoleConfig>,
}

/// Console channel config.
///
/// Reads one message per stdin line and prints replies to stdout.
/// A line shaped like `id@host: text` is attributed to `id@host`;
/// any other line comes from `default_sender`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_console_sender")]
    pub default_sender: String,
    /// Display names by sender ID, served by `resolve_display_name`.
    #[serde(default)]
    pub contacts: HashMap<String, String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_sender: default_console_sender(),
            contacts: HashMap::new(),
        }
    }
}
