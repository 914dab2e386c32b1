//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "DEV FIT ACADEMY".to_string()
}

pub fn default_display_name() -> String {
    "Cliente".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_inactivity_timeout() -> u64 {
    30
}

pub fn default_sweep_interval() -> u64 {
    10
}

pub fn default_min_send_interval() -> u64 {
    1000
}

pub fn default_send_timeout() -> u64 {
    5000
}

pub fn default_console_sender() -> String {
    "5511999887766@c.us".to_string()
}
