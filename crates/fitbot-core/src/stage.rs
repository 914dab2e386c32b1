//! Conversation stages: the nodes of the dialogue tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The current node in a session's dialogue tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Start,
    Menu,
    Plans,
    Promo,
    Schedule,
    Human,
    ScheduleName,
    ScheduleTime,
    ConfirmSchedule,
    PaymentOptions,
}

impl Stage {
    /// Every stage, in declaration order.
    pub const ALL: [Stage; 10] = [
        Stage::Start,
        Stage::Menu,
        Stage::Plans,
        Stage::Promo,
        Stage::Schedule,
        Stage::Human,
        Stage::ScheduleName,
        Stage::ScheduleTime,
        Stage::ConfirmSchedule,
        Stage::PaymentOptions,
    ];

    /// Stable upper-case name, as used in menu files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Menu => "MENU",
            Self::Plans => "PLANS",
            Self::Promo => "PROMO",
            Self::Schedule => "SCHEDULE",
            Self::Human => "HUMAN",
            Self::ScheduleName => "SCHEDULE_NAME",
            Self::ScheduleTime => "SCHEDULE_TIME",
            Self::ConfirmSchedule => "CONFIRM_SCHEDULE",
            Self::PaymentOptions => "PAYMENT_OPTIONS",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
