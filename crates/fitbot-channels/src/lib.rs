//! # fitbot-channels
//!
//! Messaging transports for fitbot.

pub mod console;
