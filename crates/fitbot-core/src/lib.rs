//! # fitbot-core
//!
//! Core types, traits, configuration, and error handling for the fitbot assistant.

pub mod config;
pub mod error;
pub mod message;
pub mod sanitize;
pub mod stage;
pub mod traits;
pub mod value;
