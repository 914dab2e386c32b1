//! # fitbot-dialogue
//!
//! The menu tree and the engine that walks it. Given a session and one
//! line of user input, the engine decides what to answer and where the
//! conversation goes next. It never touches the transport and never
//! mutates the session itself: callers apply the returned [`Outcome`].

mod engine;
mod error;
mod input;
pub mod menu;
mod template;

#[cfg(test)]
mod tests;

pub use engine::{Effect, Engine, Outcome};
pub use error::DialogueError;
pub use input::Input;
pub use menu::{Action, BindValue, Choice, Fallback, MenuNode, MenuTree};
pub use template::render;
