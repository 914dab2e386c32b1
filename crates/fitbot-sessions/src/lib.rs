//! # fitbot-sessions
//!
//! Per-recipient conversation state, held in process memory only.
//! Nothing here survives a restart.

mod session;
mod store;


pub use session::{HistoryEntry, Session, SessionData};
pub use store::SessionStore;
