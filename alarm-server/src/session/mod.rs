//! Per-session journey state.
//!
//! Each caller identifies itself with a `SessionId`; the store maps that
//! id to at most one route quote and one journey. There is no ambient
//! "current session": every operation names the session it acts on.

mod id;
mod store;

pub use id::{InvalidSessionId, SessionId};
pub use store::{SessionStore, SessionStoreConfig};
