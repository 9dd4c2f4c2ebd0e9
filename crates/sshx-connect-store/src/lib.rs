//! JSON persistence for saved sshx connections.
//!
//! Provides:
//! - `SessionStore` - load/save/upsert/touch/list over a single config file

pub mod store;

pub use store::{SessionStore, StoreError};
