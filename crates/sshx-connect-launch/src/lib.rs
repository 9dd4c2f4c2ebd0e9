//! Launch dispatcher for sshx connection methods.
//!
//! Provides:
//! - `ConnectMethod` - the closed set of ways to reach a session
//! - `Dispatcher` - spawn the foreground join process or open the browser
//! - `UrlOpener` - browser seam, with a platform implementation

pub mod dispatcher;
pub mod method;

pub use dispatcher::{ConnectOutcome, Dispatcher, SystemOpener, UrlOpener};
pub use method::{
    ConnectMethod, GIT_BASH_PATHS, JOIN_TOOL, LaunchError, LaunchPlan, SUBSYSTEM_ENTRY, find_bash,
};
