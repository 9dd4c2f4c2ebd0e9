//! Connection methods and command resolution.

use std::path::{Path, PathBuf};

use sshx_connect_core::{EndpointError, session_token};
use thiserror::Error;

/// Name of the external join tool.
pub const JOIN_TOOL: &str = "sshx";

/// Entry point of the Unix subsystem on the host.
pub const SUBSYSTEM_ENTRY: &str = "wsl";

/// Well-known Git Bash install locations, probed in order.
pub const GIT_BASH_PATHS: [&str; 2] = [
    r"C:\Program Files\Git\bin\bash.exe",
    r"C:\Program Files (x86)\Git\bin\bash.exe",
];

/// Launch error.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("no bash emulator found at any known install location")]
    ShellNotFound,
    #[error("failed to quote join command: {0}")]
    Quote(#[from] shlex::QuoteError),
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not open browser: {0}")]
    Browser(#[source] std::io::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How to reach a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMethod {
    /// Run the join tool through the Unix subsystem: `wsl sshx join <token>`.
    SubsystemShell,
    /// Run the join tool through a probed Git Bash install:
    /// `bash -c "sshx join <token>"`.
    BashEmulator,
    /// Open the full endpoint in the default browser.
    Browser,
}

/// A resolved launch: a foreground child or a browser navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    /// Spawn `program args..` and wait for it in the foreground.
    Foreground { program: PathBuf, args: Vec<String> },
    /// Hand `url` to the default browser and return immediately.
    OpenUrl { url: String },
}

impl ConnectMethod {
    /// Resolve this method against an endpoint into a concrete launch.
    ///
    /// `bash_probe` is the ordered list of paths checked for the bash
    /// emulator; the first existing one wins. Resolution does not spawn
    /// anything, so a failed probe costs nothing.
    ///
    /// # Errors
    /// [`LaunchError::Endpoint`] if the endpoint has no token (the browser
    /// method takes the endpoint verbatim and never parses it);
    /// [`LaunchError::ShellNotFound`] if no probed bash path exists.
    pub fn resolve(self, endpoint: &str, bash_probe: &[PathBuf]) -> Result<LaunchPlan, LaunchError> {
        match self {
            Self::SubsystemShell => {
                let token = session_token(endpoint)?;
                Ok(LaunchPlan::Foreground {
                    program: PathBuf::from(SUBSYSTEM_ENTRY),
                    args: vec![JOIN_TOOL.to_string(), "join".to_string(), token.to_string()],
                })
            }
            Self::BashEmulator => {
                let token = session_token(endpoint)?;
                let bash = find_bash(bash_probe).ok_or(LaunchError::ShellNotFound)?;
                let quoted = shlex::try_quote(token)?;
                Ok(LaunchPlan::Foreground {
                    program: bash.to_path_buf(),
                    args: vec!["-c".to_string(), format!("{JOIN_TOOL} join {quoted}")],
                })
            }
            Self::Browser => Ok(LaunchPlan::OpenUrl {
                url: endpoint.to_string(),
            }),
        }
    }
}

/// First existing path from the probe list.
#[must_use]
pub fn find_bash(probe: &[PathBuf]) -> Option<&Path> {
    probe.iter().map(PathBuf::as_path).find(|p| p.is_file())
}
