//! Foreground launches and browser navigation.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use async_trait::async_trait;
use tokio::process::Command;

use crate::method::{ConnectMethod, GIT_BASH_PATHS, LaunchError, LaunchPlan};

/// Outcome of a dispatched connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The foreground child exited on its own.
    Exited { success: bool },
    /// The user interrupted the foreground child with Ctrl+C. Not an error.
    Interrupted,
    /// The browser navigation was issued.
    Opened,
}

/// Opens a URL in the user's default browser.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Issue the open request. Best-effort; must not block on the browser.
    async fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Platform opener: `xdg-open` / `open` / `cmd /c start`. Fire and forget.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

#[async_trait]
impl UrlOpener for SystemOpener {
    async fn open(&self, url: &str) -> std::io::Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "start", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Turns an endpoint plus a chosen method into a running connection.
///
/// Foreground methods suspend the caller until the child exits or the user
/// interrupts it; the browser method returns as soon as the open request is
/// issued. The bash probe list and the opener are injected so tests run
/// without touching the real filesystem or spawning anything.
pub struct Dispatcher<O: UrlOpener = SystemOpener> {
    bash_probe: Vec<PathBuf>,
    opener: O,
}

impl Dispatcher<SystemOpener> {
    /// Dispatcher with the default probe list and the platform opener.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(
            GIT_BASH_PATHS.iter().map(Into::into).collect(),
            SystemOpener,
        )
    }
}

impl Default for Dispatcher<SystemOpener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: UrlOpener> Dispatcher<O> {
    /// Dispatcher with an explicit probe list and opener.
    #[must_use]
    pub fn with_parts(bash_probe: Vec<PathBuf>, opener: O) -> Self {
        Self { bash_probe, opener }
    }

    /// Resolve `method` against `endpoint` and run the connection.
    ///
    /// # Errors
    /// Resolution errors from [`ConnectMethod::resolve`], spawn failures,
    /// and browser-open failures. A browser failure is safe to report and
    /// ignore; nothing was left running.
    pub async fn connect(
        &self,
        endpoint: &str,
        method: ConnectMethod,
    ) -> Result<ConnectOutcome, LaunchError> {
        match method.resolve(endpoint, &self.bash_probe)? {
            LaunchPlan::Foreground { program, args } => run_foreground(&program, &args).await,
            LaunchPlan::OpenUrl { url } => {
                tracing::info!(%url, "opening browser");
                self.opener.open(&url).await.map_err(LaunchError::Browser)?;
                Ok(ConnectOutcome::Opened)
            }
        }
    }
}

/// Spawn the join process, inherit the terminal, wait until it exits or the
/// user interrupts it.
async fn run_foreground(program: &Path, args: &[String]) -> Result<ConnectOutcome, LaunchError> {
    tracing::info!(program = %program.display(), ?args, "launching join tool");

    let mut child = Command::new(program)
        .args(args)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    tokio::select! {
        status = child.wait() => {
            let status = status?;
            tracing::debug!(%status, "join tool exited");
            Ok(ConnectOutcome::Exited { success: status.success() })
        }
        _ = tokio::signal::ctrl_c() => {
            // The child shares the terminal, so the SIGINT usually reaches
            // it as well; make sure it is gone before the menu resumes.
            let _ = child.start_kill();
            let _ = child.wait().await;
            Ok(ConnectOutcome::Interrupted)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Opener that records every URL instead of spawning a browser.
    #[derive(Default, Clone)]
    struct RecordingOpener {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl UrlOpener for RecordingOpener {
        async fn open(&self, url: &str) -> std::io::Result<()> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    /// Opener that always fails.
    struct BrokenOpener;

    #[async_trait]
    impl UrlOpener for BrokenOpener {
        async fn open(&self, _url: &str) -> std::io::Result<()> {
            Err(std::io::Error::other("no browser here"))
        }
    }

    #[tokio::test]
    async fn test_browser_opens_exact_endpoint() {
        let opener = RecordingOpener::default();
        let dispatcher = Dispatcher::with_parts(vec![], opener.clone());

        let endpoint = "https://sshx.io/s/ABC123#secret1";
        let outcome = dispatcher
            .connect(endpoint, ConnectMethod::Browser)
            .await
            .unwrap();

        assert_eq!(outcome, ConnectOutcome::Opened);
        assert_eq!(*opener.seen.lock().unwrap(), vec![endpoint.to_string()]);
    }

    #[tokio::test]
    async fn test_browser_failure_surfaces() {
        let dispatcher = Dispatcher::with_parts(vec![], BrokenOpener);
        let err = dispatcher
            .connect("https://sshx.io/s/ABC123", ConnectMethod::Browser)
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::Browser(_)));
    }

    #[tokio::test]
    async fn test_exhausted_probe_spawns_nothing() {
        let opener = RecordingOpener::default();
        let dispatcher = Dispatcher::with_parts(
            vec!["/nowhere/bash.exe".into()],
            opener.clone(),
        );

        let err = dispatcher
            .connect("https://sshx.io/s/ABC123", ConnectMethod::BashEmulator)
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::ShellNotFound));
        assert!(opener.seen.lock().unwrap().is_empty());
    }
}
