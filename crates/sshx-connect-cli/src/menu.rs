//! Interactive numbered menu.

use std::io::Write as _;

use sshx_connect_launch::{
    ConnectMethod, ConnectOutcome, Dispatcher, LaunchError, SUBSYSTEM_ENTRY, SystemOpener,
};
use sshx_connect_store::{SessionStore, StoreError};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::setup;

/// Run the menu until the user quits or sends EOF/Ctrl+C at a prompt.
pub async fn run(store: SessionStore, dispatcher: Dispatcher<SystemOpener>) -> anyhow::Result<()> {
    let mut menu = Menu {
        store,
        dispatcher,
        lines: BufReader::new(tokio::io::stdin()).lines(),
    };
    menu.run().await;
    Ok(())
}

struct Menu {
    store: SessionStore,
    dispatcher: Dispatcher<SystemOpener>,
    lines: Lines<BufReader<Stdin>>,
}

impl Menu {
    async fn run(&mut self) {
        println!();
        println!("============================================");
        println!("  sshx connection manager");
        println!("============================================");

        loop {
            println!();
            println!("Menu:");
            println!("  1. Connect with a new URL");
            println!("  2. Connect to a saved session");
            println!("  3. List saved sessions");
            println!("  4. Setup help");
            println!("  5. Open a URL in the browser");
            println!("  0. Quit");

            let Some(choice) = self.prompt("Select an option: ").await else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.connect_new().await,
                "2" => self.connect_saved().await,
                "3" => {
                    self.list_sessions().await;
                    Some(())
                }
                "4" => {
                    setup::print_setup_help();
                    Some(())
                }
                "5" => self.open_in_browser().await,
                "0" => break,
                "" => Some(()),
                _ => {
                    println!("Invalid option");
                    Some(())
                }
            };

            if outcome.is_none() {
                break;
            }
        }

        println!("\nBye!");
    }

    /// Prompt on stdout and read one trimmed line.
    ///
    /// `None` means the user sent EOF or Ctrl+C; the caller should leave
    /// the menu.
    async fn prompt(&mut self, text: &str) -> Option<String> {
        print!("\n{text}");
        let _ = std::io::stdout().flush();

        tokio::select! {
            line = self.lines.next_line() => match line {
                Ok(Some(line)) => Some(line.trim().to_string()),
                Ok(None) | Err(_) => None,
            },
            _ = tokio::signal::ctrl_c() => None,
        }
    }

    async fn connect_new(&mut self) -> Option<()> {
        let url = self.prompt("sshx URL: ").await?;
        if url.is_empty() {
            println!("Empty URL");
            return Some(());
        }

        let name = self.prompt("Name for this session (Enter = default): ").await?;
        let name = if name.is_empty() {
            "default".to_string()
        } else {
            name
        };

        if let Err(err) = self.store.upsert(&name, &url).await {
            report_store_error(&err);
            return Some(());
        }
        println!("Session '{name}' saved");

        self.connect(&url).await
    }

    async fn connect_saved(&mut self) -> Option<()> {
        let sessions = match self.store.list().await {
            Ok(sessions) => sessions,
            Err(err) => {
                report_store_error(&err);
                return Some(());
            }
        };
        if sessions.is_empty() {
            println!("No saved sessions");
            return Some(());
        }

        println!("\nSaved sessions:");
        for (i, (name, record)) in sessions.iter().enumerate() {
            println!("  {}. {} - {}", i + 1, name, record.url);
        }

        let picked = self.prompt("Session number: ").await?;
        let index = picked.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        let Some((name, record)) = index.and_then(|i| sessions.get(i)) else {
            println!("Invalid number");
            return Some(());
        };

        if let Err(err) = self.store.touch(name).await {
            report_store_error(&err);
            return Some(());
        }

        self.connect(&record.url).await
    }

    /// Method chooser plus the actual dispatch.
    async fn connect(&mut self, endpoint: &str) -> Option<()> {
        println!("\nHow do you want to connect?");
        println!("  1. WSL (recommended)");
        println!("  2. Git Bash");
        println!("  3. Web browser");

        let method = match self.prompt("Method: ").await?.as_str() {
            "1" => ConnectMethod::SubsystemShell,
            "2" => ConnectMethod::BashEmulator,
            "3" => ConnectMethod::Browser,
            _ => {
                println!("Invalid option");
                return Some(());
            }
        };

        if method != ConnectMethod::Browser {
            println!("\nConnecting to {endpoint}");
            println!("(Press Ctrl+C to disconnect)");
        }

        match self.dispatcher.connect(endpoint, method).await {
            Ok(ConnectOutcome::Exited { success: true } | ConnectOutcome::Interrupted) => {
                println!("\nDisconnected");
            }
            Ok(ConnectOutcome::Exited { success: false }) => {
                println!("\nThe join tool exited with an error");
                println!("Check that sshx is installed: curl -sSf https://sshx.io/get | sh");
            }
            Ok(ConnectOutcome::Opened) => {
                println!("Browser opened");
                println!("You can use sshx straight from the web page, no local install needed");
            }
            Err(err) => report_launch_error(&err),
        }
        Some(())
    }

    async fn open_in_browser(&mut self) -> Option<()> {
        let url = self.prompt("sshx URL: ").await?;
        if url.is_empty() {
            return Some(());
        }

        match self.dispatcher.connect(&url, ConnectMethod::Browser).await {
            Ok(_) => println!("Browser opened"),
            Err(err) => report_launch_error(&err),
        }
        Some(())
    }

    async fn list_sessions(&self) {
        match self.store.list().await {
            Ok(sessions) if sessions.is_empty() => println!("No saved sessions"),
            Ok(sessions) => {
                println!("\nSaved sessions:");
                println!("{:-<60}", "");
                for (name, record) in sessions {
                    println!("  {name}");
                    println!("    URL: {}", record.url);
                    println!("    Last used: {}", format_epoch(record.last_used));
                }
            }
            Err(err) => report_store_error(&err),
        }
    }
}

fn report_store_error(err: &StoreError) {
    println!("Error: {err}");
    if let StoreError::Corrupt { path, .. } = err {
        println!("Fix or delete {} and try again", path.display());
    }
}

fn report_launch_error(err: &LaunchError) {
    match err {
        LaunchError::ShellNotFound => {
            println!("Git Bash not found");
            println!("Download Git for Windows: https://git-scm.com/download/win");
        }
        LaunchError::Spawn { program, .. } if program.as_str() == SUBSYSTEM_ENTRY => {
            println!("Error: {err}");
            println!("Check that WSL is installed (PowerShell as admin): wsl --install");
        }
        LaunchError::Browser(_) => {
            println!("Error: {err}");
            println!("Open the URL manually in your browser");
        }
        _ => println!("Error: {err}"),
    }
}

const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

fn format_epoch(secs: f64) -> String {
    OffsetDateTime::from_unix_timestamp(secs as i64)
        .ok()
        .and_then(|t| t.format(TIME_FORMAT).ok())
        .unwrap_or_else(|| "unknown".to_string())
}
