//! Setup guidance for the external tools.

use std::path::PathBuf;

use sshx_connect_launch::{GIT_BASH_PATHS, SUBSYSTEM_ENTRY, find_bash};

/// Print which connection methods are available on this machine and how to
/// install the missing ones. Probes only; nothing is downloaded.
pub fn print_setup_help() {
    println!("\nConnection method status:");

    match which::which(SUBSYSTEM_ENTRY) {
        Ok(path) => println!("  WSL: found at {}", path.display()),
        Err(_) => println!("  WSL: not found"),
    }

    let probe: Vec<PathBuf> = GIT_BASH_PATHS.iter().map(Into::into).collect();
    match find_bash(&probe) {
        Some(path) => println!("  Git Bash: found at {}", path.display()),
        None => println!("  Git Bash: not found"),
    }

    println!("  Browser: always available, nothing to install");

    println!("\nInstall options:");
    println!("  Option 1 - WSL (recommended):");
    println!("    1. Open PowerShell as administrator and run: wsl --install");
    println!("    2. Reboot, then inside WSL run: curl -sSf https://sshx.io/get | sh");
    println!("  Option 2 - Git Bash:");
    println!("    1. Install Git for Windows: https://git-scm.com/download/win");
    println!("    2. Inside Git Bash run: curl -sSf https://sshx.io/get | sh");
    println!("  Option 3 - Web browser:");
    println!("    Connect to an existing session straight from the browser.");
}
