//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultPackError};

/// Minimum password length for new vaults to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting interactively.
pub const PASSWORD_ENV_VAR: &str = "VAULTPACK_PASSWORD";

/// VaultPack CLI: seal notes and files into a password-protected vault.
#[derive(Parser)]
#[command(
    name = "vaultpack",
    about = "Seal notes and files into a password-protected encrypted vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Seal a note and files into a new encrypted vault
    Seal {
        /// Note text to include
        #[arg(long)]
        note: Option<String>,

        /// Read the note from a text file instead
        #[arg(long, conflicts_with = "note")]
        note_file: Option<PathBuf>,

        /// File to embed in the vault (repeat for multiple files)
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// Output path for the encrypted blob
        #[arg(short, long, default_value = "vault.bin")]
        output: PathBuf,

        /// Output path for the key file
        #[arg(short = 'k', long, default_value = "vault.key.json")]
        key_output: PathBuf,

        /// PBKDF2 iteration count (default: 250000)
        #[arg(long)]
        iterations: Option<u32>,
    },

    /// Open a vault and extract its contents
    Open {
        /// Path to the encrypted blob
        #[arg(short, long)]
        vault: PathBuf,

        /// Path to the key file
        #[arg(short, long)]
        key: PathBuf,

        /// Directory to write extracted files into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the note only, skip extracting files
        #[arg(long)]
        note_only: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the vault password, trying in order:
/// 1. `VAULTPACK_PASSWORD` env var (scripting/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| VaultPackError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `seal`).
///
/// Also respects `VAULTPACK_PASSWORD` for scripted usage.  Enforces a
/// minimum password length for new vaults.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(VaultPackError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose vault password")
            .with_confirmation(
                "Confirm vault password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultPackError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}
