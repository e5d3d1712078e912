//! Shared helpers for command handlers.

use std::io::{self, IsTerminal, Write};

use squall_core::{Account, Console};

use crate::error::CliError;

/// Restore the persisted session, or fail with a sign-in hint.
pub async fn require_session(console: &Console) -> Result<Account, CliError> {
    console
        .restore()
        .await?
        .ok_or(CliError::NotSignedIn)
}

/// Ask the user to confirm a destructive action.
///
/// `--yes` skips the prompt; a non-interactive stdin without `--yes`
/// declines rather than hanging.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    let mut stdout = io::stdout().lock();
    write!(stdout, "{prompt} [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Prompt for a password unless one was supplied via flag or env.
pub fn resolve_password(provided: Option<String>) -> Result<String, CliError> {
    match provided {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}
