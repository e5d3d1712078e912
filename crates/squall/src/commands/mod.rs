//! Command handlers for the `squall` CLI.

pub mod admin;
pub mod alerts;
pub mod profile_cmd;
pub mod rules;
pub mod session;
pub mod util;
pub mod weather;

use squall_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Login(args) => session::login(console, args, global).await,
        Command::Logout => session::logout(console, global),
        Command::Status => session::status(console, global).await,
        Command::Register(args) => session::register(console, args, global).await,
        Command::VerifyEmail(args) => session::verify_email(console, args, global).await,
        Command::ResendVerification(args) => {
            session::resend_verification(console, args, global).await
        }
        Command::Rules(args) => rules::handle(console, args, global).await,
        Command::Alerts(args) => alerts::handle(console, args, global).await,
        Command::Weather(args) => weather::handle(console, args, global).await,
        Command::Profile(args) => profile_cmd::handle(console, args, global).await,
        Command::Admin(args) => admin::handle(console, args, global).await,
    }
}
