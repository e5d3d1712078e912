//! Admin approval-queue handlers.

use tabled::Tabled;

use squall_core::{Account, Console};

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PendingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Verified")]
    verified: String,
}

impl From<&Account> for PendingRow {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id.clone(),
            email: a.email.clone(),
            name: a.name.clone().unwrap_or_default(),
            verified: if a.email_verified { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminCommand::Pending => {
            util::require_session(console).await?;
            let pending = console.dashboard().pending_users;
            let out = global
                .output
                .render_rows(&pending, |a| PendingRow::from(a), |a| a.id.clone());
            output::emit(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Approve { id } => {
            util::require_session(console).await?;
            let approved = console.approve_user(&id).await?;
            if !global.quiet {
                eprintln!("Approved {}", approved.email);
            }
            Ok(())
        }
    }
}
