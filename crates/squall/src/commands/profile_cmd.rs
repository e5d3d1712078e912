//! Profile command handlers.

use squall_core::{Account, Console};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::error::CliError;
use crate::output;

use super::util;

fn account_detail(account: &Account) -> String {
    [
        format!("ID:              {}", account.id),
        format!("Email:           {}", account.email),
        format!("Name:            {}", account.name.clone().unwrap_or_default()),
        format!(
            "Phone:           {}",
            account.phone_number.clone().unwrap_or_default()
        ),
        format!("Role:            {}", account.role),
        format!("Status:          {:?}", account.approval_status),
        format!(
            "Email verified:  {}",
            if account.email_verified { "yes" } else { "no" }
        ),
    ]
    .join("\n")
}

pub async fn handle(
    console: &Console,
    args: ProfileArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Show => {
            let account = util::require_session(console).await?;
            let out = global
                .output
                .render_detail(&account, account_detail, |a| a.id.clone());
            output::emit(&out, global.quiet);
            Ok(())
        }

        ProfileCommand::Update { name, phone } => {
            util::require_session(console).await?;

            // Start from the draft seeded at bootstrap so an omitted flag
            // keeps the current value instead of blanking it.
            let mut draft = console.profile_draft()?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(phone) = phone {
                draft.phone_number = phone;
            }

            let account = console.update_profile(&draft).await?;
            if !global.quiet {
                eprintln!("Profile updated for {}", account.email);
            }
            Ok(())
        }
    }
}
