//! Session and account lifecycle handlers: login, logout, status,
//! registration, and email verification.

use owo_colors::OwoColorize;

use squall_core::{fmt, ApprovalStatus, Console};

use crate::cli::{
    GlobalOpts, LoginArgs, RegisterArgs, ResendVerificationArgs, VerifyEmailArgs,
};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn login(console: &Console, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let password = util::resolve_password(args.password)?;
    let account = console.login(&args.username, &password).await?;

    if !global.quiet {
        eprintln!("Signed in as {}", account.email);
        if account.approval_status == ApprovalStatus::PendingApproval {
            eprintln!("Your account is awaiting administrator approval.");
        }
    }
    Ok(())
}

pub fn logout(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    console.logout()?;
    if !global.quiet {
        eprintln!("Signed out");
    }
    Ok(())
}

pub async fn status(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let account = util::require_session(console).await?;
    let dash = console.dashboard();

    let color = global.color.enabled();
    let out = global.output.render_detail(
        &dash,
        |d| {
            let mut lines = vec![
                format!("Account:      {} ({})", account.email, account.role),
                format!(
                    "Rules:        {} ({} enabled)",
                    d.rules.len(),
                    d.rules.iter().filter(|r| r.enabled).count()
                ),
                format!("Alerts:       {}", d.alerts.len()),
            ];
            if let Some(ref weather) = d.weather {
                let temp = fmt::fmt_temperature(weather.temperature_c, Default::default());
                let place = weather.location.as_deref().unwrap_or("unknown location");
                lines.push(format!("Weather:      {temp} at {place}"));
            }
            if account.is_admin() {
                lines.push(format!("Pending:      {} awaiting approval", d.pending_users.len()));
            }
            lines.push(format!("Refreshed:    {}", fmt::fmt_time(d.last_refresh)));
            let rendered = lines.join("\n");
            if color {
                rendered.bold().to_string()
            } else {
                rendered
            }
        },
        |_| account.id.clone(),
    );
    output::emit(&out, global.quiet);
    Ok(())
}

pub async fn register(
    console: &Console,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::resolve_password(args.password)?;
    let registration = console
        .register(
            &args.username,
            &password,
            &args.email,
            args.name,
            args.phone,
        )
        .await?;

    if !global.quiet {
        eprintln!(
            "Registered account {} ({})",
            registration.account.id, registration.account.email
        );
        if let Some(verification) = registration.email_verification {
            eprintln!(
                "Verification sent to {} (verification id: {})",
                verification.destination, verification.id
            );
            eprintln!(
                "Complete it with: squall verify-email --user-id {} --verification-id {} <token>",
                registration.account.id, verification.id
            );
        }
    }
    Ok(())
}

pub async fn verify_email(
    console: &Console,
    args: VerifyEmailArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let account = console
        .verify_email(&args.user_id, &args.verification_id, &args.token)
        .await?;
    if !global.quiet {
        eprintln!("Email verified for {}", account.email);
        if account.approval_status == ApprovalStatus::PendingApproval {
            eprintln!("Your account is awaiting administrator approval.");
        }
    }
    Ok(())
}

pub async fn resend_verification(
    console: &Console,
    args: ResendVerificationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let challenge = console.resend_verification(&args.username).await?;
    if !global.quiet {
        eprintln!("Verification re-sent to {}", challenge.destination);
        if let Some(expires) = challenge.token_expires_at {
            eprintln!("Token expires {}", fmt::fmt_time(Some(expires)));
        }
    }
    Ok(())
}
