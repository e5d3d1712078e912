//! Triggered-alert command handlers.

use tabled::Tabled;

use squall_core::{fmt, Console, TriggeredAlert};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Headline")]
    headline: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&TriggeredAlert> for AlertRow {
    fn from(a: &TriggeredAlert) -> Self {
        Self {
            id: a.id.clone(),
            time: fmt::fmt_time(a.alert_time),
            status: a.status.as_str().into(),
            severity: a.severity.clone().unwrap_or_default(),
            headline: a
                .headline
                .clone()
                .or_else(|| a.reason.clone())
                .unwrap_or_default(),
            location: a.location.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: AlertsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlertsCommand::List => {
            util::require_session(console).await?;
            let alerts = console.dashboard().alerts;
            let out = global
                .output
                .render_rows(&alerts, |a| AlertRow::from(a), |a| a.id.clone());
            output::emit(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Ack { id } => {
            util::require_session(console).await?;
            console.acknowledge_alert(&id).await?;
            if !global.quiet {
                eprintln!("Alert acknowledged");
            }
            Ok(())
        }
    }
}
