//! Alert rule command handlers.

use tabled::Tabled;

use squall_core::{AlertRule, Console, RuleDraft, RuleKind, TemperatureUnit};

use crate::cli::{CreateRuleArgs, GlobalOpts, RuleKindArg, RulesArgs, RulesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl From<&AlertRule> for RuleRow {
    fn from(r: &AlertRule) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone().unwrap_or_default(),
            location: r.location.clone().unwrap_or_default(),
            condition: r.describe(),
            enabled: if r.enabled { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: RulesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RulesCommand::List => {
            util::require_session(console).await?;
            let rules = console.dashboard().rules;
            let out = global
                .output
                .render_rows(&rules, |r| RuleRow::from(r), |r| r.id.clone());
            output::emit(&out, global.quiet);
            Ok(())
        }

        RulesCommand::Create(create) => {
            util::require_session(console).await?;
            let draft = draft_from_args(create)?;
            let rule = console.create_rule(&draft).await?;
            if !global.quiet {
                eprintln!("Created alert '{}' ({})", rule.name.clone().unwrap_or_default(), rule.id);
            }
            Ok(())
        }

        RulesCommand::Delete { id } => {
            util::require_session(console).await?;
            if !util::confirm(&format!("Delete alert rule '{id}'?"), global.yes)? {
                return Ok(());
            }
            console.delete_rule(&id).await?;
            if !global.quiet {
                eprintln!("Alert deleted");
            }
            Ok(())
        }
    }
}

fn draft_from_args(args: CreateRuleArgs) -> Result<RuleDraft, CliError> {
    let kind = match args.kind {
        RuleKindArg::TempBelow => RuleKind::TemperatureBelow,
        RuleKindArg::TempAbove => RuleKind::TemperatureAbove,
        RuleKindArg::Wind => RuleKind::WindAbove,
        RuleKindArg::Rain => RuleKind::RainAtOrAbove,
    };
    let unit = TemperatureUnit::parse(&args.unit).ok_or_else(|| CliError::Validation {
        field: "unit".into(),
        reason: format!("expected 'F' or 'C', got '{}'", args.unit),
    })?;

    Ok(RuleDraft {
        name: args.name,
        location: args.location,
        latitude: args.latitude,
        longitude: args.longitude,
        threshold: args
            .threshold
            .unwrap_or_else(|| kind.default_threshold().into()),
        kind,
        unit,
        monitor_current: args.monitor_current,
        monitor_forecast: args.monitor_forecast,
        forecast_window_hours: args.forecast_window_hours,
        once_per_event: args.once_per_event,
        rearm_window_minutes: args.rearm_window_minutes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base_args() -> CreateRuleArgs {
        CreateRuleArgs {
            name: "Bring a Jacket".into(),
            location: "Orlando".into(),
            latitude: "28.5383".into(),
            longitude: "-81.3792".into(),
            kind: RuleKindArg::TempBelow,
            threshold: None,
            unit: "F".into(),
            monitor_current: true,
            monitor_forecast: true,
            forecast_window_hours: 48,
            once_per_event: true,
            rearm_window_minutes: 240,
        }
    }

    #[test]
    fn omitted_threshold_uses_kind_preset() {
        let mut args = base_args();
        args.kind = RuleKindArg::Wind;
        let draft = draft_from_args(args).unwrap();
        assert_eq!(draft.threshold, "25");
        assert_eq!(draft.kind, RuleKind::WindAbove);
    }

    #[test]
    fn explicit_threshold_wins_over_preset() {
        let mut args = base_args();
        args.threshold = Some("55".into());
        let draft = draft_from_args(args).unwrap();
        assert_eq!(draft.threshold, "55");
    }

    #[test]
    fn bad_unit_is_a_usage_error() {
        let mut args = base_args();
        args.unit = "K".into();
        assert!(matches!(
            draft_from_args(args),
            Err(CliError::Validation { .. })
        ));
    }
}
