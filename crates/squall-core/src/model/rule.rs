// ── Alert rule domain types ──

use serde::{Deserialize, Serialize};

use crate::fmt::fmt_number;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    /// Wire/display label ("F" or "C").
    pub fn label(self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "F" => Some(Self::Fahrenheit),
            "C" => Some(Self::Celsius),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainThresholdKind {
    Probability,
    Amount,
}

/// The single active predicate of a rule, as an explicit tagged variant.
///
/// The wire format carries no discriminator -- the kind is inferred from
/// which field group is populated. Decoding happens once at the boundary
/// (`convert.rs`) so the rest of the client can match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RulePredicate {
    TemperatureBelow { threshold: f64 },
    TemperatureAbove { threshold: f64 },
    WindAbove { threshold: f64 },
    RainAtOrAbove { threshold: f64, kind: RainThresholdKind },
    /// Stored rule with no predicate group populated.
    Unspecified,
}

/// A stored user-defined condition that produces alerts when matched
/// against weather data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: String,
    pub user_id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub unit: TemperatureUnit,
    pub monitor_current: bool,
    pub monitor_forecast: bool,
    pub forecast_window_hours: u32,
    pub once_per_event: bool,
    pub rearm_window_minutes: u32,
    pub enabled: bool,
    pub predicate: RulePredicate,
}

impl AlertRule {
    /// One-line human-readable description of the rule's predicate.
    pub fn describe(&self) -> String {
        match self.predicate {
            RulePredicate::TemperatureBelow { threshold } => format!(
                "Temperature below {} {}",
                fmt_number(Some(threshold)),
                self.unit.label()
            ),
            RulePredicate::TemperatureAbove { threshold } => format!(
                "Temperature above {} {}",
                fmt_number(Some(threshold)),
                self.unit.label()
            ),
            RulePredicate::WindAbove { threshold } => {
                format!("Wind speed above {} km/h", fmt_number(Some(threshold)))
            }
            RulePredicate::RainAtOrAbove {
                threshold,
                kind: RainThresholdKind::Probability,
            } => format!("Rain probability at or above {}%", fmt_number(Some(threshold))),
            RulePredicate::RainAtOrAbove {
                threshold,
                kind: RainThresholdKind::Amount,
            } => format!("Rain amount at or above {} mm", fmt_number(Some(threshold))),
            RulePredicate::Unspecified => "Custom weather condition".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(predicate: RulePredicate, unit: TemperatureUnit) -> AlertRule {
        AlertRule {
            id: "c1".into(),
            user_id: "u1".into(),
            name: Some("Test".into()),
            location: Some("Orlando".into()),
            latitude: Some(28.5383),
            longitude: Some(-81.3792),
            unit,
            monitor_current: true,
            monitor_forecast: true,
            forecast_window_hours: 48,
            once_per_event: true,
            rearm_window_minutes: 240,
            enabled: true,
            predicate,
        }
    }

    #[test]
    fn describes_each_predicate_kind() {
        assert_eq!(
            rule(
                RulePredicate::TemperatureBelow { threshold: 60.0 },
                TemperatureUnit::Fahrenheit
            )
            .describe(),
            "Temperature below 60 F"
        );
        assert_eq!(
            rule(
                RulePredicate::TemperatureAbove { threshold: 32.5 },
                TemperatureUnit::Celsius
            )
            .describe(),
            "Temperature above 32.5 C"
        );
        assert_eq!(
            rule(
                RulePredicate::WindAbove { threshold: 25.0 },
                TemperatureUnit::Fahrenheit
            )
            .describe(),
            "Wind speed above 25 km/h"
        );
        assert_eq!(
            rule(
                RulePredicate::RainAtOrAbove {
                    threshold: 50.0,
                    kind: RainThresholdKind::Probability
                },
                TemperatureUnit::Fahrenheit
            )
            .describe(),
            "Rain probability at or above 50%"
        );
        assert_eq!(
            rule(
                RulePredicate::RainAtOrAbove {
                    threshold: 12.0,
                    kind: RainThresholdKind::Amount
                },
                TemperatureUnit::Fahrenheit
            )
            .describe(),
            "Rain amount at or above 12 mm"
        );
        assert_eq!(
            rule(RulePredicate::Unspecified, TemperatureUnit::Fahrenheit).describe(),
            "Custom weather condition"
        );
    }
}
