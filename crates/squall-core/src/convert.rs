// ── API-to-domain type conversions ──
//
// Bridges raw `squall_api` wire types into canonical `squall_core::model`
// domain types. The rule conversion is the codec: the flat wire shape has
// no explicit kind tag, so decoding infers the active predicate from which
// field group is populated, and encoding projects a tagged variant back
// onto exactly one group.

use chrono::{DateTime, Utc};

use squall_api::types::{
    AlertCriteriaWire, AlertEventWire, ChannelVerification, CreateCriteriaRequest,
    NotificationPreferenceWire, RegisterUserResponse, UserAccount, WeatherConditionWire,
};

use crate::model::{
    Account, AlertRule, AlertStatus, ApprovalStatus, FallbackStrategy, NotificationChannel,
    NotificationPreference, RainThresholdKind, Registration, RulePredicate, TemperatureUnit,
    TriggeredAlert, VerificationChallenge, WeatherSnapshot,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an optional RFC-3339 timestamp, silently dropping unparseable values.
fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Account ────────────────────────────────────────────────────────

impl From<UserAccount> for Account {
    fn from(wire: UserAccount) -> Self {
        Self {
            id: wire.id,
            email: wire.email,
            name: wire.name,
            phone_number: wire.phone_number,
            role: wire.role,
            approval_status: ApprovalStatus::parse(&wire.approval_status),
            email_verified: wire.email_verified,
        }
    }
}

impl From<ChannelVerification> for VerificationChallenge {
    fn from(wire: ChannelVerification) -> Self {
        Self {
            token_expires_at: parse_datetime(wire.token_expires_at.as_ref()),
            id: wire.id,
            channel: wire.channel,
            destination: wire.destination,
            status: wire.status,
            verification_token: wire.verification_token,
        }
    }
}

impl From<RegisterUserResponse> for Registration {
    fn from(wire: RegisterUserResponse) -> Self {
        Self {
            account: Account::from(wire.account),
            email_verification: wire.email_verification.map(VerificationChallenge::from),
        }
    }
}

// ── Rule predicate (the codec core) ────────────────────────────────

impl RulePredicate {
    /// Infer the active predicate from the populated wire field group.
    ///
    /// Precedence when more than one group is somehow populated (the
    /// creation path never produces this, but no schema forbids it):
    /// temperature first, then wind, then rain. A threshold of `0` counts
    /// as populated -- kinds are keyed on field presence, not truthiness.
    pub fn from_wire(wire: &AlertCriteriaWire) -> Self {
        // The temperature group needs both fields; a threshold with no
        // direction is not a populated group and falls through.
        if let Some(threshold) = wire.temperature_threshold {
            match wire.temperature_direction.as_deref() {
                Some("ABOVE") => return Self::TemperatureAbove { threshold },
                Some("BELOW") => return Self::TemperatureBelow { threshold },
                _ => {}
            }
        }
        if let Some(threshold) = wire.max_wind_speed {
            return Self::WindAbove { threshold };
        }
        if let Some(threshold) = wire.rain_threshold {
            let kind = match wire.rain_threshold_type.as_deref() {
                Some("AMOUNT") => RainThresholdKind::Amount,
                // PROBABILITY is the creation-path default.
                _ => RainThresholdKind::Probability,
            };
            return Self::RainAtOrAbove { threshold, kind };
        }
        Self::Unspecified
    }

    /// Project this predicate onto exactly one wire field group.
    pub fn apply_to(self, req: &mut CreateCriteriaRequest) {
        match self {
            Self::TemperatureBelow { threshold } => {
                req.temperature_threshold = Some(threshold);
                req.temperature_direction = Some("BELOW".to_owned());
            }
            Self::TemperatureAbove { threshold } => {
                req.temperature_threshold = Some(threshold);
                req.temperature_direction = Some("ABOVE".to_owned());
            }
            Self::WindAbove { threshold } => {
                req.max_wind_speed = Some(threshold);
            }
            Self::RainAtOrAbove { threshold, kind } => {
                req.rain_threshold = Some(threshold);
                req.rain_threshold_type = Some(
                    match kind {
                        RainThresholdKind::Probability => "PROBABILITY",
                        RainThresholdKind::Amount => "AMOUNT",
                    }
                    .to_owned(),
                );
            }
            Self::Unspecified => {}
        }
    }
}

impl From<AlertCriteriaWire> for AlertRule {
    fn from(wire: AlertCriteriaWire) -> Self {
        let predicate = RulePredicate::from_wire(&wire);
        Self {
            id: wire.id,
            user_id: wire.user_id,
            name: wire.name,
            location: wire.location,
            latitude: wire.latitude,
            longitude: wire.longitude,
            unit: wire
                .temperature_unit
                .as_deref()
                .and_then(TemperatureUnit::parse)
                .unwrap_or_default(),
            monitor_current: wire.monitor_current.unwrap_or(false),
            monitor_forecast: wire.monitor_forecast.unwrap_or(false),
            forecast_window_hours: wire.forecast_window_hours.unwrap_or(0),
            once_per_event: wire.once_per_event.unwrap_or(false),
            rearm_window_minutes: wire.rearm_window_minutes.unwrap_or(0),
            // A rule missing the flag is displayed as enabled, matching the
            // backend's default for stored criteria.
            enabled: wire.enabled.unwrap_or(true),
            predicate,
        }
    }
}

// ── Triggered alerts ───────────────────────────────────────────────

impl From<AlertEventWire> for TriggeredAlert {
    fn from(wire: AlertEventWire) -> Self {
        Self {
            alert_time: parse_datetime(wire.alert_time.as_ref()),
            status: AlertStatus::parse(wire.status.as_deref()),
            id: wire.id,
            user_id: wire.user_id,
            criteria_id: wire.criteria_id,
            headline: wire.headline,
            reason: wire.reason,
            location: wire.location,
            severity: wire.severity,
        }
    }
}

// ── Weather ────────────────────────────────────────────────────────

impl From<WeatherConditionWire> for WeatherSnapshot {
    fn from(wire: WeatherConditionWire) -> Self {
        Self {
            observed_at: parse_datetime(wire.timestamp.as_ref()),
            id: wire.id,
            location: wire.location,
            headline: wire.headline,
            temperature_c: wire.temperature,
            wind_speed_kmh: wire.wind_speed,
            precipitation_probability: wire.precipitation_probability,
            humidity: wire.humidity,
        }
    }
}

// ── Notification preferences ───────────────────────────────────────

impl From<NotificationPreferenceWire> for NotificationPreference {
    fn from(wire: NotificationPreferenceWire) -> Self {
        Self {
            user_id: wire.user_id,
            enabled_channels: wire
                .enabled_channels
                .iter()
                .map(|c| NotificationChannel::parse(c))
                .collect(),
            preferred_channel: NotificationChannel::parse(&wire.preferred_channel),
            fallback_strategy: FallbackStrategy::parse(&wire.fallback_strategy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_rule() -> AlertCriteriaWire {
        AlertCriteriaWire {
            id: "c1".into(),
            user_id: "u1".into(),
            name: Some("Jacket".into()),
            location: Some("Orlando".into()),
            latitude: Some(28.5383),
            longitude: Some(-81.3792),
            temperature_unit: Some("F".into()),
            monitor_current: Some(true),
            monitor_forecast: Some(true),
            forecast_window_hours: Some(48),
            once_per_event: Some(true),
            rearm_window_minutes: Some(240),
            enabled: Some(true),
            ..AlertCriteriaWire::default()
        }
    }

    #[test]
    fn decodes_temperature_group() {
        let mut wire = wire_rule();
        wire.temperature_threshold = Some(60.0);
        wire.temperature_direction = Some("BELOW".into());

        let rule = AlertRule::from(wire);
        assert_eq!(
            rule.predicate,
            RulePredicate::TemperatureBelow { threshold: 60.0 }
        );
        assert_eq!(rule.describe(), "Temperature below 60 F");
    }

    #[test]
    fn decodes_wind_group() {
        let mut wire = wire_rule();
        wire.max_wind_speed = Some(25.0);

        let rule = AlertRule::from(wire);
        assert_eq!(rule.predicate, RulePredicate::WindAbove { threshold: 25.0 });
        assert_eq!(rule.describe(), "Wind speed above 25 km/h");
    }

    #[test]
    fn decodes_rain_group_with_kind() {
        let mut wire = wire_rule();
        wire.rain_threshold = Some(50.0);
        wire.rain_threshold_type = Some("PROBABILITY".into());
        assert_eq!(
            RulePredicate::from_wire(&wire),
            RulePredicate::RainAtOrAbove {
                threshold: 50.0,
                kind: RainThresholdKind::Probability
            }
        );

        wire.rain_threshold_type = Some("AMOUNT".into());
        assert_eq!(
            RulePredicate::from_wire(&wire),
            RulePredicate::RainAtOrAbove {
                threshold: 50.0,
                kind: RainThresholdKind::Amount
            }
        );
    }

    #[test]
    fn empty_groups_decode_as_unspecified() {
        let rule = AlertRule::from(wire_rule());
        assert_eq!(rule.predicate, RulePredicate::Unspecified);
        assert_eq!(rule.describe(), "Custom weather condition");
    }

    #[test]
    fn temperature_wins_over_wind_and_rain() {
        let mut wire = wire_rule();
        wire.temperature_threshold = Some(90.0);
        wire.temperature_direction = Some("ABOVE".into());
        wire.max_wind_speed = Some(25.0);
        wire.rain_threshold = Some(50.0);

        assert_eq!(
            RulePredicate::from_wire(&wire),
            RulePredicate::TemperatureAbove { threshold: 90.0 }
        );

        wire.temperature_threshold = None;
        wire.temperature_direction = None;
        assert_eq!(
            RulePredicate::from_wire(&wire),
            RulePredicate::WindAbove { threshold: 25.0 }
        );
    }

    #[test]
    fn zero_threshold_counts_as_populated() {
        let mut wire = wire_rule();
        wire.max_wind_speed = Some(0.0);
        assert_eq!(
            RulePredicate::from_wire(&wire),
            RulePredicate::WindAbove { threshold: 0.0 }
        );
    }

    #[test]
    fn alert_time_parses_rfc3339_and_tolerates_garbage() {
        let wire = AlertEventWire {
            id: "a1".into(),
            user_id: "u1".into(),
            criteria_id: None,
            reason: None,
            event_type: None,
            severity: None,
            headline: None,
            description: None,
            location: None,
            condition_temperature_c: None,
            condition_precipitation_probability: None,
            alert_time: Some("2024-01-03T00:00:00Z".into()),
            status: Some("SENT".into()),
            sent_at: None,
            acknowledged_at: None,
            expired_at: None,
        };
        let alert = TriggeredAlert::from(wire.clone());
        assert!(alert.alert_time.is_some());
        assert_eq!(alert.status, AlertStatus::Sent);

        let mut garbled = wire;
        garbled.alert_time = Some("not-a-time".into());
        let alert = TriggeredAlert::from(garbled);
        assert!(alert.alert_time.is_none());
        assert_eq!(alert.sort_time(), DateTime::UNIX_EPOCH);
    }
}
