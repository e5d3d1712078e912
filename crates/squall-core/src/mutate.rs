// ── Mutation coordination ──
//
// Every state-changing operation follows one protocol: claim the entity's
// busy marker, issue the write, emit a notice, trigger a full refresh on
// success, and release the marker whatever the outcome. Busy markers are
// scoped per entity kind so concurrent actions on different entities never
// block each other; a second action on the same entity is rejected.

use dashmap::DashSet;
use tracing::debug;

use squall_api::types::{CreateCriteriaRequest, UpdateProfileRequest};

use crate::console::Console;
use crate::error::CoreError;
use crate::model::{Account, AlertRule, RainThresholdKind, RulePredicate, TemperatureUnit};

/// Reserved busy key for rule creation, which has no entity id yet.
pub(crate) const CREATE_RULE_KEY: &str = "__create__";
/// Reserved busy key for the single profile form.
pub(crate) const PROFILE_KEY: &str = "__profile__";

// ── Notices ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A transient user-visible notice. Every user-initiated action reports
/// through this channel instead of throwing to a global handler.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

// ── Busy tracking ───────────────────────────────────────────────────

/// Per-entity-id busy markers for one entity kind.
#[derive(Default)]
pub struct BusyTracker {
    active: DashSet<String>,
}

impl BusyTracker {
    /// Claim the marker for `id`, or fail if an action is already in flight.
    pub fn try_begin(&self, id: &str) -> Result<BusyGuard<'_>, CoreError> {
        if self.active.insert(id.to_owned()) {
            Ok(BusyGuard {
                tracker: self,
                id: id.to_owned(),
            })
        } else {
            Err(CoreError::Busy { id: id.to_owned() })
        }
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.active.contains(id)
    }
}

/// RAII busy marker: released on drop, so the marker clears on every exit
/// path of a mutation, success or failure.
pub struct BusyGuard<'a> {
    tracker: &'a BusyTracker,
    id: String,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.tracker.active.remove(&self.id);
    }
}

// ── Rule drafts ─────────────────────────────────────────────────────

/// The user-selected rule kind in a creation draft. Each kind carries a
/// sensible starting threshold the way the original form presets do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleKind {
    #[default]
    TemperatureBelow,
    TemperatureAbove,
    WindAbove,
    RainAtOrAbove,
}

impl RuleKind {
    pub fn default_threshold(self) -> &'static str {
        match self {
            Self::TemperatureBelow => "60",
            Self::TemperatureAbove => "90",
            Self::WindAbove => "25",
            Self::RainAtOrAbove => "50",
        }
    }
}

/// Flat, text-field rule entry form. Numeric fields stay as entered text
/// until [`build`](Self::build); a threshold that does not parse blocks
/// submission instead of silently coercing to zero.
#[derive(Debug, Clone)]
pub struct RuleDraft {
    pub name: String,
    pub location: String,
    pub latitude: String,
    pub longitude: String,
    pub threshold: String,
    pub kind: RuleKind,
    pub unit: TemperatureUnit,
    pub monitor_current: bool,
    pub monitor_forecast: bool,
    pub forecast_window_hours: u32,
    pub once_per_event: bool,
    pub rearm_window_minutes: u32,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            name: "Bring a Jacket".into(),
            location: "Orlando".into(),
            latitude: "28.5383".into(),
            longitude: "-81.3792".into(),
            threshold: "60".into(),
            kind: RuleKind::TemperatureBelow,
            unit: TemperatureUnit::Fahrenheit,
            monitor_current: true,
            monitor_forecast: true,
            forecast_window_hours: 48,
            once_per_event: true,
            rearm_window_minutes: 240,
        }
    }
}

impl RuleDraft {
    /// Default draft for a kind, with its threshold preset.
    pub fn for_kind(kind: RuleKind) -> Self {
        Self {
            kind,
            threshold: kind.default_threshold().into(),
            ..Self::default()
        }
    }

    /// Pure client-side submission gate: name and location non-empty after
    /// trimming, both coordinates non-empty, threshold parses as a number.
    /// The backend remains the source of truth for full validation.
    pub fn can_submit(&self) -> bool {
        if self.name.trim().is_empty() || self.location.trim().is_empty() {
            return false;
        }
        if self.latitude.trim().is_empty() || self.longitude.trim().is_empty() {
            return false;
        }
        self.threshold.trim().parse::<f64>().is_ok()
    }

    fn parse_field(value: &str, field: &str) -> Result<f64, CoreError> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::ValidationFailed {
                message: format!("{field} must be a number"),
            })
    }

    /// Build the wire payload, projecting the selected kind onto exactly
    /// one predicate field group. Re-checks everything `can_submit` gates.
    pub fn build(&self, user_id: &str) -> Result<CreateCriteriaRequest, CoreError> {
        if self.name.trim().is_empty() || self.location.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "name and location are required".into(),
            });
        }
        let latitude = Self::parse_field(&self.latitude, "latitude")?;
        let longitude = Self::parse_field(&self.longitude, "longitude")?;
        let threshold = Self::parse_field(&self.threshold, "threshold")?;

        let mut req = CreateCriteriaRequest {
            user_id: user_id.to_owned(),
            name: self.name.trim().to_owned(),
            location: self.location.trim().to_owned(),
            latitude,
            longitude,
            temperature_unit: self.unit.label().to_owned(),
            monitor_current: self.monitor_current,
            monitor_forecast: self.monitor_forecast,
            forecast_window_hours: self.forecast_window_hours,
            once_per_event: self.once_per_event,
            rearm_window_minutes: self.rearm_window_minutes,
            temperature_threshold: None,
            temperature_direction: None,
            max_wind_speed: None,
            rain_threshold: None,
            rain_threshold_type: None,
        };

        let predicate = match self.kind {
            RuleKind::TemperatureBelow => RulePredicate::TemperatureBelow { threshold },
            RuleKind::TemperatureAbove => RulePredicate::TemperatureAbove { threshold },
            RuleKind::WindAbove => RulePredicate::WindAbove { threshold },
            RuleKind::RainAtOrAbove => RulePredicate::RainAtOrAbove {
                threshold,
                kind: RainThresholdKind::Probability,
            },
        };
        predicate.apply_to(&mut req);
        Ok(req)
    }
}

/// Profile edit form, seeded from the account on bootstrap.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub phone_number: String,
}

impl ProfileDraft {
    pub fn from_account(account: &Account) -> Self {
        Self {
            name: account.name.clone().unwrap_or_default(),
            phone_number: account.phone_number.clone().unwrap_or_default(),
        }
    }
}

// ── Mutations ───────────────────────────────────────────────────────

impl Console {
    /// Create a rule from a draft, then fully resynchronize.
    pub async fn create_rule(&self, draft: &RuleDraft) -> Result<AlertRule, CoreError> {
        let account = self.current_account().ok_or(CoreError::NotAuthenticated)?;
        let _guard = self.inner.busy_rules.try_begin(CREATE_RULE_KEY)?;

        let req = draft.build(&account.id).map_err(|e| self.reject(e))?;
        match self.inner.api.create_criteria(&req).await {
            Ok(wire) => {
                let rule = AlertRule::from(wire);
                self.notify(
                    NoticeKind::Success,
                    format!("Created alert \"{}\".", req.name),
                );
                self.refresh_for(&account).await?;
                Ok(rule)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Delete a rule by id, then fully resynchronize.
    pub async fn delete_rule(&self, rule_id: &str) -> Result<(), CoreError> {
        let account = self.current_account().ok_or(CoreError::NotAuthenticated)?;
        let _guard = self.inner.busy_rules.try_begin(rule_id)?;

        match self.inner.api.delete_criteria(rule_id).await {
            Ok(()) => {
                self.notify(NoticeKind::Success, "Alert deleted.");
                self.refresh_for(&account).await?;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Request acknowledgement of a sent alert. The transition itself is
    /// backend-owned; the client pre-checks only what it already knows.
    pub async fn acknowledge_alert(&self, alert_id: &str) -> Result<(), CoreError> {
        let account = self.current_account().ok_or(CoreError::NotAuthenticated)?;
        if let Some(alert) = self
            .dashboard()
            .alerts
            .iter()
            .find(|a| a.id == alert_id)
        {
            if !alert.status.can_acknowledge() {
                return Err(self.reject(CoreError::ValidationFailed {
                    message: format!(
                        "Alert is {}; only sent alerts can be acknowledged",
                        alert.status.as_str()
                    ),
                }));
            }
        }
        let _guard = self.inner.busy_alerts.try_begin(alert_id)?;

        match self.inner.api.acknowledge_alert(alert_id).await {
            Ok(_) => {
                self.notify(NoticeKind::Success, "Alert acknowledged.");
                self.refresh_for(&account).await?;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Update the profile, reseed the draft, then fully resynchronize.
    pub async fn update_profile(&self, draft: &ProfileDraft) -> Result<Account, CoreError> {
        self.current_account().ok_or(CoreError::NotAuthenticated)?;
        let _guard = self.inner.busy_profile.try_begin(PROFILE_KEY)?;

        let req = UpdateProfileRequest {
            name: draft.name.clone(),
            phone_number: draft.phone_number.clone(),
        };
        match self.inner.api.update_me(&req).await {
            Ok(wire) => {
                let updated = Account::from(wire);
                self.seed_profile_draft(&updated);
                self.inner.dashboard.send_modify(|d| {
                    d.account = Some(updated.clone());
                });
                self.notify(NoticeKind::Success, "Profile updated.");
                self.refresh_for(&updated).await?;
                Ok(updated)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Approve a pending account (admin only), then fully resynchronize.
    pub async fn approve_user(&self, user_id: &str) -> Result<Account, CoreError> {
        let account = self.current_account().ok_or(CoreError::NotAuthenticated)?;
        let _guard = self.inner.busy_approvals.try_begin(user_id)?;

        match self.inner.api.approve_user(user_id).await {
            Ok(wire) => {
                let approved = Account::from(wire);
                self.notify(NoticeKind::Success, format!("Approved {user_id}."));
                self.refresh_for(&account).await?;
                Ok(approved)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Convert an API failure into a core error and surface it as a notice.
    fn report(&self, err: squall_api::Error) -> CoreError {
        self.reject(CoreError::from(err))
    }

    /// Surface a rejection as an error notice. Local pre-check failures go
    /// through here too, so every failed user action reaches the notice
    /// channel whether or not a request was issued.
    fn reject(&self, err: CoreError) -> CoreError {
        debug!(error = %err, "mutation failed");
        self.notify(NoticeKind::Error, err.user_message());
        err
    }
}
