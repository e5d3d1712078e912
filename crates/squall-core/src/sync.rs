// ── Data synchronizer ──
//
// Full-state refresh: after login, session restore or any successful
// mutation the whole dashboard is re-fetched and swapped in wholesale.
// Rules load first because the weather query derives its coordinates from
// them; the remaining fetches are independent and run concurrently.

use std::sync::atomic::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::console::Console;
use crate::error::CoreError;
use crate::model::{
    Account, AlertRule, NotificationPreference, TriggeredAlert, WeatherSnapshot,
};

/// Fallback weather coordinates when no rule provides any (Orlando).
const DEFAULT_COORDINATES: (f64, f64) = (28.5383, -81.3792);

/// One coherent snapshot of everything the dashboard shows. Replaced as a
/// unit; consumers never observe a half-refreshed mixture.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DashboardData {
    pub account: Option<Account>,
    pub rules: Vec<AlertRule>,
    pub alerts: Vec<TriggeredAlert>,
    pub weather: Option<WeatherSnapshot>,
    pub preferences: Option<NotificationPreference>,
    pub pending_users: Vec<Account>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Console {
    /// Load the account for the active token and perform the first refresh.
    ///
    /// A failure to load the account is treated as session expiry: the
    /// token and all dependent data are dropped before the error surfaces,
    /// so the authenticated view never appears without an account behind it.
    pub(crate) async fn bootstrap(&self) -> Result<Account, CoreError> {
        let account = match self.inner.api.me().await {
            Ok(wire) => Account::from(wire),
            Err(e) => {
                let reason = e.user_message();
                warn!(reason = %reason, "bootstrap failed, clearing session");
                self.reset_session()?;
                return Err(CoreError::SessionExpired { reason });
            }
        };

        self.seed_profile_draft(&account);
        self.inner.dashboard.send_modify(|d| {
            d.account = Some(account.clone());
        });

        // Refresh failures past this point are ordinary errors, not expiry;
        // the session stays intact.
        self.refresh_for(&account).await?;
        Ok(account)
    }

    /// Re-fetch the full dashboard for the signed-in account.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let account = self.current_account().ok_or(CoreError::NotAuthenticated)?;
        self.refresh_for(&account).await
    }

    /// Fetch a one-off weather snapshot for explicit coordinates, without
    /// touching the dashboard.
    pub async fn weather_at(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, CoreError> {
        let wire = self.inner.api.current_weather(lat, lon).await?;
        Ok(WeatherSnapshot::from(wire))
    }

    /// Two-phase full refresh.
    ///
    /// Phase 1 fetches the rules; its failure aborts the whole refresh
    /// since the weather query depends on the first rule's coordinates.
    /// Phase 2 fetches alerts, preferences, weather and (for admins) the
    /// pending-approval queue concurrently. Weather is best effort: its
    /// failure degrades the snapshot to "no weather" instead of failing
    /// the refresh. A refresh that finishes after a newer one started
    /// discards its results.
    pub(crate) async fn refresh_for(&self, account: &Account) -> Result<(), CoreError> {
        let generation = self
            .inner
            .refresh_generation
            .fetch_add(1, Ordering::SeqCst)
            + 1;
        debug!(generation, user = %account.id, "refreshing dashboard");

        let rules: Vec<AlertRule> = self
            .inner
            .api
            .criteria_for_user(&account.id)
            .await?
            .into_iter()
            .map(AlertRule::from)
            .collect();

        // Each coordinate falls back to its default independently, so a
        // rule with only a latitude still anchors that axis.
        let first = rules.first();
        let lat = first
            .and_then(|r| r.latitude)
            .unwrap_or(DEFAULT_COORDINATES.0);
        let lon = first
            .and_then(|r| r.longitude)
            .unwrap_or(DEFAULT_COORDINATES.1);

        let pending = async {
            if account.is_admin() {
                self.inner.api.pending_users().await.map(Some)
            } else {
                Ok(None)
            }
        };
        let (alerts, preferences, weather, pending) = tokio::join!(
            self.inner.api.alerts_for_user(&account.id),
            self.inner.api.notification_preferences(),
            self.inner.api.current_weather(lat, lon),
            pending,
        );

        let mut alerts: Vec<TriggeredAlert> =
            alerts?.into_iter().map(TriggeredAlert::from).collect();
        let preferences = NotificationPreference::from(preferences?);
        let weather = match weather {
            Ok(wire) => Some(WeatherSnapshot::from(wire)),
            Err(e) => {
                debug!(error = %e, "weather snapshot unavailable");
                None
            }
        };
        let pending_users: Vec<Account> = pending?
            .unwrap_or_default()
            .into_iter()
            .map(Account::from)
            .collect();

        // Most recent first, whatever order the backend returned; alerts
        // with no timestamp sort to the end.
        alerts.sort_by(|a, b| b.sort_time().cmp(&a.sort_time()));

        // A newer refresh claimed a higher generation while this one was in
        // flight; its results win, ours are dropped.
        if self.inner.refresh_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale refresh");
            return Ok(());
        }

        self.inner.dashboard.send_modify(|d| {
            d.account = Some(account.clone());
            d.rules = rules;
            d.alerts = alerts;
            d.weather = weather;
            d.preferences = Some(preferences);
            d.pending_users = pending_users;
            d.last_refresh = Some(Utc::now());
        });
        Ok(())
    }
}
