// Wire types for the weather-alert service REST API.
//
// These mirror the backend JSON exactly (camelCase, lots of optionals).
// `squall-core` converts them into canonical domain types -- consumers
// should not use these shapes directly.

use serde::{Deserialize, Serialize};

// ── Authentication ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserResponse {
    pub account: UserAccount,
    #[serde(default)]
    pub email_verification: Option<ChannelVerification>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub user_id: String,
    pub verification_id: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResendVerificationRequest {
    pub username: String,
}

/// Pending proof-of-ownership check for a contact channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVerification {
    pub id: String,
    pub channel: String,
    pub destination: String,
    pub status: String,
    #[serde(default)]
    pub token_expires_at: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
    #[serde(default)]
    pub verification_token: Option<String>,
}

// ── Accounts ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    pub approval_status: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone_number: String,
}

// ── Alert criteria (rules) ───────────────────────────────────────────

/// Stored rule as the backend returns it: a flat shape where the active
/// predicate kind is inferred from which field group is populated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCriteriaWire {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub temperature_threshold: Option<f64>,
    #[serde(default)]
    pub temperature_direction: Option<String>,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub max_wind_speed: Option<f64>,
    #[serde(default)]
    pub rain_threshold: Option<f64>,
    #[serde(default)]
    pub rain_threshold_type: Option<String>,
    #[serde(default)]
    pub monitor_current: Option<bool>,
    #[serde(default)]
    pub monitor_forecast: Option<bool>,
    #[serde(default)]
    pub forecast_window_hours: Option<u32>,
    #[serde(default)]
    pub once_per_event: Option<bool>,
    #[serde(default)]
    pub rearm_window_minutes: Option<u32>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Rule creation payload: shared fields always present, plus exactly one
/// predicate field group projected from the selected rule kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCriteriaRequest {
    pub user_id: String,
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_unit: String,
    pub monitor_current: bool,
    pub monitor_forecast: bool,
    pub forecast_window_hours: u32,
    pub once_per_event: bool,
    pub rearm_window_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_threshold_type: Option<String>,
}

// ── Triggered alerts ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEventWire {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub criteria_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub condition_temperature_c: Option<f64>,
    #[serde(default)]
    pub condition_precipitation_probability: Option<f64>,
    #[serde(default)]
    pub alert_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub acknowledged_at: Option<String>,
    #[serde(default)]
    pub expired_at: Option<String>,
}

// ── Weather ──────────────────────────────────────────────────────────

/// Point-in-time weather snapshot. Temperature is canonical Celsius.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherConditionWire {
    pub id: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ── Notification preferences ─────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferenceWire {
    pub user_id: String,
    #[serde(default)]
    pub enabled_channels: Vec<String>,
    pub preferred_channel: String,
    pub fallback_strategy: String,
}
