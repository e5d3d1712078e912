// ── Weather snapshot domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time weather snapshot. Opportunistically fetched, possibly
/// absent, never mutated by the client. Temperature is canonical Celsius;
/// display conversion happens in `fmt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub id: String,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub temperature_c: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub humidity: Option<f64>,
    pub observed_at: Option<DateTime<Utc>>,
}
