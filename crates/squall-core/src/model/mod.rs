// ── Unified domain model ──
//
// Canonical representations of the weather-alert entities. The API crate's
// wire shapes (flat, untagged, camelCase) are converted into these types at
// the boundary in `convert.rs`; consumers never see the wire ambiguity.

pub mod account;
pub mod alert;
pub mod preferences;
pub mod rule;
pub mod weather;

// ── Re-exports ──────────────────────────────────────────────────────

pub use account::{Account, ApprovalStatus, Registration, VerificationChallenge};
pub use alert::{AlertStatus, TriggeredAlert};
pub use preferences::{FallbackStrategy, NotificationChannel, NotificationPreference};
pub use rule::{AlertRule, RainThresholdKind, RulePredicate, TemperatureUnit};
pub use weather::WeatherSnapshot;
