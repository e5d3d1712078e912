// ── Notification preference domain types ──
//
// Read-only from this client's perspective; displayed, never edited.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NotificationChannel {
    Email,
    Sms,
    Push,
    Other(String),
}

impl NotificationChannel {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "EMAIL" => Self::Email,
            "SMS" => Self::Sms,
            "PUSH" => Self::Push,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Email => "EMAIL",
            Self::Sms => "SMS",
            Self::Push => "PUSH",
            Self::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FallbackStrategy {
    FirstSuccess,
    FailFast,
    Unknown,
}

impl FallbackStrategy {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "FIRST_SUCCESS" => Self::FirstSuccess,
            "FAIL_FAST" => Self::FailFast,
            _ => Self::Unknown,
        }
    }
}

/// Per-user channel enablement and fallback policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPreference {
    pub user_id: String,
    pub enabled_channels: Vec<NotificationChannel>,
    pub preferred_channel: NotificationChannel,
    pub fallback_strategy: FallbackStrategy,
}
