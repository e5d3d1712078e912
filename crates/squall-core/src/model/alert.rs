// ── Triggered alert domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AlertStatus {
    Pending,
    Sent,
    Acknowledged,
    Expired,
}

impl AlertStatus {
    /// Unrecognized or missing statuses read as `Pending`, matching how
    /// the backend treats a not-yet-dispatched event.
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("SENT") => Self::Sent,
            Some("ACKNOWLEDGED") => Self::Acknowledged,
            Some("EXPIRED") => Self::Expired,
            _ => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Sent => "SENT",
            Self::Acknowledged => "ACKNOWLEDGED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Acknowledgement is only offered while the event is `Sent`; the
    /// transition itself is backend-owned, the client just requests it.
    pub fn can_acknowledge(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Immutable record of a triggered rule instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub id: String,
    pub user_id: String,
    pub criteria_id: Option<String>,
    pub headline: Option<String>,
    pub reason: Option<String>,
    pub location: Option<String>,
    pub severity: Option<String>,
    pub alert_time: Option<DateTime<Utc>>,
    pub status: AlertStatus,
}

impl TriggeredAlert {
    /// Sort key for the display ordering: trigger time, with a missing or
    /// unparseable time sorting as if at the epoch.
    pub fn sort_time(&self) -> DateTime<Utc> {
        self.alert_time.unwrap_or(DateTime::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sent_alerts_are_acknowledgeable() {
        assert!(AlertStatus::Sent.can_acknowledge());
        assert!(!AlertStatus::Pending.can_acknowledge());
        assert!(!AlertStatus::Acknowledged.can_acknowledge());
        assert!(!AlertStatus::Expired.can_acknowledge());
    }

    #[test]
    fn unknown_status_reads_as_pending() {
        assert_eq!(AlertStatus::parse(None), AlertStatus::Pending);
        assert_eq!(AlertStatus::parse(Some("MYSTERY")), AlertStatus::Pending);
        assert_eq!(AlertStatus::parse(Some("SENT")), AlertStatus::Sent);
    }
}
