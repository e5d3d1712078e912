//! Session and data-synchronization layer between `squall-api` and UI
//! consumers (the CLI today).
//!
//! This crate owns the business logic and domain model for the Squall
//! workspace:
//!
//! - **[`Console`]** — Central facade over the authenticated session and the
//!   dashboard snapshot: [`login()`](Console::login) exchanges credentials
//!   and bootstraps, [`restore()`](Console::restore) revives a persisted
//!   session at startup, and the mutation methods (create/delete rule,
//!   acknowledge alert, update profile, approve user) follow one protocol:
//!   busy-guard, write, notice, full refresh.
//!
//! - **[`Session`]** — Bearer-token lifecycle over a pluggable
//!   [`TokenSlot`], published through a `tokio::sync::watch` channel.
//!
//! - **[`DashboardData`]** — One coherent snapshot of rules, alerts,
//!   weather, preferences and the admin approval queue, replaced wholesale
//!   by the two-phase refresh in [`sync`].
//!
//! - **Domain model** ([`model`]) — Canonical types (`AlertRule` with its
//!   tagged [`RulePredicate`], `TriggeredAlert`, `WeatherSnapshot`, etc.)
//!   converted from the flat wire shapes at the boundary in [`convert`].

pub mod console;
pub mod convert;
pub mod error;
pub mod fmt;
pub mod model;
pub mod mutate;
pub mod session;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use console::Console;
pub use error::CoreError;
pub use mutate::{BusyTracker, Notice, NoticeKind, ProfileDraft, RuleDraft, RuleKind};
pub use session::{MemoryTokenSlot, Session, TokenSlot};
pub use sync::DashboardData;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Account, AlertRule, AlertStatus, ApprovalStatus, FallbackStrategy, NotificationChannel,
    NotificationPreference, RainThresholdKind, Registration, RulePredicate, TemperatureUnit,
    TriggeredAlert, VerificationChallenge, WeatherSnapshot,
};
