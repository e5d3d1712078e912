// ── Console ──
//
// The single entry point consumers hold. Wraps the API client, the session
// store and the synchronized dashboard snapshot behind one cheaply-clonable
// handle; all state lives in an `Arc` so the CLI, background tasks and
// tests share the same view.

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use squall_api::types::{
    RegisterRequest, ResendVerificationRequest, TokenRequest, VerifyEmailRequest,
};
use squall_api::ApiClient;

use crate::error::CoreError;
use crate::model::{Account, Registration, VerificationChallenge};
use crate::mutate::{BusyTracker, Notice, NoticeKind, ProfileDraft};
use crate::session::{Session, TokenSlot};
use crate::sync::DashboardData;

const NOTICE_CAPACITY: usize = 64;

pub(crate) struct ConsoleInner {
    pub(crate) api: ApiClient,
    pub(crate) session: Session,
    pub(crate) dashboard: watch::Sender<DashboardData>,
    pub(crate) notices: broadcast::Sender<Notice>,
    pub(crate) busy_rules: BusyTracker,
    pub(crate) busy_alerts: BusyTracker,
    pub(crate) busy_approvals: BusyTracker,
    pub(crate) busy_profile: BusyTracker,
    pub(crate) refresh_generation: AtomicU64,
    pub(crate) profile_draft: Mutex<ProfileDraft>,
}

/// Handle to the session and data-synchronization controller.
#[derive(Clone)]
pub struct Console {
    pub(crate) inner: Arc<ConsoleInner>,
}

impl Console {
    pub fn new(api: ApiClient, slot: Box<dyn TokenSlot>) -> Self {
        let (dashboard, _) = watch::channel(DashboardData::default());
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Self {
            inner: Arc::new(ConsoleInner {
                api,
                session: Session::new(slot),
                dashboard,
                notices,
                busy_rules: BusyTracker::default(),
                busy_alerts: BusyTracker::default(),
                busy_approvals: BusyTracker::default(),
                busy_profile: BusyTracker::default(),
                refresh_generation: AtomicU64::new(0),
                profile_draft: Mutex::new(ProfileDraft::default()),
            }),
        }
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Restore a persisted session at startup. Returns `None` when there is
    /// no stored token (anonymous start, not an error). A stored token that
    /// the backend rejects clears the session and surfaces as expiry.
    pub async fn restore(&self) -> Result<Option<Account>, CoreError> {
        match self.inner.session.restore()? {
            Some(token) => {
                self.inner.api.set_token(Some(token));
                let account = self.bootstrap().await?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    /// Exchange credentials for a token, persist it, then bootstrap.
    pub async fn login(&self, username: &str, password: &str) -> Result<Account, CoreError> {
        let resp = self
            .inner
            .api
            .token(&TokenRequest {
                username: username.to_owned(),
                password: password.to_owned(),
            })
            .await?;

        let token = SecretString::from(resp.access_token);
        self.inner.api.set_token(Some(token.clone()));
        self.inner.session.set_token(token)?;
        info!(username, "signed in");

        let account = self.bootstrap().await?;
        self.notify(
            NoticeKind::Success,
            format!("Signed in as {}.", account.email),
        );
        Ok(account)
    }

    /// Drop the session and every piece of data that depended on it.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.reset_session()?;
        info!("signed out");
        self.notify(NoticeKind::Info, "Signed out.");
        Ok(())
    }

    /// Clear token and dashboard without emitting a notice. Used by logout
    /// and by bootstrap failure, where the error itself is the message.
    pub(crate) fn reset_session(&self) -> Result<(), CoreError> {
        self.inner.session.clear()?;
        self.inner.api.set_token(None);
        self.inner.dashboard.send_replace(DashboardData::default());
        *self.lock_profile_draft()? = ProfileDraft::default();
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated()
    }

    // ── Registration flow (anonymous) ────────────────────────────────

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Registration, CoreError> {
        let resp = self
            .inner
            .api
            .register(&RegisterRequest {
                username: username.to_owned(),
                password: password.to_owned(),
                email: email.to_owned(),
                name,
                phone_number,
            })
            .await?;
        debug!(username, "registered account");
        Ok(Registration::from(resp))
    }

    pub async fn verify_email(
        &self,
        user_id: &str,
        verification_id: &str,
        token: &str,
    ) -> Result<Account, CoreError> {
        let wire = self
            .inner
            .api
            .verify_email(&VerifyEmailRequest {
                user_id: user_id.to_owned(),
                verification_id: verification_id.to_owned(),
                token: token.to_owned(),
            })
            .await?;
        Ok(Account::from(wire))
    }

    pub async fn resend_verification(
        &self,
        username: &str,
    ) -> Result<VerificationChallenge, CoreError> {
        let wire = self
            .inner
            .api
            .resend_verification(&ResendVerificationRequest {
                username: username.to_owned(),
            })
            .await?;
        Ok(VerificationChallenge::from(wire))
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Current dashboard snapshot (cloned out of the watch channel).
    pub fn dashboard(&self) -> DashboardData {
        self.inner.dashboard.borrow().clone()
    }

    pub fn subscribe_dashboard(&self) -> watch::Receiver<DashboardData> {
        self.inner.dashboard.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    pub fn current_account(&self) -> Option<Account> {
        self.inner.dashboard.borrow().account.clone()
    }

    /// The in-progress profile edit, seeded from the account on bootstrap.
    pub fn profile_draft(&self) -> Result<ProfileDraft, CoreError> {
        Ok(self.lock_profile_draft()?.clone())
    }

    pub fn rule_busy(&self, id: &str) -> bool {
        self.inner.busy_rules.is_busy(id)
    }

    pub fn alert_busy(&self, id: &str) -> bool {
        self.inner.busy_alerts.is_busy(id)
    }

    // ── Internals shared with sync/mutate ────────────────────────────

    pub(crate) fn notify(&self, kind: NoticeKind, text: impl Into<String>) {
        // No receivers is fine; notices are fire-and-forget.
        let _ = self.inner.notices.send(Notice {
            kind,
            text: text.into(),
        });
    }

    pub(crate) fn seed_profile_draft(&self, account: &Account) {
        if let Ok(mut draft) = self.lock_profile_draft() {
            *draft = ProfileDraft::from_account(account);
        }
    }

    fn lock_profile_draft(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, ProfileDraft>, CoreError> {
        self.inner
            .profile_draft
            .lock()
            .map_err(|_| CoreError::Internal("profile draft poisoned".into()))
    }
}
