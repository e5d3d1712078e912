// ── Session store ──
//
// Owns the bearer token lifecycle: restored once from durable storage at
// startup, set on login, cleared on logout or bootstrap failure. The token
// is the sole gate for the authenticated view; everything downstream
// observes it through a watch channel instead of reading storage directly.

use std::sync::Mutex;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;

/// Durable single-slot token storage.
///
/// The one seam between the session store and the platform: squall-config
/// provides keyring/file implementations, tests use [`MemoryTokenSlot`].
/// Absent is a valid, non-error state (anonymous).
pub trait TokenSlot: Send + Sync {
    fn load(&self) -> Result<Option<SecretString>, CoreError>;
    fn store(&self, token: &SecretString) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// Non-durable slot for tests and ephemeral sessions (e.g. a token passed
/// through the environment that should never be written back).
#[derive(Default)]
pub struct MemoryTokenSlot {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenSlot {
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            token: Mutex::new(token),
        }
    }
}

impl TokenSlot for MemoryTokenSlot {
    fn load(&self) -> Result<Option<SecretString>, CoreError> {
        Ok(self
            .token
            .lock()
            .map_err(|_| CoreError::Internal("token slot poisoned".into()))?
            .clone())
    }

    fn store(&self, token: &SecretString) -> Result<(), CoreError> {
        *self
            .token
            .lock()
            .map_err(|_| CoreError::Internal("token slot poisoned".into()))? =
            Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self
            .token
            .lock()
            .map_err(|_| CoreError::Internal("token slot poisoned".into()))? = None;
        Ok(())
    }
}

/// Process-wide session state with a defined lifecycle.
pub struct Session {
    slot: Box<dyn TokenSlot>,
    token: watch::Sender<Option<SecretString>>,
}

impl Session {
    pub fn new(slot: Box<dyn TokenSlot>) -> Self {
        let (token, _) = watch::channel(None);
        Self { slot, token }
    }

    /// Read the token from durable storage at process start.
    pub fn restore(&self) -> Result<Option<SecretString>, CoreError> {
        let token = self.slot.load()?;
        debug!(present = token.is_some(), "restored session token");
        let _ = self.token.send(token.clone());
        Ok(token)
    }

    /// Persist a new token and publish it. Persist-then-publish ordering:
    /// observers reacting to the change may immediately re-read storage.
    pub fn set_token(&self, token: SecretString) -> Result<(), CoreError> {
        self.slot.store(&token)?;
        let _ = self.token.send(Some(token));
        Ok(())
    }

    /// Remove the persisted token and reset to anonymous.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.slot.clear()?;
        let _ = self.token.send(None);
        Ok(())
    }

    pub fn current(&self) -> Option<SecretString> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Observe token changes (login, logout, expiry).
    pub fn subscribe(&self) -> watch::Receiver<Option<SecretString>> {
        self.token.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn restore_of_empty_slot_is_anonymous_not_error() {
        let session = Session::new(Box::new(MemoryTokenSlot::default()));
        assert!(session.restore().expect("restore").is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn set_token_persists_and_publishes() {
        let session = Session::new(Box::new(MemoryTokenSlot::default()));
        let mut rx = session.subscribe();

        session
            .set_token(SecretString::from("tok-123"))
            .expect("set");
        assert!(session.is_authenticated());
        assert_eq!(
            session.current().expect("token").expose_secret(),
            "tok-123"
        );
        assert!(rx.has_changed().expect("watch"));
    }

    #[test]
    fn clear_removes_persisted_token() {
        let slot = MemoryTokenSlot::new(Some(SecretString::from("tok-123")));
        let session = Session::new(Box::new(slot));
        assert!(session.restore().expect("restore").is_some());

        session.clear().expect("clear");
        assert!(!session.is_authenticated());
        // A fresh restore sees the durable slot emptied too.
        assert!(session.restore().expect("restore").is_none());
    }
}
