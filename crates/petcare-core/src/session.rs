//! Mock auth session: an opaque context used to namespace storage keys.
//!
//! Credentials are never validated here; signing in simply records the
//! profile locally, matching the mock auth layer of the mobile shell.

use serde::{Deserialize, Serialize};

use crate::store::{EntityStore, Storage, StoreResult};

const AUTH_KEY: &str = "auth_user";
const ONBOARDING_KEY: &str = "hasSeenOnboarding";

/// Locally stored user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub email: String,
}

/// Opaque session context consumed by the entity store.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub is_authenticated: bool,
    /// Key used to namespace storage collections per household
    pub user_key: String,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            user_key: String::new(),
        }
    }

    pub fn for_user(profile: &UserProfile) -> Self {
        Self {
            is_authenticated: true,
            user_key: profile.email.clone(),
        }
    }
}

impl<S: Storage> EntityStore<S> {
    /// The signed-in profile, if any. Auth state is stored unscoped so
    /// it can be read before a namespace exists.
    pub fn current_user(&self) -> StoreResult<Option<UserProfile>> {
        match self.storage().get(AUTH_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Record a signed-in profile and scope subsequent reads/writes to
    /// it. No credential check happens here.
    pub fn log_in(&mut self, email: &str) -> StoreResult<Session> {
        let profile = UserProfile {
            email: email.to_string(),
        };
        let raw = serde_json::to_string(&profile)?;
        self.storage_mut().set(AUTH_KEY, &raw)?;
        let session = Session::for_user(&profile);
        self.set_namespace(Some(session.user_key.clone()));
        Ok(session)
    }

    /// Sign-up is log-in plus marking onboarding as seen.
    pub fn sign_up(&mut self, email: &str) -> StoreResult<Session> {
        let session = self.log_in(email)?;
        self.storage_mut().set(ONBOARDING_KEY, "true")?;
        Ok(session)
    }

    /// Clear the stored profile and drop back to the unscoped namespace.
    pub fn log_out(&mut self) -> StoreResult<()> {
        self.storage_mut().remove(AUTH_KEY)?;
        self.set_namespace(None);
        Ok(())
    }

    /// Whether the onboarding flow has been completed on this device.
    pub fn has_seen_onboarding(&self) -> StoreResult<bool> {
        Ok(self.storage().get(ONBOARDING_KEY)?.as_deref() == Some("true"))
    }
}
