//! Session guard for role-specific dashboards.

use std::sync::Arc;

use crate::error::GuardRejection;
use crate::navigation::Navigator;
use crate::session::store::{keys, SessionStore};
use crate::session::Role;

/// Credential and role as currently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    /// Raw stored role. Kept as a string so unknown roles survive a read.
    pub role: Option<String>,
}

impl Session {
    /// Read the session from `store`.
    pub fn load(store: &dyn SessionStore) -> Self {
        Self {
            token: store.get(keys::AUTH_TOKEN),
            role: store.get(keys::USER_ROLE),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Stored role, if it names a known role.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Gate in front of every guarded page.
///
/// Must run before any data loading; a rejection has already redirected to
/// the login page when it is returned.
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl SessionGuard {
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
        }
    }

    /// Check that a credential is stored and, when `expected` is given, that
    /// the stored role matches it.
    ///
    /// An authorized check only reads the store, so repeating it has no
    /// observable effect.
    pub fn check_auth(&self, expected: Option<Role>) -> Result<Session, GuardRejection> {
        let session = Session::load(self.store.as_ref());

        let outcome = if !session.is_authenticated() {
            Err(GuardRejection::MissingToken)
        } else {
            match expected {
                Some(role) if session.role() != Some(role) => Err(GuardRejection::RoleMismatch {
                    expected: role,
                    found: session.role.clone(),
                }),
                _ => Ok(session),
            }
        };

        if let Err(rejection) = &outcome {
            tracing::warn!(%rejection, "Session guard rejected page access");
            self.navigator.redirect(&self.login_path);
        }

        outcome
    }

    /// Drop the stored session and return to the login page.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear session store on logout");
        }
        tracing::info!("Signed out");
        self.navigator.redirect(&self.login_path);
    }
}
