//! Sign-in, profile, users and provider approvals.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::RequestDescriptor;
use crate::error::{PortalError, PortalResult};
use crate::portal::Portal;
use crate::session::{keys, Session};

/// Username/password pair for the login endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Admin verdict on a service-provider approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    fn verb(&self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "approve",
            ApprovalDecision::Reject => "reject",
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl LoginUser {
    fn display_name(&self) -> Option<String> {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Some(full.trim().to_string());
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        let joined = joined.trim();
        if joined.is_empty() {
            self.username.clone()
        } else {
            Some(joined.to_string())
        }
    }
}

impl Portal {
    /// Exchange credentials for a token and store the new session,
    /// replacing whatever was stored before.
    pub async fn login(&self, credentials: &Credentials) -> PortalResult<Session> {
        let payload = self
            .send(RequestDescriptor::post(
                "/accounts/login/",
                json!({
                    "username": credentials.username,
                    "password": credentials.password,
                }),
            ))
            .await?
            .unwrap_or(Value::Null);

        let response: LoginResponse = serde_json::from_value(payload)
            .map_err(|e| PortalError::UnexpectedResponse(format!("login: {}", e)))?;

        let store = self.client.session_store();
        store.clear()?;
        store.set(keys::AUTH_TOKEN, &response.access)?;
        if let Some(refresh) = &response.refresh {
            store.set(keys::REFRESH_TOKEN, refresh)?;
        }
        if let Some(role) = &response.user.role {
            store.set(keys::USER_ROLE, role)?;
        }
        if let Some(name) = response.user.display_name() {
            store.set(keys::USER_NAME, &name)?;
        }
        if let Some(email) = &response.user.email {
            store.set(keys::USER_EMAIL, email)?;
        }

        let session = Session::load(store.as_ref());
        tracing::info!(
            username = %credentials.username,
            role = session.role.as_deref().unwrap_or("none"),
            "Signed in"
        );
        Ok(session)
    }

    pub async fn profile(&self) -> PortalResult<Value> {
        self.fetch("/accounts/profile/", true).await
    }

    pub async fn users(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/accounts/users/", true).await
    }

    pub async fn user(&self, id: u64) -> PortalResult<Value> {
        self.fetch(&format!("/accounts/users/{}/", id), true).await
    }

    pub async fn approvals(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/accounts/approvals/", true).await
    }

    pub async fn decide_approval(
        &self,
        id: u64,
        decision: ApprovalDecision,
    ) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::post(
                format!("/accounts/approvals/{}/{}/", id, decision.verb()),
                json!({}),
            )
            .authenticated(),
        )
        .await
    }
}
