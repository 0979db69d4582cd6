//! Role dashboards.
//!
//! A dashboard is the set of sections a role's landing page loads on entry.
//! Sections load concurrently and independently: one failing section is
//! reported in place, unless the failure redirected to login, which ends the
//! whole load.

use std::future::Future;

use futures_util::future::{join_all, BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;

use crate::error::PortalResult;
use crate::portal::{ComplaintFilter, Portal};
use crate::session::{Role, SessionGuard};

/// One loaded section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Loaded landing page for a role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub role: Role,
    pub sections: Vec<Section>,
}

type Loader<'a> = (&'static str, BoxFuture<'a, PortalResult<Value>>);

fn loader<'a, T, F>(name: &'static str, fut: F) -> Loader<'a>
where
    T: Into<Value>,
    F: Future<Output = PortalResult<T>> + Send + 'a,
{
    (name, async move { fut.await.map(Into::into) }.boxed())
}

impl Dashboard {
    /// Guard the page for `role`, then load it.
    pub async fn open(guard: &SessionGuard, portal: &Portal, role: Role) -> PortalResult<Self> {
        guard.check_auth(Some(role))?;
        Self::load(portal, role).await
    }

    /// Load every section of `role`'s dashboard concurrently.
    pub async fn load(portal: &Portal, role: Role) -> PortalResult<Self> {
        let (names, loads): (Vec<_>, Vec<_>) = loaders(portal, role).into_iter().unzip();

        let results = join_all(loads).await;

        let mut sections = Vec::with_capacity(names.len());
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(data) => sections.push(Section {
                    name,
                    data: Some(data),
                    error: None,
                }),
                Err(e) if e.is_redirect() => return Err(e),
                Err(e) => {
                    tracing::warn!(%role, section = name, error = %e, "Dashboard section failed");
                    sections.push(Section {
                        name,
                        data: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        tracing::info!(%role, sections = sections.len(), "Dashboard loaded");
        Ok(Self { role, sections })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }
}

fn loaders(portal: &Portal, role: Role) -> Vec<Loader<'_>> {
    match role {
        Role::Admin => vec![
            loader("stats", portal.dashboard_stats()),
            loader("approvals", portal.approvals()),
            loader("services", portal.services()),
            loader("users", portal.users()),
        ],
        Role::Citizen => vec![
            loader("appointments", portal.appointments()),
            loader("agri_queries", portal.agri_queries()),
            loader("complaints", async move {
                portal.complaints(&ComplaintFilter::default()).await
            }),
            loader("agri_updates", portal.agri_updates()),
        ],
        Role::Doctor => vec![
            loader("profile", portal.doctor_profiles()),
            loader("appointments", portal.appointments()),
            loader("medical_records", portal.medical_records()),
            loader("unavailability", portal.unavailability()),
        ],
        Role::AgriOfficer => vec![
            loader("stats", portal.agri_stats()),
            loader("queries", portal.agri_queries()),
            loader("advisories", portal.advisories()),
            loader("updates", portal.agri_updates()),
        ],
        Role::CityStaff => vec![
            loader("stats", portal.city_stats()),
            loader("complaints", async move {
                portal.complaints(&ComplaintFilter::default()).await
            }),
            loader("responses", portal.complaint_responses()),
            loader("categories", portal.city_categories()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GuardRejection, PortalError};
    use crate::session::{keys, SessionStore};
    use crate::test_support::{harness, sign_in};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn city_backend() -> Router {
        Router::new()
            .route(
                "/city/stats/",
                get(|| async { Json(json!({ "pending_complaints": 4, "in_progress": 1 })) }),
            )
            .route(
                "/city/complaints/",
                get(|| async { Json(json!({ "results": [{ "id": 1 }, { "id": 2 }] })) }),
            )
            .route(
                "/city/responses/",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "detail": "Responses unavailable" })),
                    )
                }),
            )
            .route("/city/categories/", get(|| async { Json(json!(["Roads", "Water"])) }))
    }

    #[tokio::test]
    async fn test_failed_section_does_not_fail_dashboard() {
        let h = harness(city_backend()).await;
        sign_in(&h.store, "tok", "city_staff");
        let portal = Portal::new(h.client.clone());

        let dashboard = Dashboard::load(&portal, Role::CityStaff).await.unwrap();

        assert_eq!(dashboard.sections.len(), 4);
        assert_eq!(
            dashboard.section("complaints").unwrap().data,
            Some(json!([{ "id": 1 }, { "id": 2 }]))
        );
        let responses = dashboard.section("responses").unwrap();
        assert!(responses.data.is_none());
        assert_eq!(responses.error.as_deref(), Some("Responses unavailable"));
        assert_eq!(h.recorder.count(), 4);
    }

    #[tokio::test]
    async fn test_redirecting_section_aborts_load() {
        let h = harness(city_backend()).await;
        let portal = Portal::new(h.client.clone());

        let err = Dashboard::load(&portal, Role::CityStaff).await.unwrap_err();

        assert!(err.is_redirect());
        assert_eq!(h.navigator.last().as_deref(), Some("/login/"));
    }

    #[tokio::test]
    async fn test_open_guards_before_loading() {
        let h = harness(city_backend()).await;
        sign_in(&h.store, "tok", "citizen");
        let guard = SessionGuard::new(h.store.clone(), h.navigator.clone(), "/login/");
        let portal = Portal::new(h.client.clone());

        let err = Dashboard::open(&guard, &portal, Role::CityStaff)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PortalError::Guard(GuardRejection::RoleMismatch { .. })
        ));
        assert_eq!(h.recorder.count(), 0);
        assert_eq!(h.store.get(keys::AUTH_TOKEN).as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_dashboard_serializes_sections() {
        let h = harness(city_backend()).await;
        sign_in(&h.store, "tok", "city_staff");
        let guard = SessionGuard::new(h.store.clone(), h.navigator.clone(), "/login/");
        let portal = Portal::new(h.client.clone());

        let dashboard = Dashboard::open(&guard, &portal, Role::CityStaff)
            .await
            .unwrap();
        let rendered = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(rendered["role"], "city_staff");
        assert_eq!(rendered["sections"][0]["name"], "stats");
        assert!(rendered["sections"][2].get("data").is_none());
    }
}
