//! Platform statistics and service catalogue administration.

use serde_json::{json, Value};

use crate::api::RequestDescriptor;
use crate::error::PortalResult;
use crate::portal::Portal;

impl Portal {
    pub async fn dashboard_stats(&self) -> PortalResult<Value> {
        self.fetch("/core/dashboard/stats/", true).await
    }

    pub async fn services(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/core/services/", true).await
    }

    pub async fn service(&self, id: u64) -> PortalResult<Value> {
        self.fetch(&format!("/core/services/{}/", id), true).await
    }

    pub async fn create_service(&self, service: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/core/services/", service).authenticated())
            .await
    }

    pub async fn update_service(&self, id: u64, changes: Value) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::patch(format!("/core/services/{}/", id), changes).authenticated(),
        )
        .await
    }

    /// Enable or disable a service.
    pub async fn set_service_active(&self, id: u64, active: bool) -> PortalResult<Option<Value>> {
        self.update_service(id, json!({ "is_active": active })).await
    }
}

#[cfg(test)]
mod tests {
    use crate::portal::Portal;
    use crate::test_support::{harness, sign_in};
    use axum::{extract::Path, routing::patch, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_toggle_service_sends_patch() {
        let h = harness(Router::new().route(
            "/core/services/:id/",
            patch(|Path(id): Path<u64>, Json(body): Json<Value>| async move {
                Json(json!({ "id": id, "is_active": body["is_active"] }))
            }),
        ))
        .await;
        sign_in(&h.store, "tok", "admin");
        let portal = Portal::new(h.client.clone());

        let updated = portal.set_service_active(4, false).await.unwrap();

        assert_eq!(updated, Some(json!({ "id": 4, "is_active": false })));
        assert_eq!(h.recorder.requests()[0].method, "PATCH");
    }
}
