//! Farmer queries, officer advice and agricultural bulletins.

use serde_json::{json, Value};

use crate::api::RequestDescriptor;
use crate::error::PortalResult;
use crate::portal::Portal;

impl Portal {
    pub async fn agri_stats(&self) -> PortalResult<Value> {
        self.fetch("/agriculture/stats/", false).await
    }

    pub async fn agri_queries(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/agriculture/queries/", true).await
    }

    pub async fn agri_query(&self, id: u64) -> PortalResult<Value> {
        self.fetch(&format!("/agriculture/queries/{}/", id), true)
            .await
    }

    pub async fn submit_agri_query(&self, query: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/agriculture/queries/", query).authenticated())
            .await
    }

    /// Officer's answer to a farmer query.
    pub async fn respond_to_query(&self, id: u64, advice: &str) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::post(
                format!("/agriculture/queries/{}/respond/", id),
                json!({ "advice": advice }),
            )
            .authenticated(),
        )
        .await
    }

    pub async fn agri_updates(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/agriculture/updates/", false).await
    }

    pub async fn post_agri_update(&self, update: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/agriculture/updates/", update).authenticated())
            .await
    }

    pub async fn advisories(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/agriculture/advisories/", false).await
    }

    pub async fn crop_categories(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/agriculture/crop-categories/", false)
            .await
    }
}
