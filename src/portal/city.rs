//! Citizen complaints and city staff responses.

use serde_json::{json, Value};

use crate::api::RequestDescriptor;
use crate::error::PortalResult;
use crate::portal::Portal;

/// Optional filters for the complaint list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

impl ComplaintFilter {
    /// Query string for the filter, including the leading `?`, or empty.
    fn query(&self) -> String {
        let params: Vec<String> = [
            ("status", &self.status),
            ("category", &self.category),
            ("priority", &self.priority),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", name, urlencoding::encode(v)))
        })
        .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl Portal {
    pub async fn city_stats(&self) -> PortalResult<Value> {
        self.fetch("/city/stats/", false).await
    }

    pub async fn complaints(&self, filter: &ComplaintFilter) -> PortalResult<Vec<Value>> {
        self.fetch_list(&format!("/city/complaints/{}", filter.query()), true)
            .await
    }

    pub async fn complaint(&self, id: u64) -> PortalResult<Value> {
        self.fetch(&format!("/city/complaints/{}/", id), true).await
    }

    pub async fn file_complaint(&self, complaint: Value) -> PortalResult<Option<Value>> {
        self.send(RequestDescriptor::post("/city/complaints/", complaint).authenticated())
            .await
    }

    /// Staff response; the backend moves the complaint to in-progress.
    pub async fn respond_to_complaint(
        &self,
        id: u64,
        message: &str,
        action_taken: &str,
    ) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::post(
                format!("/city/complaints/{}/respond/", id),
                json!({ "message": message, "action_taken": action_taken }),
            )
            .authenticated(),
        )
        .await
    }

    pub async fn resolve_complaint(&self, id: u64) -> PortalResult<Option<Value>> {
        self.send(
            RequestDescriptor::post(format!("/city/complaints/{}/resolve/", id), json!({}))
                .authenticated(),
        )
        .await
    }

    pub async fn complaint_responses(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/city/responses/", false).await
    }

    pub async fn city_categories(&self) -> PortalResult<Vec<Value>> {
        self.fetch_list("/city/categories/", false).await
    }
}
