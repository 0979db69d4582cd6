//! Portal operations.
//!
//! Each operation is one call through [`ApiClient`] against a fixed endpoint,
//! with the same authentication requirement the dashboards use. Payloads stay
//! JSON; the portal does not model domain records.

mod accounts;
mod admin;
mod agriculture;
mod city;
mod dashboard;
mod healthcare;

pub use accounts::*;
pub use city::*;
pub use dashboard::*;

use serde_json::Value;

use crate::api::{ApiClient, RequestDescriptor};
use crate::error::PortalResult;

/// Typed call sites over one API client.
#[derive(Clone)]
pub struct Portal {
    client: ApiClient,
}

impl Portal {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn send(&self, request: RequestDescriptor) -> PortalResult<Option<Value>> {
        Ok(self.client.call(request).await?)
    }

    /// GET a single document. No content reads as `null`.
    async fn fetch(&self, path: &str, requires_auth: bool) -> PortalResult<Value> {
        Ok(self
            .send(RequestDescriptor::get(path).auth(requires_auth))
            .await?
            .unwrap_or(Value::Null))
    }

    /// GET a collection, paginated or not.
    async fn fetch_list(&self, path: &str, requires_auth: bool) -> PortalResult<Vec<Value>> {
        Ok(results_of(self.fetch(path, requires_auth).await?))
    }
}

/// Items of a collection response: the `results` of a paginated page, or
/// the array itself.
pub fn results_of(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_of_handles_both_shapes() {
        assert_eq!(results_of(json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(
            results_of(json!({ "count": 1, "next": null, "results": [{ "id": 3 }] })),
            vec![json!({ "id": 3 })]
        );
        assert!(results_of(json!({ "detail": "x" })).is_empty());
        assert!(results_of(Value::Null).is_empty());
    }
}
