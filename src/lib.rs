//! Seva Portal client.
//!
//! Session guard and authenticated API client for the Seva Setu
//! public-infrastructure portal (healthcare, agriculture, city services and
//! administration dashboards).
//!
//! - [`session`]: persistent session store and the page-entry guard
//! - [`api`]: one authenticated or anonymous exchange with the backend
//! - [`portal`]: typed call sites and role dashboards built on the client

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod notify;
pub mod portal;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, Method, NormalizedError, RequestDescriptor};
pub use error::{ApiError, GuardRejection, PortalError, PortalResult, StoreError};
pub use session::{Role, Session, SessionGuard, SessionStore};
