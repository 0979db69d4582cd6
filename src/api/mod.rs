//! Backend API access.
//!
//! Contains the request descriptor, the error payload decoder and the
//! client that performs the exchange.

mod client;
mod error_payload;
mod request;

pub use client::*;
pub use error_payload::*;
pub use request::*;
