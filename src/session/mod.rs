//! Client-side session state.
//!
//! - Store: persistent key-value storage for the credential and profile fields
//! - Guard: page-entry check on credential presence and role

mod guard;
mod role;
mod store;

pub use guard::*;
pub use role::*;
pub use store::*;
