//! Account lifecycle operations, orchestrated across the user-store and the
//! token-service.

pub mod handlers;
mod service;

pub use service::{AccountService, Accounts};
