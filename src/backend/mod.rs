//! Downstream plumbing for the two backends the gateway drives:
//! the user-store (persistent user records) and the token-service
//! (bearer token minting, validation, and revocation).

pub mod client;
pub mod contracts;

pub use client::BackendClient;
pub use contracts::{BackendReply, User};
