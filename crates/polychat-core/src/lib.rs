//! Business logic for Polychat.
//!
//! This crate holds the exchange handler, the responder seam and its mock
//! implementations, the entitlement check, the repository trait
//! definitions, and the client-side chat session. Implementations of the
//! traits live in polychat-infra; polychat-core never depends on it.

pub mod entitlement;
pub mod exchange;
pub mod repository;
pub mod responder;
pub mod session;
