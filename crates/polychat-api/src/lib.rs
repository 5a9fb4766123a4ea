//! Application layer for Polychat: REST API and CLI.
//!
//! Exposed as a library so the HTTP surface can be driven end-to-end in
//! integration tests; the `polychat` binary is a thin wrapper.

pub mod cli;
pub mod http;
pub mod state;

pub use state::AppState;
