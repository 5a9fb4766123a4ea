//! Infrastructure implementations for Polychat.
//!
//! Pins the trait seams from polychat-core to concrete collaborators:
//! SQLite repositories behind a split read/write pool, the HTTP exchange
//! client, the checkout (payments) client, and the config loader.

pub mod config;
pub mod http_client;
pub mod payments;
pub mod sqlite;
