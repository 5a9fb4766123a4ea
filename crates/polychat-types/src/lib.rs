//! Shared domain types for Polychat.
//!
//! This crate holds the data shapes used across the workspace: chat
//! messages, the static model catalog, subscriptions, configuration,
//! and the error enums. It performs no I/O.

pub mod config;
pub mod error;
pub mod message;
pub mod model;
pub mod subscription;
