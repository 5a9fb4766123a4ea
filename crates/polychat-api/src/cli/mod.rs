//! CLI command definitions for the `polychat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod model;

use clap::{Parser, Subcommand};

/// Multi-model AI chat: API server and interactive client.
#[derive(Parser)]
#[command(name = "polychat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to bind (defaults to config.toml, then 8080).
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind (defaults to config.toml, then 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },

    /// Start an interactive chat session against a running server.
    Chat {
        /// Authenticated user id the session belongs to.
        #[arg(long)]
        user: String,

        /// Model to start with.
        #[arg(long, default_value = "gpt-4")]
        model: String,

        /// Base URL of the API server.
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
    },

    /// List the model catalog.
    Models,
}
