//! Presentation layer for roundtable
//!
//! This crate contains the HTTP/WebSocket surface (router, wire types, the
//! WebSocket session pump) and the CLI argument definitions.

pub mod cli;
pub mod http;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use http::{
    routes::{ApiError, router},
    state::AppState,
    wire::{ChatRequest, ChatResponse, EntryView, HistoryResponse, StreamRequest},
};
