//! HTTP surface: router assembly and the shared error taxonomy.

pub mod error;
pub mod routes;

use serde::Serialize;

/// Plain acknowledgement body used by mutation endpoints.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

pub use routes::{create_router, AppState};
