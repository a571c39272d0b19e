//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope; mutations acknowledge with a
//! `{ "message": ... }` envelope. Use these instead of ad-hoc
//! `serde_json::json!` maps to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "message": ... }` acknowledgement envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
