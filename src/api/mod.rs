//! HTTP API Module
//!
//! Shared plumbing for the axum server: application state, routing, the error
//! type every handler returns, and request/response DTOs. The word handlers
//! themselves live in `search::handlers`.
//!
//! ## Routes
//! - `POST /post` (alias `/words`): index a single word.
//! - `GET /get?prefix=..` (alias `/search`): most frequent word with that prefix.
//! - `GET /health`: liveness.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;
