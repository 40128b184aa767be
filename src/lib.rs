//! Words API Library
//!
//! Library crate behind the `words-api` binary (`main.rs`): a small HTTP service
//! that stores single words in OpenSearch and answers "which word starting with
//! this prefix was stored most often?".
//!
//! ## Modules
//! - **`api`**: Axum router, shared state, error-to-response mapping and DTOs.
//! - **`config`**: Environment-driven configuration, read once at startup.
//! - **`provision`**: Startup index creation with a bounded retry loop.
//! - **`search`**: Validation, query construction, the `SearchRepository`
//!   abstraction with its OpenSearch and in-memory implementations, and the
//!   word handlers.

pub mod api;
pub mod config;
pub mod provision;
pub mod search;
