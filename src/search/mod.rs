//! Search Module
//!
//! Everything between the HTTP layer and the search engine.
//!
//! ## Overview
//! The engine (OpenSearch) does all indexing, tokenization and aggregation. This
//! module validates input, shapes documents and queries, and decodes results.
//!
//! ## Submodules
//! - **`validation`**: Letters-only check applied to every word and prefix.
//! - **`query`**: Prefix filter + terms aggregation + max-bucket query template.
//! - **`types`**: Stored document and decoded `_search` response.
//! - **`repository`**: The `SearchRepository` capability trait and its error type.
//! - **`opensearch`**: Production repository over the OpenSearch REST API.
//! - **`memory`**: In-process repository used by tests.
//! - **`service`**: `WordService`, the repository bound to the served index.
//! - **`handlers`**: Axum handlers for inserting words and prefix search.

pub mod handlers;
pub mod memory;
pub mod opensearch;
pub mod query;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;
