//! Index Provisioning
//!
//! Runs once at startup, before the HTTP listener is bound. Creates the target
//! index with its fixed schema, retrying with a fixed delay while the search
//! engine comes up. If every attempt fails, startup is aborted.

pub mod index;
