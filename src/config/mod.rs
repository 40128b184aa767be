//! Runtime Configuration
//!
//! Everything the service needs from its environment is read exactly once at startup
//! into an [`settings::AppConfig`] value, which `main` then hands to the repository,
//! the provisioner and the router. Nothing downstream reads the environment again.

pub mod settings;
