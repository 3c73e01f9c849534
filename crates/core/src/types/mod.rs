//! Core domain types for `envgen`.
//!
//! ## Organization
//!
//! - **`environment`**: ordered `KEY=VALUE` mappings
//! - **`template`**: the template model and its document representation
//! - **`outcome`**: per-variable resolution outcomes and generation results
//! - **`secrets`**: the secret store contract

pub mod environment;
pub mod outcome;
pub mod secrets;
pub mod template;

pub use environment::*;
pub use outcome::*;
pub use secrets::*;
pub use template::*;
