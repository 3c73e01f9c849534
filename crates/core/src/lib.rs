//! Core domain types, errors, and constants for `envgen`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace. Per-variable failures are carried as `Error` values inside
//!   resolution outcomes so that generation can aggregate them.
//! - **`types`**: the template model (`Template`, `VariableConfig`, `Source`),
//!   ordered environment mappings, resolution outcomes, and the secret store
//!   contract (`SecretStore`, `SecretBundle`, `FetchError`).
//! - **`constants`**: source names, separators and file-name defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
