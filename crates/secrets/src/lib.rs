//! Secret store backends for envgen
//!
//! The engine only depends on the `SecretStore` trait from `envgen-core`.
//! This crate provides the production backend, AWS Secrets Manager, which is
//! reached through the `aws` CLI so that credentials stay whatever the
//! ambient CLI configuration says they are.

pub mod aws;
pub mod command_executor;

pub use aws::{AwsSecretStore, AwsSecretStoreConfig};
pub use command_executor::{CommandExecutor, SystemCommandExecutor};
