//! Value resolution and env file generation for envgen
//!
//! - **`resolver`**: resolves one variable's rule to a value, absent, or a
//!   failure, and resolves whole templates concurrently.
//! - **`generator`**: renders a template into `KEY=VALUE` content, collecting
//!   every error in one pass.
//! - **`roundtrip`**: derives templates from env files and refreshes
//!   template defaults from currently resolvable values.
//! - **`dotenv`**: reads `KEY=VALUE` env files.

pub mod dotenv;
pub mod generator;
pub mod resolver;
pub mod roundtrip;

pub use generator::{escape_value, ContentGenerator, GeneratorOptions};
pub use resolver::{EnvLookup, MapEnv, ProcessEnv, ValueResolver};
pub use roundtrip::{generate_template, refresh_defaults};
