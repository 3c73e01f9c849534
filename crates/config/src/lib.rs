//! Template documents for envgen
//!
//! Templates are stored as JSON, YAML or TOML; the format is picked from the
//! file extension and kept when a template is written back.

pub mod format;
pub mod loader;

pub use format::TemplateFormat;
pub use loader::TemplateFile;
