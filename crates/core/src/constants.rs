/// Constants used throughout the envgen codebase
// Source names as written in template documents
pub const SOURCE_LITERAL: &str = "string";
pub const SOURCE_ENVIRONMENT: &str = "env";
pub const SOURCE_REMOTE_SECRET: &str = "AwsSecretManager";

pub const SUPPORTED_SOURCES: &[&str] = &[SOURCE_LITERAL, SOURCE_ENVIRONMENT, SOURCE_REMOTE_SECRET];

// Separates the bundle id from the key in a remote secret reference
pub const BUNDLE_KEY_SEPARATOR: char = '/';

// Default env file read by generate-template and written by generate
pub const DEFAULT_ENV_FILE: &str = ".env";

// Default number of variables resolved at once
pub const DEFAULT_MAX_CONCURRENT: usize = 10;
