pub mod commands;
pub mod settings;

pub use commands::Commands;
pub use settings::Settings;
