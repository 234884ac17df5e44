// Configuration

mod loader;
mod settings;

pub use loader::load_config;
pub use settings::{Config, ProviderEntry, ServerSettings, DEFAULT_SYSTEM_PROMPT};
