/// Process-level services
pub mod config;

pub use config::EnvConfigProvider;
