/// Data models for the inquiry relay
pub mod config;
pub mod inquiry;
pub mod result;

// Re-export commonly used types
pub use config::*;
pub use inquiry::*;
pub use result::*;
