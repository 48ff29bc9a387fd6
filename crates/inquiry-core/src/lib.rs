/// Inquiry Core - Shared library for the Calmato inquiry relay
///
/// This crate contains the inquiry record, message rendering, the two
/// delivery channels (SendGrid email and LINE Notify) and the dispatcher
/// that fans a submission out to both.
pub mod channels;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use channels::{EmailChannel, LineNotifyChannel, NotifyChannel, SendGridChannel};
pub use dispatch::{DispatchPolicy, Dispatcher};
pub use error::InquiryError;
pub use models::{ChannelKind, ChannelResult, DispatchOutcome, InquiryConfig, InquiryRecord};
pub use render::MessageRenderer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
