/// Outbound delivery channels
pub mod email;
pub mod notify;

pub use email::{EmailChannel, SendGridChannel};
pub use notify::{LineNotifyChannel, NotifyChannel};

use crate::error::InquiryError;
use std::time::Duration;

/// Builds the HTTP client shared by both channels
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, InquiryError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("inquiry-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| InquiryError::Config(format!("Failed to build HTTP client: {}", e)))
}
