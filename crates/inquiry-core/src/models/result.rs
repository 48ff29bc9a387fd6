/// Channel and dispatch outcomes
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Email,
    Notify,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Notify => "notify",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one successful channel call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelResult {
    #[serde(rename = "code")]
    pub status_code: u16,
    pub body: String,
}

/// JSON body returned by LINE Notify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub status: i64,
    pub message: String,
}

/// Joined result of one dispatch.
///
/// Only `email` is surfaced to the caller; `notify` is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub email: ChannelResult,
    pub notify: Option<ChannelResult>,
}
