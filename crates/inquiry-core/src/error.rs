/// Error types for the inquiry relay
use crate::models::ChannelKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InquiryError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{channel} transport error: {message}")]
    Transport {
        channel: ChannelKind,
        message: String,
    },

    #[error("{channel} rejected the request with status {status}: {body}")]
    Rejected {
        channel: ChannelKind,
        status: u16,
        body: String,
    },

    #[error("{channel} returned a malformed response: {message}")]
    InvalidResponse {
        channel: ChannelKind,
        message: String,
    },

    /// One channel failed after the other had already delivered.
    #[error("{source}")]
    PartialDispatch {
        delivered: ChannelKind,
        source: Box<InquiryError>,
    },

    #[error("Dispatch cancelled: {0}")]
    Cancelled(String),
}

impl InquiryError {
    /// Channel whose call produced this error, if any
    pub fn channel(&self) -> Option<ChannelKind> {
        match self {
            Self::Transport { channel, .. }
            | Self::Rejected { channel, .. }
            | Self::InvalidResponse { channel, .. } => Some(*channel),
            Self::PartialDispatch { source, .. } => source.channel(),
            Self::MalformedInput(_) | Self::Config(_) | Self::Cancelled(_) => None,
        }
    }

    /// HTTP status the Lambda shell reports for this error
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::MalformedInput(_) => http::StatusCode::BAD_REQUEST,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn transport(channel: ChannelKind, err: reqwest::Error) -> Self {
        Self::Transport {
            channel,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InquiryError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
