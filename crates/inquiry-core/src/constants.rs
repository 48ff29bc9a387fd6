/// Application constants
///
/// Fixed values baked into the relay. Anything deployment-specific lives in
/// `InquiryConfig` instead.
// ============================================================================
// Sender Identity
// ============================================================================
/// Display name used for the configured sender address
pub const SENDER_DISPLAY_NAME: &str = "Calmato 担当者";

/// Homepage linked from the HTML footer
pub const HOMEPAGE_URL: &str = "https://www.calmato.jp";

/// Subject of the acknowledgement email
pub const EMAIL_SUBJECT: &str = "[Calmato] お問い合わせありがとうございます";

/// Substitution key bound to the requester's name in the mail personalization
pub const FULLNAME_SUBSTITUTION: &str = "%fullname%";

// ============================================================================
// Endpoints
// ============================================================================

/// SendGrid v3 mail-send endpoint
pub const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// LINE Notify endpoint
pub const LINE_NOTIFY_API_URL: &str = "https://notify-api.line.me/api/notify";

// ============================================================================
// Formatting
// ============================================================================

/// chrono format for the submission timestamp (YYYY/MM/DD HH:MM:SS)
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

// ============================================================================
// Timing
// ============================================================================

/// Default per-request timeout for outbound HTTP calls in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Time reserved before the Lambda deadline for writing the response
pub const DEADLINE_SAFETY_MARGIN_MS: u64 = 500;
