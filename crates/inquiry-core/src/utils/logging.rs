/// Logging utilities for PII redaction
///
/// Inquiry submissions carry names, addresses and phone numbers. Nothing
/// from a record is logged verbatim; these helpers produce the safe form.
use regex::Regex;
use std::sync::LazyLock;

// Email redaction regex
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use inquiry_core::utils::logging::redact_email;
///
/// assert_eq!(redact_email("tanaka@example.com"), "***@example.com");
/// assert_eq!(redact_email("Contact: test@calmato.jp for help"), "Contact: ***@calmato.jp for help");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            match email.find('@') {
                Some(at_pos) => format!("***{}", &email[at_pos..]),
                None => "***@***".to_string(),
            }
        })
        .to_string()
}

/// Redacts message body for logging (shows length only)
pub fn redact_body(body: &str) -> String {
    format!("[{} bytes]", body.len())
}

/// Extracts domain from email address for safe logging
pub fn email_domain(email: &str) -> &str {
    email
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("unknown")
}

/// Creates safe log context for an inquiry
pub fn safe_inquiry_context(record: &crate::models::InquiryRecord) -> serde_json::Value {
    serde_json::json!({
        "email_domain": email_domain(&record.email),
        "has_company": !record.company_name.is_empty(),
        "subject": redact_body(&record.subject),
        "content": redact_body(&record.content),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InquiryRecord;

    #[test]
    fn test_redact_email() {
        assert_eq!(redact_email("user@example.com"), "***@example.com");
        assert_eq!(
            redact_email("From: alice@foo.com To: bob@bar.com"),
            "From: ***@foo.com To: ***@bar.com"
        );
        assert_eq!(redact_email("no address here"), "no address here");
    }

    #[test]
    fn test_redact_body() {
        assert_eq!(redact_body("Hello world"), "[11 bytes]");
        assert_eq!(redact_body(""), "[0 bytes]");
    }

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("tanaka@example.com"), "example.com");
        assert_eq!(email_domain("invalid"), "unknown");
        assert_eq!(email_domain("trailing@"), "unknown");
    }

    #[test]
    fn test_safe_inquiry_context() {
        let record = InquiryRecord {
            name: "田中".to_string(),
            email: "tanaka@example.com".to_string(),
            content: "見積もり希望".to_string(),
            ..Default::default()
        };

        let context = safe_inquiry_context(&record);
        assert_eq!(context["email_domain"], "example.com");
        assert_eq!(context["has_company"], false);
        assert_eq!(context["content"], "[18 bytes]");
        assert!(!context.to_string().contains("田中"));
    }
}
