//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone};
use inquiry_core::models::{
    DispatchPolicy, InquiryConfig, InquiryRecord, LineNotifyConfig, SendGridConfig,
    SenderIdentity,
};
use inquiry_core::render::Timestamp;
use secrecy::SecretString;
use std::time::Duration;

pub const SENDGRID_PATH: &str = "/v3/mail/send";
pub const LINE_PATH: &str = "/api/notify";
pub const SENDGRID_KEY: &str = "SG.test-key";
pub const LINE_TOKEN: &str = "line-test-token";
pub const SENDER_EMAIL: &str = "info@calmato.jp";

/// Fixed submission time (2021/03/04 05:06:07 JST)
pub fn fixed_now() -> Timestamp {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2021, 3, 4, 5, 6, 7)
        .unwrap()
}

/// The minimal inquiry used across scenarios
pub fn tanaka_record() -> InquiryRecord {
    InquiryRecord {
        name: "田中".to_string(),
        email: "tanaka@example.com".to_string(),
        content: "見積もり希望".to_string(),
        ..Default::default()
    }
}

pub fn sender() -> SenderIdentity {
    SenderIdentity::new(SENDER_EMAIL)
}

/// Configuration pointing both channels at a mock server
pub fn config_for(base_url: &str, policy: DispatchPolicy) -> InquiryConfig {
    InquiryConfig {
        sender: sender(),
        sendgrid: SendGridConfig {
            api_key: SecretString::from(SENDGRID_KEY),
            api_url: format!("{}{}", base_url, SENDGRID_PATH),
        },
        line: Some(LineNotifyConfig {
            access_token: SecretString::from(LINE_TOKEN),
            api_url: format!("{}{}", base_url, LINE_PATH),
        }),
        policy,
        http_timeout: Duration::from_secs(5),
        escape_html: false,
    }
}

/// Percent-encodes a value the way the notify form body does
pub fn form_encoded(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Base URL of a local port with nothing listening on it
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
