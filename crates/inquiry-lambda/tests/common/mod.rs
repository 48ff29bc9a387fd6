//! Common test utilities for handler integration tests
#![allow(dead_code)]

use inquiry_core::models::{
    DispatchPolicy, InquiryConfig, LineNotifyConfig, SendGridConfig, SenderIdentity,
};
use inquiry_lambda::AppContext;
use lambda_http::{Body, Request};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

pub const SENDGRID_PATH: &str = "/v3/mail/send";
pub const LINE_PATH: &str = "/api/notify";

/// Context whose channels both point at a mock server
pub fn context_for(base_url: &str) -> Arc<AppContext> {
    let config = InquiryConfig {
        sender: SenderIdentity::new("info@calmato.jp"),
        sendgrid: SendGridConfig {
            api_key: SecretString::from("SG.test-key"),
            api_url: format!("{}{}", base_url, SENDGRID_PATH),
        },
        line: Some(LineNotifyConfig {
            access_token: SecretString::from("line-test-token"),
            api_url: format!("{}{}", base_url, LINE_PATH),
        }),
        policy: DispatchPolicy::Concurrent,
        http_timeout: Duration::from_secs(5),
        escape_html: false,
    };
    AppContext::from_config(&config).unwrap()
}

/// API Gateway style request carrying a JSON body
pub fn inquiry_request(method: &str, body: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri("/inquiry")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn body_text(response: &lambda_http::Response<Body>) -> String {
    String::from_utf8(response.body().to_vec()).unwrap()
}
