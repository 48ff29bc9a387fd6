/// Configuration models
use crate::constants::{HOMEPAGE_URL, SENDER_DISPLAY_NAME};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// How the dispatcher uses its channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    /// Send the email only; its result or error is the outcome
    EmailOnly,
    /// Send email and notification concurrently; either failing fails the dispatch
    Concurrent,
}

impl FromStr for DispatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email-only" | "email_only" | "sequential" => Ok(Self::EmailOnly),
            "concurrent" => Ok(Self::Concurrent),
            other => Err(format!("Unknown dispatch policy: {}", other)),
        }
    }
}

/// Identity the relay sends as, and the footer it signs with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub name: String,
    pub email: String,
    pub homepage: String,
}

impl SenderIdentity {
    /// Sender with the fixed display name and homepage
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: SENDER_DISPLAY_NAME.to_string(),
            email: email.into(),
            homepage: HOMEPAGE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendGridConfig {
    pub api_key: SecretString,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct LineNotifyConfig {
    pub access_token: SecretString,
    pub api_url: String,
}

/// System configuration, loaded once per cold start
#[derive(Debug, Clone)]
pub struct InquiryConfig {
    pub sender: SenderIdentity,
    pub sendgrid: SendGridConfig,
    pub line: Option<LineNotifyConfig>,
    pub policy: DispatchPolicy,
    pub http_timeout: Duration,
    pub escape_html: bool,
}

impl InquiryConfig {
    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.sender.email.trim().is_empty() {
            return Err("Sender email not configured".to_string());
        }

        if self.sendgrid.api_key.expose_secret().trim().is_empty() {
            return Err("SendGrid API key is empty".to_string());
        }

        validate_url("SendGrid API URL", &self.sendgrid.api_url)?;

        match (&self.line, self.policy) {
            (Some(line), _) => {
                if line.access_token.expose_secret().trim().is_empty() {
                    return Err("LINE Notify access token is empty".to_string());
                }
                validate_url("LINE Notify API URL", &line.api_url)?;
            }
            (None, DispatchPolicy::Concurrent) => {
                return Err("Concurrent dispatch requires a LINE Notify access token".to_string());
            }
            (None, DispatchPolicy::EmailOnly) => {}
        }

        if self.http_timeout.is_zero() {
            return Err("HTTP timeout must be > 0".to_string());
        }

        Ok(())
    }
}

fn validate_url(label: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("Invalid {}: {}", label, e))?;
    match parsed.scheme() {
        "https" | "http" => Ok(()),
        scheme => Err(format!("Invalid {} scheme: {}", label, scheme)),
    }
}
