/// Configuration service - loads config from environment variables
use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, LINE_NOTIFY_API_URL, SENDGRID_API_URL};
use crate::error::InquiryError;
use crate::models::{
    DispatchPolicy, InquiryConfig, LineNotifyConfig, SendGridConfig, SenderIdentity,
};
use secrecy::SecretString;
use std::time::Duration;

/// Environment variable-based configuration provider
#[derive(Debug, Clone)]
pub struct EnvConfigProvider {
    config: InquiryConfig,
}

impl EnvConfigProvider {
    pub fn new() -> Result<Self, InquiryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InquiryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("SENDGRID_API_KEY")
            .ok_or_else(|| InquiryError::Config("Missing SENDGRID_API_KEY env var".to_string()))?;

        let sender_email = non_empty("SENDGRID_EMAIL")
            .ok_or_else(|| InquiryError::Config("Missing SENDGRID_EMAIL env var".to_string()))?;

        let line = non_empty("LINE_NOTIFY_TOKEN").map(|token| LineNotifyConfig {
            access_token: SecretString::from(token),
            api_url: non_empty("LINE_NOTIFY_API_URL")
                .unwrap_or_else(|| LINE_NOTIFY_API_URL.to_string()),
        });

        let policy = match non_empty("DISPATCH_POLICY") {
            Some(value) => value.parse::<DispatchPolicy>().map_err(InquiryError::Config)?,
            None if line.is_some() => DispatchPolicy::Concurrent,
            None => DispatchPolicy::EmailOnly,
        };

        let http_timeout_secs = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|e| {
                InquiryError::Config(format!("Invalid HTTP_TIMEOUT_SECS: {}", e))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let escape_html = non_empty("INQUIRY_ESCAPE_HTML")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = InquiryConfig {
            sender: SenderIdentity::new(sender_email),
            sendgrid: SendGridConfig {
                api_key: SecretString::from(api_key),
                api_url: non_empty("SENDGRID_API_URL")
                    .unwrap_or_else(|| SENDGRID_API_URL.to_string()),
            },
            line,
            policy,
            http_timeout: Duration::from_secs(http_timeout_secs),
            escape_html,
        };

        // Validate configuration
        config
            .validate()
            .map_err(|e| InquiryError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!(
            policy = ?config.policy,
            escape_html = config.escape_html,
            "Configuration validated successfully"
        );

        Ok(Self { config })
    }

    pub fn config(&self) -> &InquiryConfig {
        &self.config
    }

    pub fn into_config(self) -> InquiryConfig {
        self.config
    }
}
