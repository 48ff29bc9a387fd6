/// SendGrid email channel
use crate::constants::{EMAIL_SUBJECT, FULLNAME_SUBSTITUTION};
use crate::error::InquiryError;
use crate::models::{ChannelKind, ChannelResult, InquiryRecord, SendGridConfig, SenderIdentity};
use crate::render::{RenderedEmail, Timestamp};
use crate::utils::logging::{email_domain, redact_body};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailChannel: Send + Sync {
    /// Sends one acknowledgement email. Not idempotent.
    async fn send(
        &self,
        record: &InquiryRecord,
        message: &RenderedEmail,
        now: &Timestamp,
    ) -> Result<ChannelResult, InquiryError>;
}

/// SendGrid v3 `mail/send` payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailSendRequest {
    pub personalizations: Vec<Personalization>,
    pub from: MailAddress,
    pub subject: String,
    pub content: Vec<MailContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl MailAddress {
    fn new(name: &str, email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personalization {
    pub to: Vec<MailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<MailAddress>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub substitutions: BTreeMap<String, String>,
    pub send_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// Builds the provider payload.
///
/// The configured sender is the recipient; the requester is the envelope
/// sender and is blind-copied.
pub fn build_mail_request(
    record: &InquiryRecord,
    message: &RenderedEmail,
    now: &Timestamp,
    sender: &SenderIdentity,
) -> MailSendRequest {
    let requester = MailAddress::new(&record.name, &record.email);

    let personalization = Personalization {
        to: vec![MailAddress::new(&sender.name, &sender.email)],
        bcc: vec![requester.clone()],
        substitutions: BTreeMap::from([(FULLNAME_SUBSTITUTION.to_string(), record.name.clone())]),
        send_at: now.timestamp(),
    };

    MailSendRequest {
        personalizations: vec![personalization],
        from: requester,
        subject: EMAIL_SUBJECT.to_string(),
        content: vec![
            MailContent {
                content_type: mime::TEXT_PLAIN.essence_str().to_string(),
                value: message.plain_text.clone(),
            },
            MailContent {
                content_type: mime::TEXT_HTML.essence_str().to_string(),
                value: message.html.clone(),
            },
        ],
    }
}

pub struct SendGridChannel {
    client: reqwest::Client,
    api_url: String,
    api_key: SecretString,
    sender: SenderIdentity,
}

impl SendGridChannel {
    pub fn new(client: reqwest::Client, config: &SendGridConfig, sender: SenderIdentity) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            sender,
        }
    }
}

#[async_trait]
impl EmailChannel for SendGridChannel {
    #[tracing::instrument(
        name = "email.send",
        skip_all,
        fields(requester_domain = %email_domain(&record.email))
    )]
    async fn send(
        &self,
        record: &InquiryRecord,
        message: &RenderedEmail,
        now: &Timestamp,
    ) -> Result<ChannelResult, InquiryError> {
        let payload = build_mail_request(record, message, now, &self.sender);

        tracing::debug!(
            plain_text = %redact_body(&message.plain_text),
            html = %redact_body(&message.html),
            send_at = payload.personalizations[0].send_at,
            "Sending inquiry email via SendGrid"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| InquiryError::transport(ChannelKind::Email, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InquiryError::transport(ChannelKind::Email, e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "SendGrid rejected the email");
            return Err(InquiryError::Rejected {
                channel: ChannelKind::Email,
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(status = status.as_u16(), "Sent inquiry email via SendGrid");

        Ok(ChannelResult {
            status_code: status.as_u16(),
            body,
        })
    }
}
