/// LINE Notify chat channel
use crate::error::InquiryError;
use crate::models::{ChannelKind, ChannelResult, InquiryRecord, LineNotifyConfig, NotifyResponse};
use crate::render::RenderedNotice;
use crate::utils::logging::{email_domain, redact_body};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Posts one chat notification. Not idempotent.
    async fn notify(
        &self,
        record: &InquiryRecord,
        message: &RenderedNotice,
    ) -> Result<ChannelResult, InquiryError>;
}

/// Encodes the webhook form body
///
/// # Examples
/// ```
/// use inquiry_core::channels::notify::encode_notify_form;
/// use inquiry_core::render::RenderedNotice;
///
/// let notice = RenderedNotice { short_text: "a b&c".to_string() };
/// assert_eq!(encode_notify_form(&notice), "message=a+b%26c&notificationDisabled=false");
/// ```
pub fn encode_notify_form(message: &RenderedNotice) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("message", &message.short_text)
        .append_pair("notificationDisabled", "false")
        .finish()
}

pub struct LineNotifyChannel {
    client: reqwest::Client,
    api_url: String,
    access_token: SecretString,
}

impl LineNotifyChannel {
    pub fn new(client: reqwest::Client, config: &LineNotifyConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

#[async_trait]
impl NotifyChannel for LineNotifyChannel {
    #[tracing::instrument(
        name = "notify.send",
        skip_all,
        fields(requester_domain = %email_domain(&record.email))
    )]
    async fn notify(
        &self,
        record: &InquiryRecord,
        message: &RenderedNotice,
    ) -> Result<ChannelResult, InquiryError> {
        let form = encode_notify_form(message);

        tracing::debug!(
            form = %redact_body(&form),
            "Posting inquiry notification to LINE Notify"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.access_token.expose_secret())
            .header(CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
            .body(form)
            .send()
            .await
            .map_err(|e| InquiryError::transport(ChannelKind::Notify, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InquiryError::transport(ChannelKind::Notify, e))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "LINE Notify rejected the notification");
            return Err(InquiryError::Rejected {
                channel: ChannelKind::Notify,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: NotifyResponse =
            serde_json::from_str(&body).map_err(|e| InquiryError::InvalidResponse {
                channel: ChannelKind::Notify,
                message: e.to_string(),
            })?;

        tracing::info!(
            status = parsed.status,
            message = %parsed.message,
            "Posted inquiry notification to LINE Notify"
        );

        Ok(ChannelResult {
            status_code: status.as_u16(),
            body: parsed.message,
        })
    }
}
