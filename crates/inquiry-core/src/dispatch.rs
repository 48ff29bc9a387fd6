/// Dispatch coordinator - fans an inquiry out to the delivery channels
use crate::channels::{
    EmailChannel, LineNotifyChannel, NotifyChannel, SendGridChannel, build_http_client,
};
use crate::error::InquiryError;
use crate::models::{ChannelKind, DispatchOutcome, InquiryConfig, InquiryRecord};
use crate::render::{MessageRenderer, Timestamp};
use crate::utils::logging::safe_inquiry_context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub use crate::models::DispatchPolicy;

/// Dispatcher context, built once per cold start and shared read-only
#[derive(Clone)]
pub struct Dispatcher {
    renderer: MessageRenderer,
    email: Arc<dyn EmailChannel>,
    notify: Option<Arc<dyn NotifyChannel>>,
}

impl Dispatcher {
    /// Concurrent dispatch when `notify` is present, email-only otherwise
    pub fn new(
        renderer: MessageRenderer,
        email: Arc<dyn EmailChannel>,
        notify: Option<Arc<dyn NotifyChannel>>,
    ) -> Self {
        Self {
            renderer,
            email,
            notify,
        }
    }

    /// Wires SendGrid and LINE Notify channels from configuration
    pub fn from_config(config: &InquiryConfig) -> Result<Self, InquiryError> {
        let client = build_http_client(config.http_timeout)?;
        let renderer = MessageRenderer::new(config.sender.clone(), config.escape_html);

        let email: Arc<dyn EmailChannel> = Arc::new(SendGridChannel::new(
            client.clone(),
            &config.sendgrid,
            config.sender.clone(),
        ));

        let notify: Option<Arc<dyn NotifyChannel>> = match (config.policy, &config.line) {
            (DispatchPolicy::Concurrent, Some(line)) => {
                Some(Arc::new(LineNotifyChannel::new(client, line)))
            }
            (DispatchPolicy::Concurrent, None) => {
                return Err(InquiryError::Config(
                    "Concurrent dispatch requires a LINE Notify access token".to_string(),
                ));
            }
            (DispatchPolicy::EmailOnly, _) => None,
        };

        Ok(Self::new(renderer, email, notify))
    }

    pub fn policy(&self) -> DispatchPolicy {
        if self.notify.is_some() {
            DispatchPolicy::Concurrent
        } else {
            DispatchPolicy::EmailOnly
        }
    }

    /// Dispatches using the server's local time as the submission time
    pub async fn dispatch(&self, record: &InquiryRecord) -> Result<DispatchOutcome, InquiryError> {
        let now = chrono::Local::now().fixed_offset();
        self.dispatch_at(record, now).await
    }

    /// Dispatches, abandoning in-flight calls once `budget` elapses
    pub async fn dispatch_within(
        &self,
        record: &InquiryRecord,
        budget: Option<Duration>,
    ) -> Result<DispatchOutcome, InquiryError> {
        match budget {
            Some(budget) => tokio::time::timeout(budget, self.dispatch(record))
                .await
                .map_err(|_| {
                    warn!(budget_ms = budget.as_millis() as u64, "Dispatch deadline exceeded");
                    InquiryError::Cancelled(format!(
                        "deadline of {}ms exceeded",
                        budget.as_millis()
                    ))
                })?,
            None => self.dispatch(record).await,
        }
    }

    /// Dispatches with an explicit submission time shared by every channel
    #[tracing::instrument(name = "dispatch", skip_all, fields(policy = ?self.policy()))]
    pub async fn dispatch_at(
        &self,
        record: &InquiryRecord,
        now: Timestamp,
    ) -> Result<DispatchOutcome, InquiryError> {
        info!(inquiry = %safe_inquiry_context(record), "Dispatching inquiry");

        let rendered = self.renderer.render(record, &now);

        let Some(notify) = &self.notify else {
            let email = self.email.send(record, &rendered.email, &now).await?;
            return Ok(DispatchOutcome {
                email,
                notify: None,
            });
        };

        let (email_result, notify_result) = tokio::join!(
            self.email.send(record, &rendered.email, &now),
            notify.notify(record, &rendered.notice),
        );

        match (email_result, notify_result) {
            (Ok(email), Ok(notify)) => {
                info!(
                    email_status = email.status_code,
                    notify_status = notify.status_code,
                    "Inquiry dispatched to all channels"
                );
                Ok(DispatchOutcome {
                    email,
                    notify: Some(notify),
                })
            }
            (Ok(email), Err(err)) => Err(partial(ChannelKind::Email, email.status_code, err)),
            (Err(err), Ok(notify)) => Err(partial(ChannelKind::Notify, notify.status_code, err)),
            (Err(email_err), Err(notify_err)) => {
                // Email error wins when both fail
                error!(error = %notify_err, "Notify channel also failed");
                Err(email_err)
            }
        }
    }
}

fn partial(delivered: ChannelKind, status: u16, err: InquiryError) -> InquiryError {
    warn!(
        delivered = %delivered,
        delivered_status = status,
        error = %err,
        "Dispatch failed after a channel had already delivered"
    );
    InquiryError::PartialDispatch {
        delivered,
        source: Box::new(err),
    }
}
