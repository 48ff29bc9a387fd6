/// Inquiry Lambda - API Gateway shell around the inquiry dispatcher
///
/// Decodes the submission, bounds the dispatch by the invocation deadline
/// and maps the outcome onto a CORS-enabled response envelope.
pub mod context;
pub mod response;

pub use context::AppContext;

use http::Method;
use inquiry_core::InquiryRecord;
use inquiry_core::constants::DEADLINE_SAFETY_MARGIN_MS;
use lambda_http::{Body, Error as LambdaError, Request, RequestExt, Response};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, Span, error, info, info_span, warn};

/// Main Lambda handler
pub async fn handler(ctx: Arc<AppContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    let lambda_ctx = event.lambda_context_ref();
    let request_id = lambda_ctx.map(|c| c.request_id.as_str()).unwrap_or("local");
    let budget = lambda_ctx
        .and_then(|c| remaining_budget(c.deadline, chrono::Utc::now().timestamp_millis()));

    info!(
        request_id = %request_id,
        method = %event.method(),
        path = %event.uri().path(),
        "Processing inquiry request"
    );

    if event.method() == Method::OPTIONS {
        return response::preflight();
    }

    let body: &[u8] = event.body();
    let record = match InquiryRecord::from_json(body) {
        Ok(record) => record,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Rejected inquiry payload");
            return response::failure(&err);
        }
    };

    match ctx
        .dispatcher
        .dispatch_within(&record, budget)
        .instrument(request_span(request_id))
        .await
    {
        Ok(outcome) => {
            info!(
                request_id = %request_id,
                status = outcome.email.status_code,
                "Inquiry dispatched"
            );
            response::success(&outcome.email)
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                channel = ?err.channel(),
                error = %inquiry_core::utils::redact_email(&err.to_string()),
                "Inquiry dispatch failed"
            );
            response::failure(&err)
        }
    }
}

/// Parent span for the dispatch and channel spans of one invocation
fn request_span(request_id: &str) -> Span {
    info_span!("inquiry", request_id = %request_id)
}

/// Time left before the invocation deadline, minus the response margin
///
/// A zero deadline means the runtime did not provide one.
fn remaining_budget(deadline_ms: u64, now_ms: i64) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }
    let remaining = (deadline_ms as i64)
        .saturating_sub(now_ms)
        .saturating_sub(DEADLINE_SAFETY_MARGIN_MS as i64);
    Some(Duration::from_millis(remaining.max(0) as u64))
}
