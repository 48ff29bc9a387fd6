/// API Gateway response envelope
use http::{StatusCode, header};
use inquiry_core::{ChannelResult, InquiryError};
use lambda_http::{Body, Error, Response};

const ALLOW_ALL: &str = "*";

fn builder(status: StatusCode, content_type: &'static str) -> http::response::Builder {
    Response::builder()
        .status(status)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ALL)
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_ALL)
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_ALL)
        .header(header::CONTENT_TYPE, content_type)
}

/// Mirrors the email provider's status; the body is the result as JSON
pub fn success(result: &ChannelResult) -> Result<Response<Body>, Error> {
    let status =
        StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::to_string(result)?;

    Ok(builder(status, "application/json").body(Body::from(body))?)
}

/// Reports the error's text with the status it maps to
pub fn failure(err: &InquiryError) -> Result<Response<Body>, Error> {
    Ok(builder(err.status_code(), "application/json").body(Body::from(err.to_string()))?)
}

/// CORS preflight answer
pub fn preflight() -> Result<Response<Body>, Error> {
    Ok(builder(StatusCode::NO_CONTENT, "application/json").body(Body::Empty)?)
}
