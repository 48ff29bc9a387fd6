use inquiry_lambda::AppContext;
use lambda_http::{Error, Request, run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    info!(
        version = inquiry_core::VERSION,
        "Starting inquiry relay Lambda function"
    );

    // Configuration is read once per cold start
    let ctx = AppContext::new()?;
    info!(policy = ?ctx.dispatcher.policy(), "Dispatcher ready");

    run(service_fn(|event: Request| {
        let ctx = ctx.clone();
        async move { inquiry_lambda::handler(ctx, event).await }
    }))
    .await
}
