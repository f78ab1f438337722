use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use feedback_lambda::config::Config;
use feedback_lambda::state::AppState;
use feedback_mail::dispatch::Dispatcher;
use feedback_mail::resend::ResendClient;
use feedback_render::render::FeedbackRenderer;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(config = ?config, "starting feedback relay");

    let provider = ResendClient::new(
        &config.resend_api_key,
        &config.resend_api_base,
        config.resend_timeout,
    )?;
    let dispatcher = Dispatcher::new(
        Arc::new(provider),
        config.sender.clone(),
        config.recipient.clone(),
    );

    let state = AppState {
        renderer: Arc::new(FeedbackRenderer::new()?),
        dispatcher,
    };

    let app = feedback_lambda::router(state, config.max_body_bytes);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
