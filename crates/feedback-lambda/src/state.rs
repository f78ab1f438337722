use std::sync::Arc;

use feedback_mail::dispatch::Dispatcher;
use feedback_render::render::FeedbackRenderer;

/// Shared application state, injected into the handler via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<FeedbackRenderer>,
    pub dispatcher: Dispatcher,
}
