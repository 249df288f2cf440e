use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_http::validate_request::ValidateRequestHeaderLayer;

use jot_actor::StoreHandle;

use crate::config::BasicAuth;
use crate::handler;

/// Shared state for every handler: the one store handle plus the family
/// the value routes operate on.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: StoreHandle,
    pub family: String,
}

/// Build the axum router over `state`.
///
/// The write route is wrapped in basic auth when credentials are
/// configured; with `None` it is left open (the caller is expected to have
/// logged a warning).
pub fn build_router(state: AppState, auth: Option<&BasicAuth>) -> Router {
    let mut input = Router::new().route("/input/:value", post(handler::put_value));
    if let Some(auth) = auth {
        input = input.layer(ValidateRequestHeaderLayer::basic(
            &auth.username,
            &auth.password,
        ));
    }

    Router::new()
        .route("/health", get(handler::health))
        .route("/values", get(handler::list_values))
        .route("/value/:key", get(handler::get_value))
        .route("/latest_value", get(handler::latest_value))
        .merge(input)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
