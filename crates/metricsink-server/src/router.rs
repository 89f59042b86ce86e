//! Axum router wiring.
//!
//! Wrong methods on known paths and unknown paths both answer 404 with a
//! plain-text body. HEAD is routed to the 404 fallback explicitly because axum
//! otherwise serves it with the GET handler.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{app_state::AppState, handlers, recovery};

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/health-check",
            get(handlers::health_check)
                .head(recovery::not_found)
                .fallback(recovery::not_found),
        )
        .route(
            "/metrics",
            post(handlers::ingest_metric).fallback(recovery::not_found),
        )
        .route(
            "/report",
            get(handlers::fetch_report)
                .head(recovery::not_found)
                .fallback(recovery::not_found),
        )
        .fallback(recovery::not_found);

    with_recovery(routes).with_state(state)
}

/// Panic guard plus request tracing around every route.
pub fn with_recovery<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(recovery::panic_response))
        .layer(TraceLayer::new_for_http())
}
