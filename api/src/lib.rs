//! HTTP layer of the strategy arena: strategy listing and filtering, plus
//! creation and retrieval of tournaments, matches and Moran processes.

pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
