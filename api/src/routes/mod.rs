pub mod contests;
pub mod health;
pub mod strategies;

use axum::routing::{get, MethodRouter};
use axum::Router;
use shared::ContestKind;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let router = Router::new().route("/health", get(health::health_check));
    let router = strategies::routes(router);

    [ContestKind::Tournament, ContestKind::Match, ContestKind::Moran]
        .into_iter()
        .fold(router, contests::routes)
}

/// Register `method_router` under `path` and `path/`.
pub(crate) fn route_with_slash(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}
