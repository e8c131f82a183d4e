use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use shared::{FilterSet, StrategyView};
use tracing::debug;

use super::route_with_slash;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes(router: Router<AppState>) -> Router<AppState> {
    let router = route_with_slash(router, "/strategies", get(list_strategies));
    route_with_slash(router, "/strategies/:id", get(retrieve_strategy))
}

/// List strategies, narrowed by classifier filters taken from the query string.
pub async fn list_strategies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<StrategyView>>, ApiError> {
    let filters = FilterSet::from_pairs(params);
    let strategies = state.catalog.filtered(&filters)?;
    debug!("{} of {} strategies pass {} filters", strategies.len(), state.catalog.len(), filters.len());

    Ok(Json(
        strategies
            .into_iter()
            .map(|s| StrategyView::new(s, &state.api_base_url))
            .collect(),
    ))
}

pub async fn retrieve_strategy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StrategyView>, ApiError> {
    let strategy = state.catalog.get(&id).ok_or(ApiError::NotFound)?;
    Ok(Json(StrategyView::new(strategy, &state.api_base_url)))
}
