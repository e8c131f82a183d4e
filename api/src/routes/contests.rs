//! Tournament, match and Moran process endpoints. All three share one set of
//! handlers parameterized by [`ContestKind`].

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use shared::{ContestKind, ContestView, DefinitionPayload};

use super::route_with_slash;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes(router: Router<AppState>, kind: ContestKind) -> Router<AppState> {
    let collection = format!("/{}", kind.path());
    let member = format!("{}/:id", collection);

    let router = route_with_slash(
        router,
        &collection,
        get(move |State(state): State<AppState>| list(state, kind)).post(
            move |State(state): State<AppState>, payload: Result<Json<DefinitionPayload>, JsonRejection>| {
                create(state, kind, payload)
            },
        ),
    );
    route_with_slash(
        router,
        &member,
        get(move |State(state): State<AppState>, Path(id): Path<String>| retrieve(state, kind, id)).delete(
            move |State(state): State<AppState>, Path(id): Path<String>| destroy(state, kind, id),
        ),
    )
}

/// Ids that are not numeric can never match a stored contest.
fn parse_id(id: &str) -> Result<u64, ApiError> {
    id.parse().map_err(|_| ApiError::NotFound)
}

async fn list(state: AppState, kind: ContestKind) -> Result<Json<Vec<ContestView>>, ApiError> {
    let contests = state.contest_service().list(kind).await?;
    Ok(Json(contests))
}

async fn create(
    state: AppState,
    kind: ContestKind,
    payload: Result<Json<DefinitionPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ContestView>), ApiError> {
    let Json(payload) = payload?;
    let contest = state.contest_service().create(kind, payload).await?;
    Ok((StatusCode::CREATED, Json(contest)))
}

async fn retrieve(state: AppState, kind: ContestKind, id: String) -> Result<Json<ContestView>, ApiError> {
    let contest = state.contest_service().retrieve(kind, parse_id(&id)?).await?;
    Ok(Json(contest))
}

async fn destroy(state: AppState, kind: ContestKind, id: String) -> Result<Json<&'static str>, ApiError> {
    state.contest_service().destroy(kind, parse_id(&id)?).await?;
    Ok(Json("Deleted"))
}
