use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing,
};
use axum_valid::Garde;
use http::StatusCode;
use pressroom_dal::author::{AuthorRepository, CreateAuthor, UpdateAuthor};
use tracing::debug;

use crate::{
    error::ApiResult,
    rest_api::{Page, Paging},
    state::AppState,
};

crate::repository_from_request!(AuthorRepository);

pub async fn create(
    repository: AuthorRepository,
    Garde(Json(payload)): Garde<Json<CreateAuthor>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get(
    Path(id): Path<i64>,
    repository: AuthorRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn list(
    repository: AuthorRepository,
    State(state): State<AppState>,
    Query(paging): Query<Paging>,
) -> ApiResult<impl IntoResponse> {
    let (page, limit) = paging.normalize(state.config());
    let batch = repository
        .list(paging.into_listing_params(state.config()))
        .await?;

    Ok((StatusCode::OK, Json(Page::from_batch(batch, page, limit))))
}

pub async fn update(
    Path(id): Path<i64>,
    repository: AuthorRepository,
    Garde(Json(payload)): Garde<Json<UpdateAuthor>>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(id, payload).await?;
    debug!("Updated author {id}");

    Ok((StatusCode::OK, Json(record)))
}

pub async fn delete(
    Path(id): Path<i64>,
    repository: AuthorRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(id).await?;
    debug!("Deleted author {id}");

    Ok((StatusCode::NO_CONTENT, ()))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", routing::post(create).get(list))
        .route(
            "/{id}",
            routing::get(get).patch(update).delete(self::delete),
        )
}
