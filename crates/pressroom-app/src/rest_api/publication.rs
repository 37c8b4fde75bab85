use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing,
};
use axum_valid::Garde;
use http::StatusCode;
use pressroom_dal::publication::{CreatePublication, EditorialStatus, PublicationRepository};
use serde::Deserialize;
use tracing::debug;

use crate::{
    authors_client::{AuthorLookup, AuthorsClient},
    error::{ApiError, ApiResult},
    rest_api::Paging,
    state::AppState,
};

crate::repository_from_request!(PublicationRepository);

#[derive(Debug, Deserialize)]
pub struct ChangeStatus {
    pub status: EditorialStatus,
}

/// Creation validates the referenced author against the authors service before
/// anything is written locally. The remote lookup and the insert are not
/// covered by any transaction - the insert is the only durable action.
pub async fn create(
    repository: PublicationRepository,
    authors: AuthorsClient,
    Garde(Json(payload)): Garde<Json<CreatePublication>>,
) -> ApiResult<impl IntoResponse> {
    match authors.get_author(payload.author_id).await? {
        AuthorLookup::Found(author) => {
            debug!("Validated author {} ({})", author.id, author.email);
        }
        AuthorLookup::NotFound => return Err(ApiError::MissingAuthor(payload.author_id)),
    }

    let record = repository.create(payload).await?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get(
    Path(id): Path<i64>,
    repository: PublicationRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;

    Ok((StatusCode::OK, Json(record)))
}

// Flat array, no paging metadata - original publications wire contract.
pub async fn list(
    repository: PublicationRepository,
    State(state): State<AppState>,
    Query(paging): Query<Paging>,
) -> ApiResult<impl IntoResponse> {
    let records = repository
        .list(paging.into_listing_params(state.config()))
        .await?;

    Ok((StatusCode::OK, Json(records)))
}

pub async fn change_status(
    Path(id): Path<i64>,
    repository: PublicationRepository,
    Json(payload): Json<ChangeStatus>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.change_status(id, payload.status).await?;
    debug!("Publication {id} status changed to {}", record.status);

    Ok((StatusCode::OK, Json(record)))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", routing::post(create).get(list))
        .route("/{id}", routing::get(get))
        .route("/{id}/status", routing::patch(change_status))
}
