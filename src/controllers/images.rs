use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::posters::{PosterService, DEFAULT_POSTER_SIZE};

#[derive(Debug, Deserialize)]
pub(crate) struct PosterQuery {
    size: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PosterResponse {
    pub url: Option<Url>,
}

/// Poster URL for a show by its metadata-service id. Lookup failures come
/// back as an empty body, never an error.
pub(crate) async fn poster(
    Path(tmdb_id): Path<u32>,
    Query(params): Query<PosterQuery>,
    State(posters): State<PosterService>,
) -> Json<PosterResponse> {
    let size = params.size.as_deref().unwrap_or(DEFAULT_POSTER_SIZE);
    Json(PosterResponse {
        url: posters.poster_url(tmdb_id, size).await,
    })
}
