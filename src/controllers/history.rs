use std::result::Result;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::Error;
use crate::grouping;
use crate::models::{EpisodeGroup, HistoryEntry, HistoryRemoved};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

pub(crate) async fn get(
    Query(params): Query<HistoryQuery>,
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<EpisodeGroup>>, Error> {
    let page = params.page.unwrap_or(DEFAULT_PAGE);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let entries: Vec<HistoryEntry> = trakt::users::history(&client, page, limit)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(grouping::history_groups(entries)))
}

pub(crate) async fn remove(
    Path(id): Path<u64>,
    State(client): State<trakt::Client>,
) -> Result<Json<HistoryRemoved>, Error> {
    let response = trakt::sync::remove_history(&client, id).await?;
    Ok(Json(response.into()))
}
