use std::result::Result;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::Error;
use crate::models::{
    EpisodeDetail, SearchResult, Season, ShowProgress, User, WatchlistChange, WatchlistItem,
};

const SEARCH_LIMIT: u32 = 15;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    query: String,
}

pub(crate) async fn search(
    Query(params): Query<SearchQuery>,
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<SearchResult>>, Error> {
    let results = trakt::search::shows(&client, &params.query, SEARCH_LIMIT).await?;
    Ok(Json(results.into_iter().map(Into::into).collect()))
}

pub(crate) async fn progress(
    Path(id): Path<u32>,
    State(client): State<trakt::Client>,
) -> Result<Json<ShowProgress>, Error> {
    let progress = trakt::shows::progress(&client, id).await?;
    Ok(Json(progress.into()))
}

pub(crate) async fn seasons(
    Path(id): Path<u32>,
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<Season>>, Error> {
    let seasons = trakt::shows::seasons(&client, id).await?;
    Ok(Json(seasons.into_iter().map(Into::into).collect()))
}

pub(crate) async fn season_episodes(
    Path((id, season)): Path<(u32, u32)>,
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<EpisodeDetail>>, Error> {
    let episodes = trakt::shows::season_episodes(&client, id, season).await?;
    Ok(Json(episodes.into_iter().map(Into::into).collect()))
}

pub(crate) async fn watchlist(
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<WatchlistItem>>, Error> {
    let items = trakt::sync::watchlist(&client).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub(crate) async fn add_to_watchlist(
    Path(id): Path<u32>,
    State(client): State<trakt::Client>,
) -> Result<Json<WatchlistChange>, Error> {
    let response = trakt::sync::add_to_watchlist(&client, id).await?;
    Ok(Json(response.into()))
}

pub(crate) async fn remove_from_watchlist(
    Path(id): Path<u32>,
    State(client): State<trakt::Client>,
) -> Result<Json<WatchlistChange>, Error> {
    let response = trakt::sync::remove_from_watchlist(&client, id).await?;
    Ok(Json(response.into()))
}

pub(crate) async fn user(State(client): State<trakt::Client>) -> Result<Json<User>, Error> {
    let settings = trakt::users::settings(&client).await?;
    Ok(Json(settings.into()))
}
