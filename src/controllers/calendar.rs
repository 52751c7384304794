use std::result::Result;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::errors::Error;
use crate::models::{CalendarEntry, EpisodeGroup};
use crate::state::UpNextCache;
use crate::upnext::{self, TraktProgressSource};

const UP_NEXT_WINDOW_DAYS: u32 = 365;
const UPCOMING_WINDOW_DAYS: u32 = 30;
const DEFAULT_WINDOW_DAYS: u32 = 33;

const UP_NEXT_CACHE_KEY: &str = "up-next";

/// Next aired-but-unwatched episode per actively tracked show, merged into
/// consecutive runs. The trailing-year window implicitly drops shows the
/// user stopped tracking.
pub(crate) async fn up_next(
    State(client): State<trakt::Client>,
    State(cache): State<UpNextCache>,
) -> Result<Json<Vec<EpisodeGroup>>, Error> {
    if let Some(groups) = cache.get(&UP_NEXT_CACHE_KEY) {
        return Ok(Json(groups.to_vec()));
    }

    let now = Utc::now();
    let start = (now - Duration::days(i64::from(UP_NEXT_WINDOW_DAYS))).date_naive();
    let window: Vec<CalendarEntry> =
        trakt::calendar::my_shows(&client, start, UP_NEXT_WINDOW_DAYS)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    let source = TraktProgressSource::new(client);
    let groups = upnext::up_next_groups(&source, now, &window).await;
    cache.insert_with_default_timeout(UP_NEXT_CACHE_KEY, groups.clone());
    Ok(Json(groups))
}

pub(crate) async fn upcoming(
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<EpisodeGroup>>, Error> {
    let now = Utc::now();
    let entries = trakt::calendar::my_shows(&client, now.date_naive(), UPCOMING_WINDOW_DAYS)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(upnext::upcoming_groups(entries, now)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarQuery {
    days: Option<u32>,
}

pub(crate) async fn window(
    Query(params): Query<CalendarQuery>,
    State(client): State<trakt::Client>,
) -> Result<Json<Vec<CalendarEntry>>, Error> {
    let days = params.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    let entries = trakt::calendar::my_shows(&client, Utc::now().date_naive(), days).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
