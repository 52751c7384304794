use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ShowIds {
    pub trakt: u32,
    pub slug: Option<String>,
    pub tvdb: Option<u32>,
    pub imdb: Option<String>,
    pub tmdb: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Show {
    pub title: String,
    pub year: Option<u16>,
    pub ids: ShowIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeIds {
    pub trakt: u32,
    pub tvdb: Option<u32>,
    pub imdb: Option<String>,
    pub tmdb: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: EpisodeIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEntry {
    pub first_aired: DateTime<Utc>,
    pub episode: Episode,
    pub show: Show,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub episode: Episode,
    pub show: Show,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowProgress {
    pub aired: u32,
    pub completed: u32,
    pub last_watched_at: Option<DateTime<Utc>>,
    pub next_episode: Option<ProgressEpisode>,
    pub last_episode: Option<ProgressEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEpisode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: EpisodeIds,
    pub first_aired: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: Option<f64>,
    pub show: Show,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonIds {
    pub trakt: u32,
    pub tvdb: Option<u32>,
    pub tmdb: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Season {
    pub number: u32,
    pub ids: SeasonIds,
    pub episode_count: Option<u32>,
    pub aired_episodes: Option<u32>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub first_aired: Option<DateTime<Utc>>,
}

/// Episode of a season as returned by the season detail endpoint with
/// `extended=full`.
#[derive(Debug, Clone, Deserialize)]
pub struct EpisodeDetail {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: EpisodeIds,
    pub overview: Option<String>,
    pub first_aired: Option<DateTime<Utc>>,
    pub runtime: Option<u32>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistItem {
    pub rank: Option<u32>,
    pub listed_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub show: Show,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserIds {
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
    pub name: Option<String>,
    pub vip: Option<bool>,
    pub ids: UserIds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSettings {
    pub user: User,
}

// Request bodies for the sync endpoints.

#[derive(Debug, Clone, Serialize)]
pub struct SyncShows {
    pub shows: Vec<SyncShow>,
}

impl SyncShows {
    #[must_use]
    pub fn single(show_id: u32) -> Self {
        Self {
            shows: vec![SyncShow {
                ids: SyncShowIds { trakt: show_id },
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncShow {
    pub ids: SyncShowIds,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncShowIds {
    pub trakt: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryIds {
    pub ids: Vec<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SyncCounts {
    pub shows: Option<u32>,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
    pub movies: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    pub added: Option<SyncCounts>,
    pub deleted: Option<SyncCounts>,
    pub existing: Option<SyncCounts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRemoveResponse {
    pub deleted: HistoryDeletedCount,
    pub not_found: HistoryNotFound,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HistoryDeletedCount {
    pub movies: u32,
    pub episodes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryNotFound {
    pub ids: Vec<u64>,
}
