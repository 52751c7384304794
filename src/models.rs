use chrono::{DateTime, Utc};
use serde::Serialize;

use trakt::models as trakt;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Show {
    pub id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
}

impl From<trakt::Show> for Show {
    fn from(show: trakt::Show) -> Self {
        Self {
            id: show.ids.trakt,
            title: show.title,
            year: show.year,
            slug: show.ids.slug,
            tmdb_id: show.ids.tmdb,
            tvdb_id: show.ids.tvdb,
            imdb_id: show.ids.imdb,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub season: u32,
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Episode {
    /// Zero-padded `SxxEyy` code, e.g. `S01E04`.
    #[must_use]
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }
}

impl From<trakt::Episode> for Episode {
    fn from(episode: trakt::Episode) -> Self {
        Self {
            id: episode.ids.trakt,
            season: episode.season,
            number: episode.number,
            title: episode.title,
        }
    }
}

impl From<trakt::ProgressEpisode> for Episode {
    fn from(episode: trakt::ProgressEpisode) -> Self {
        Self {
            id: episode.ids.trakt,
            season: episode.season,
            number: episode.number,
            title: episode.title,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CalendarEntry {
    pub first_aired: DateTime<Utc>,
    pub episode: Episode,
    pub show: Show,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwatched_count: Option<u32>,
}

impl From<trakt::CalendarEntry> for CalendarEntry {
    fn from(entry: trakt::CalendarEntry) -> Self {
        Self {
            first_aired: entry.first_aired,
            episode: entry.episode.into(),
            show: entry.show.into(),
            unwatched_count: None,
        }
    }
}

/// A run of calendar entries of one show and season, displayed as a single
/// row. Entries are ordered ascending by episode number and, when produced
/// by the consecutive strategy, hold strictly consecutive numbers.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EpisodeGroup {
    pub show: Show,
    pub season: u32,
    pub entries: Vec<CalendarEntry>,
}

impl EpisodeGroup {
    #[must_use]
    pub fn first_aired(&self) -> DateTime<Utc> {
        self.entries
            .first()
            .map(|e| e.first_aired)
            .unwrap_or_default()
    }

    /// Range label for the group: `S02E05` for a single entry,
    /// `S02E05-7` for a run.
    #[must_use]
    pub fn episode_code(&self) -> String {
        let first = self.entries.first().map(|e| e.episode.number);
        let last = self.entries.last().map(|e| e.episode.number);
        match (first, last) {
            (Some(first), Some(last)) if first == last => {
                format!("S{:02}E{:02}", self.season, first)
            }
            (Some(first), Some(last)) => format!("S{:02}E{:02}-{last}", self.season, first),
            _ => format!("S{:02}", self.season),
        }
    }

    /// The episode title, only when the group holds exactly one entry.
    #[must_use]
    pub fn episode_title(&self) -> Option<&str> {
        match self.entries.as_slice() {
            [only] => only.episode.title.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.entries.len()
    }

    /// Aired-but-unwatched count carried by an up-next entry; plain calendar
    /// groups fall back to the number of entries.
    #[must_use]
    pub fn unwatched_count(&self) -> u32 {
        self.entries
            .first()
            .and_then(|e| e.unwatched_count)
            .unwrap_or(self.entries.len() as u32)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ShowProgress {
    pub aired: u32,
    pub completed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_watched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<NextEpisode>,
}

#[derive(Serialize, Clone, Debug)]
pub struct NextEpisode {
    pub episode: Episode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<DateTime<Utc>>,
}

impl From<trakt::ShowProgress> for ShowProgress {
    fn from(progress: trakt::ShowProgress) -> Self {
        Self {
            aired: progress.aired,
            completed: progress.completed,
            last_watched_at: progress.last_watched_at,
            next_episode: progress.next_episode.map(|next| NextEpisode {
                first_aired: next.first_aired,
                episode: next.into(),
            }),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct HistoryEntry {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    pub action: String,
    pub episode: Episode,
    pub show: Show,
}

impl From<trakt::HistoryEntry> for HistoryEntry {
    fn from(entry: trakt::HistoryEntry) -> Self {
        Self {
            id: entry.id,
            watched_at: entry.watched_at,
            action: entry.action,
            episode: entry.episode.into(),
            show: entry.show.into(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct SearchResult {
    pub score: Option<f64>,
    pub show: Show,
}

impl From<trakt::SearchResult> for SearchResult {
    fn from(result: trakt::SearchResult) -> Self {
        Self {
            score: result.score,
            show: result.show.into(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Season {
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aired_episodes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<DateTime<Utc>>,
}

impl From<trakt::Season> for Season {
    fn from(season: trakt::Season) -> Self {
        Self {
            number: season.number,
            episode_count: season.episode_count,
            aired_episodes: season.aired_episodes,
            title: season.title,
            overview: season.overview,
            first_aired: season.first_aired,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EpisodeDetail {
    pub episode: Episode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_aired: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl From<trakt::EpisodeDetail> for EpisodeDetail {
    fn from(detail: trakt::EpisodeDetail) -> Self {
        Self {
            episode: Episode {
                id: detail.ids.trakt,
                season: detail.season,
                number: detail.number,
                title: detail.title,
            },
            overview: detail.overview,
            first_aired: detail.first_aired,
            runtime: detail.runtime,
            rating: detail.rating,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct WatchlistItem {
    pub listed_at: DateTime<Utc>,
    pub show: Show,
}

impl From<trakt::WatchlistItem> for WatchlistItem {
    fn from(item: trakt::WatchlistItem) -> Self {
        Self {
            listed_at: item.listed_at,
            show: item.show.into(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct User {
    pub username: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vip: bool,
}

impl From<trakt::UserSettings> for User {
    fn from(settings: trakt::UserSettings) -> Self {
        let user = settings.user;
        Self {
            username: user.username,
            slug: user.ids.slug,
            name: user.name,
            vip: user.vip.unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct HistoryRemoved {
    pub deleted: u32,
    pub not_found: Vec<u64>,
}

impl From<trakt::HistoryRemoveResponse> for HistoryRemoved {
    fn from(response: trakt::HistoryRemoveResponse) -> Self {
        Self {
            deleted: response.deleted.episodes,
            not_found: response.not_found.ids,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct WatchlistChange {
    pub added: u32,
    pub deleted: u32,
    pub existing: u32,
}

impl From<trakt::SyncResponse> for WatchlistChange {
    fn from(response: trakt::SyncResponse) -> Self {
        let shows = |counts: Option<trakt::SyncCounts>| {
            counts.and_then(|c| c.shows).unwrap_or_default()
        };
        Self {
            added: shows(response.added),
            deleted: shows(response.deleted),
            existing: shows(response.existing),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn show() -> Show {
        Show {
            id: 1,
            title: "Test Show".into(),
            year: Some(2023),
            slug: None,
            tmdb_id: None,
            tvdb_id: None,
            imdb_id: None,
        }
    }

    fn entry(season: u32, number: u32, title: Option<&str>) -> CalendarEntry {
        CalendarEntry {
            first_aired: Utc.with_ymd_and_hms(2024, 1, 10, 2, 0, 0).unwrap(),
            episode: Episode {
                id: number,
                season,
                number,
                title: title.map(Into::into),
            },
            show: show(),
            unwatched_count: None,
        }
    }

    #[test]
    fn test_episode_code_is_zero_padded() {
        let episode = Episode {
            id: 9,
            season: 1,
            number: 4,
            title: None,
        };
        assert_eq!(episode.code(), "S01E04");
    }

    #[test]
    fn test_group_code_single_entry() {
        let group = EpisodeGroup {
            show: show(),
            season: 2,
            entries: vec![entry(2, 5, Some("Adapt or Die"))],
        };
        assert_eq!(group.episode_code(), "S02E05");
        assert_eq!(group.episode_title(), Some("Adapt or Die"));
        assert_eq!(group.episode_count(), 1);
    }

    #[test]
    fn test_group_code_for_run() {
        let group = EpisodeGroup {
            show: show(),
            season: 1,
            entries: vec![
                entry(1, 1, Some("One")),
                entry(1, 2, Some("Two")),
                entry(1, 3, Some("Three")),
            ],
        };
        assert_eq!(group.episode_code(), "S01E01-3");
        assert_eq!(group.episode_title(), None);
        assert_eq!(group.episode_count(), 3);
    }

    #[test]
    fn test_group_unwatched_count_falls_back_to_entry_count() {
        let plain = EpisodeGroup {
            show: show(),
            season: 1,
            entries: vec![entry(1, 1, None), entry(1, 2, None)],
        };
        assert_eq!(plain.unwatched_count(), 2);

        let mut resolved = entry(1, 3, None);
        resolved.unwatched_count = Some(7);
        let up_next = EpisodeGroup {
            show: show(),
            season: 1,
            entries: vec![resolved],
        };
        assert_eq!(up_next.unwatched_count(), 7);
    }
}
