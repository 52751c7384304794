use axum::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use itertools::Itertools;
use tracing::debug;

use crate::grouping;
use crate::models::{CalendarEntry, EpisodeGroup, Show, ShowProgress};

/// Capability to look up the watched progress of a single show. Lookups may
/// fail independently; the resolver treats a failure as "no result".
#[async_trait]
pub trait ProgressSource: Send + Sync {
    async fn progress(&self, show_id: u32) -> anyhow::Result<ShowProgress>;
}

#[derive(Debug, Clone)]
pub struct TraktProgressSource {
    client: trakt::Client,
}

impl TraktProgressSource {
    #[must_use]
    pub fn new(client: trakt::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgressSource for TraktProgressSource {
    async fn progress(&self, show_id: u32) -> anyhow::Result<ShowProgress> {
        let progress = trakt::shows::progress(&self.client, show_id).await?;
        Ok(progress.into())
    }
}

/// Distinct shows of a calendar window, in order of first appearance.
/// A show surfacing anywhere in the window marks it as actively tracked.
#[must_use]
pub fn active_shows(entries: &[CalendarEntry]) -> Vec<Show> {
    entries
        .iter()
        .map(|entry| entry.show.clone())
        .unique_by(|show| show.id)
        .collect()
}

/// Resolve the next aired-but-unwatched episode for every show, one
/// concurrent progress lookup per show. Shows whose lookup fails or that
/// have nothing qualifying contribute no entry; specials are dropped. The
/// result is ordered ascending by air time and holds at most one entry per
/// show.
pub async fn resolve(
    source: &impl ProgressSource,
    now: DateTime<Utc>,
    shows: Vec<Show>,
) -> Vec<CalendarEntry> {
    let lookups = shows
        .into_iter()
        .map(|show| up_next_for_show(source, now, show));
    let mut entries: Vec<CalendarEntry> = join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .filter(|entry| entry.episode.season > 0)
        .collect();
    entries.sort_by_key(|entry| entry.first_aired);
    entries
}

async fn up_next_for_show(
    source: &impl ProgressSource,
    now: DateTime<Utc>,
    show: Show,
) -> Option<CalendarEntry> {
    let progress = match source.progress(show.id).await {
        Ok(progress) => progress,
        Err(err) => {
            // A show we can't get progress for is simply skipped.
            debug!("skipping show {}: {err}", show.id);
            return None;
        }
    };

    let next = progress.next_episode?;
    let first_aired = next.first_aired?;
    if first_aired >= now {
        return None;
    }

    Some(CalendarEntry {
        first_aired,
        episode: next.episode,
        show,
        unwatched_count: Some(progress.aired.saturating_sub(progress.completed)),
    })
}

/// Up-next rows for a calendar window: derive the active shows, resolve
/// their next episodes and merge consecutive runs.
pub async fn up_next_groups(
    source: &impl ProgressSource,
    now: DateTime<Utc>,
    window: &[CalendarEntry],
) -> Vec<EpisodeGroup> {
    let entries = resolve(source, now, active_shows(window)).await;
    grouping::consecutive_groups(entries)
}

/// Not-yet-aired rows for a calendar window, one group per episode.
#[must_use]
pub fn upcoming_groups(entries: Vec<CalendarEntry>, now: DateTime<Utc>) -> Vec<EpisodeGroup> {
    let upcoming = entries
        .into_iter()
        .filter(|entry| entry.first_aired >= now)
        .collect();
    grouping::individual_groups(upcoming)
}
