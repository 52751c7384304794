use crate::models::{CalendarEntry, EpisodeGroup, HistoryEntry};

/// One singleton group per entry, ordered ascending by air time.
#[must_use]
pub fn individual_groups(mut entries: Vec<CalendarEntry>) -> Vec<EpisodeGroup> {
    entries.sort_by_key(|entry| entry.first_aired);
    entries
        .into_iter()
        .map(|entry| EpisodeGroup {
            show: entry.show.clone(),
            season: entry.episode.season,
            entries: vec![entry],
        })
        .collect()
}

/// Merge adjacent episode numbers of the same show and season into runs.
///
/// Entries are first ordered by show title, season and episode number, then
/// scanned once; a run is extended only by the directly following episode
/// number of the same show id and season. Groups come back ordered by the
/// air time of their first entry.
#[must_use]
pub fn consecutive_groups(mut entries: Vec<CalendarEntry>) -> Vec<EpisodeGroup> {
    // Title, not id, is the primary sort key; run membership still checks
    // the show id, so identically named shows never merge.
    entries.sort_by(|a, b| {
        a.show
            .title
            .cmp(&b.show.title)
            .then_with(|| a.episode.season.cmp(&b.episode.season))
            .then_with(|| a.episode.number.cmp(&b.episode.number))
    });

    let mut groups = Vec::new();
    let mut run: Vec<CalendarEntry> = Vec::new();
    for entry in entries {
        if let Some(last) = run.last() {
            let same_show = last.show.id == entry.show.id;
            let same_season = last.episode.season == entry.episode.season;
            let consecutive = entry.episode.number == last.episode.number + 1;
            if !(same_show && same_season && consecutive) {
                groups.push(close_run(std::mem::take(&mut run)));
            }
        }
        run.push(entry);
    }
    if !run.is_empty() {
        groups.push(close_run(run));
    }

    groups.sort_by_key(EpisodeGroup::first_aired);
    groups
}

fn close_run(entries: Vec<CalendarEntry>) -> EpisodeGroup {
    let last = entries.last().expect("runs are never empty");
    let show = last.show.clone();
    let season = last.episode.season;
    EpisodeGroup {
        show,
        season,
        entries,
    }
}

/// One group per watch event, using the watch time as the group timestamp.
/// History is never merged into runs.
#[must_use]
pub fn history_groups(entries: Vec<HistoryEntry>) -> Vec<EpisodeGroup> {
    let entries = entries
        .into_iter()
        .map(|entry| CalendarEntry {
            first_aired: entry.watched_at,
            episode: entry.episode,
            show: entry.show,
            unwatched_count: None,
        })
        .collect();
    individual_groups(entries)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::models::{Episode, Show};

    use super::*;

    fn show(id: u32, title: &str) -> Show {
        Show {
            id,
            title: title.into(),
            year: None,
            slug: None,
            tmdb_id: None,
            tvdb_id: None,
            imdb_id: None,
        }
    }

    fn aired(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 2, 0, 0).unwrap()
    }

    fn entry(show: &Show, season: u32, number: u32, first_aired: DateTime<Utc>) -> CalendarEntry {
        CalendarEntry {
            first_aired,
            episode: Episode {
                id: show.id * 1000 + season * 100 + number,
                season,
                number,
                title: None,
            },
            show: show.clone(),
            unwatched_count: None,
        }
    }

    #[test]
    fn test_individual_groups_sorted_by_air_time() {
        let a = show(1, "Show A");
        let b = show(2, "Show B");
        let entries = vec![
            entry(&a, 1, 1, aired(10)),
            entry(&b, 3, 7, aired(5)),
        ];

        let groups = individual_groups(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].show.id, 2);
        assert_eq!(groups[1].show.id, 1);
        assert!(groups.iter().all(|g| g.entries.len() == 1));
    }

    #[test]
    fn test_individual_groups_one_per_entry_regardless_of_order() {
        let a = show(1, "Show A");
        let forward = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 2, aired(2)),
            entry(&a, 1, 3, aired(3)),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(individual_groups(forward.clone()).len(), forward.len());
        assert_eq!(individual_groups(reversed).len(), forward.len());
    }

    #[test]
    fn test_consecutive_run_collapses_into_one_group() {
        let a = show(1, "Show A");
        let entries = vec![
            entry(&a, 1, 2, aired(2)),
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 3, aired(3)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.episode_code(), "S01E01-3");
        assert_eq!(group.episode_count(), 3);
        let numbers: Vec<u32> = group.entries.iter().map(|e| e.episode.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_gap_in_numbers_splits_groups() {
        let a = show(1, "Show A");
        let entries = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 2, aired(2)),
            entry(&a, 1, 4, aired(4)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].episode_code(), "S01E01-2");
        assert_eq!(groups[1].episode_code(), "S01E04");
    }

    #[test]
    fn test_season_boundary_splits_groups() {
        let a = show(1, "Show A");
        let entries = vec![
            entry(&a, 1, 8, aired(1)),
            entry(&a, 2, 1, aired(2)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].season, 1);
        assert_eq!(groups[1].season, 2);
    }

    #[test]
    fn test_same_numbers_of_different_shows_never_merge() {
        let a = show(1, "Show A");
        let b = show(2, "Show B");
        let entries = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&b, 1, 2, aired(2)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_groups_ordered_by_first_aired_not_processing_order() {
        // "Zebra" sorts after "Aardvark" during the scan, but airs first.
        let early = show(1, "Zebra");
        let late = show(2, "Aardvark");
        let entries = vec![
            entry(&late, 1, 1, aired(20)),
            entry(&early, 1, 1, aired(5)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups[0].show.title, "Zebra");
        assert_eq!(groups[1].show.title, "Aardvark");
    }

    #[test]
    fn test_consecutive_grouping_is_deterministic_across_input_orders() {
        let a = show(1, "Show A");
        let b = show(2, "Show B");
        let entries = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 2, aired(2)),
            entry(&a, 2, 1, aired(9)),
            entry(&b, 1, 5, aired(3)),
            entry(&b, 1, 6, aired(4)),
        ];
        let mut shuffled = entries.clone();
        shuffled.rotate_left(2);
        shuffled.swap(0, 3);

        assert_eq!(consecutive_groups(entries), consecutive_groups(shuffled));
    }

    #[test]
    fn test_consecutive_grouping_keeps_every_entry() {
        let a = show(1, "Show A");
        let b = show(2, "Show B");
        let entries = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 2, aired(2)),
            entry(&a, 1, 4, aired(4)),
            entry(&b, 1, 1, aired(3)),
        ];

        let groups = consecutive_groups(entries.clone());

        let mut grouped: Vec<u32> = groups
            .iter()
            .flat_map(|g| g.entries.iter().map(|e| e.episode.id))
            .collect();
        let mut input: Vec<u32> = entries.iter().map(|e| e.episode.id).collect();
        grouped.sort_unstable();
        input.sort_unstable();
        assert_eq!(grouped, input);
    }

    #[test]
    fn test_non_monotonic_air_dates_are_accepted_in_a_run() {
        // Episode 2 aired after episode 3; the run trusts episode numbers.
        let a = show(1, "Show A");
        let entries = vec![
            entry(&a, 1, 1, aired(1)),
            entry(&a, 1, 2, aired(8)),
            entry(&a, 1, 3, aired(3)),
        ];

        let groups = consecutive_groups(entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].episode_code(), "S01E01-3");
    }

    #[test]
    fn test_single_entry_becomes_singleton_group() {
        let a = show(1, "Show A");
        let groups = consecutive_groups(vec![entry(&a, 4, 2, aired(1))]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].episode_code(), "S04E02");
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(individual_groups(Vec::new()).is_empty());
        assert!(consecutive_groups(Vec::new()).is_empty());
    }

    #[test]
    fn test_history_groups_keep_repeated_watches_separate() {
        let a = show(1, "Show A");
        let watch = |id: u64, day: u32| HistoryEntry {
            id,
            watched_at: aired(day),
            action: "watch".into(),
            episode: Episode {
                id: 42,
                season: 1,
                number: 1,
                title: None,
            },
            show: a.clone(),
        };

        let groups = history_groups(vec![watch(1, 2), watch(2, 5)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].first_aired(), aired(2));
        assert_eq!(groups[1].first_aired(), aired(5));
    }
}
