use chrono::{DateTime, Duration, Utc};

use crate::model::{Match, MatchStatus};

/// Derive the visible list from the aggregated set.
///
/// An empty query shows only live and upcoming matches. A non-empty query shows the
/// live and upcoming matches that mention it, followed by the finished ones that
/// mention it and kicked off within `recent_finished_days` of `now`.
pub fn filter_matches<'a>(
    matches: &'a [Match],
    query: &str,
    now: DateTime<Utc>,
    recent_finished_days: i64,
) -> Vec<&'a Match> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return matches.iter().filter(|m| m.status.is_active()).collect();
    }

    let cutoff = now - Duration::days(recent_finished_days);
    let upcoming = matches
        .iter()
        .filter(|m| m.status.is_active() && m.mentions(&needle));
    let recent = matches.iter().filter(|m| {
        m.status == MatchStatus::Finished
            && m.utc_date.is_some_and(|kickoff| kickoff >= cutoff)
            && m.mentions(&needle)
    });

    upcoming.chain(recent).collect()
}

/// The 1-based `page` of `items`; out-of-range pages are short or empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Current page plus page size, with bounds-checked navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    size: usize,
}

impl Pager {
    pub fn new(size: usize) -> Self {
        Self {
            current: 1,
            size: size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Jump to `page` if it lies in `1..=total`; otherwise nothing changes.
    pub fn set(&mut self, page: usize, total: usize) -> bool {
        if (1..=total).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, total: usize) -> bool {
        if self.current < total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::sample::sample_matches;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 28, 12, 0, 0).unwrap()
    }

    fn with(status: MatchStatus, days_ago: i64, home: &str) -> Match {
        let mut m = sample_matches().remove(0);
        m.status = status;
        m.utc_date = Some(now() - Duration::days(days_ago));
        m.team1.name = home.to_string();
        m
    }

    #[test]
    fn test_empty_query_hides_terminal_matches() {
        let matches = vec![
            with(MatchStatus::Finished, 1, "Arsenal"),
            with(MatchStatus::Scheduled, 0, "Chelsea"),
            with(MatchStatus::Postponed, 0, "Everton"),
            with(MatchStatus::Other("AWARDED".into()), 0, "Fulham"),
        ];
        let visible = filter_matches(&matches, "", now(), 3);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].team1.name, "Chelsea");
    }

    #[test]
    fn test_search_includes_only_recent_finished_after_upcoming() {
        let matches = vec![
            with(MatchStatus::Finished, 2, "Leeds United"),
            with(MatchStatus::Finished, 4, "Leeds Rhinos"),
            with(MatchStatus::Live, 0, "Leeds Academy"),
            with(MatchStatus::Scheduled, 0, "Brentford"),
        ];
        let visible = filter_matches(&matches, "LEEDS", now(), 3);
        let names: Vec<&str> = visible.iter().map(|m| m.team1.name.as_str()).collect();
        assert_eq!(names, vec!["Leeds Academy", "Leeds United"]);
    }

    #[test]
    fn test_search_matches_away_team_and_league() {
        let matches = sample_matches();
        assert_eq!(filter_matches(&matches, "milan", now(), 3).len(), 1);
        assert_eq!(filter_matches(&matches, "premier", now(), 3).len(), 1);
        assert!(filter_matches(&matches, "bayern", now(), 3).is_empty());
    }

    #[test]
    fn test_paginate_and_total_pages() {
        let items: Vec<u32> = (0..45).collect();
        assert_eq!(total_pages(items.len(), 20), 3);
        assert_eq!(paginate(&items, 1, 20).len(), 20);
        assert_eq!(paginate(&items, 3, 20), &items[40..45]);
        assert!(paginate(&items, 4, 20).is_empty());
        assert!(paginate(&items, 0, 20).len() == 20);
        assert_eq!(total_pages(0, 20), 0);
    }

    #[test]
    fn test_pager_bounds() {
        let mut pager = Pager::new(20);
        assert!(!pager.set(4, 3));
        assert_eq!(pager.current(), 1);
        assert!(pager.set(3, 3));
        assert!(!pager.next(3));
        assert!(pager.prev());
        assert!(pager.prev());
        assert!(!pager.prev());
        assert_eq!(pager.current(), 1);
        assert!(!pager.set(0, 3));
    }
}
