use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Match, MatchStatus, TrackedMatch};
use crate::storage::BlobStore;

/// The user's pinned matches, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedSet {
    matches: Vec<TrackedMatch>,
}

impl TrackedSet {
    pub fn new(matches: Vec<TrackedMatch>) -> Self {
        Self { matches }
    }

    /// Load the persisted set. A missing, unreadable or corrupt blob yields an empty set.
    pub fn load(store: &dyn BlobStore, key: &str) -> Self {
        let body = match store.read(key) {
            Ok(Some(body)) => body,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!(error = %e, key, "could not read tracked matches");
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<TrackedMatch>>(&body) {
            Ok(matches) => {
                debug!(count = matches.len(), "loaded tracked matches");
                Self { matches }
            }
            Err(e) => {
                warn!(error = %e, key, "discarding corrupt tracked matches");
                Self::default()
            }
        }
    }

    /// Rewrite the whole set under `key`.
    pub fn save(&self, store: &dyn BlobStore, key: &str) -> Result<()> {
        let body = serde_json::to_string(&self.matches)?;
        store.write(key, &body)
    }

    pub fn as_slice(&self) -> &[TrackedMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.matches.iter().any(|m| m.id == id)
    }

    /// Append `item` unless a match with the same id is already tracked.
    pub fn add(&mut self, item: Match) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.matches.push(item);
        true
    }

    /// Remove the match at `index`; `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<TrackedMatch> {
        (index < self.matches.len()).then(|| self.matches.remove(index))
    }

    /// Refresh every tracked match from its latest aggregated counterpart.
    ///
    /// Score, time, minute and title always follow the feed. Status follows the
    /// feed too, except that it never becomes or leaves `FINISHED` this way.
    /// Returns how many tracked matches had a counterpart.
    pub fn reconcile(&mut self, latest: &[Match]) -> usize {
        let mut refreshed = 0;
        for tracked in &mut self.matches {
            let Some(current) = latest.iter().find(|m| m.id == tracked.id) else {
                continue;
            };
            if tracked.status != MatchStatus::Finished && current.status != MatchStatus::Finished {
                tracked.status = current.status.clone();
            }
            tracked.score = current.score.clone();
            tracked.time = current.time.clone();
            tracked.minute = current.minute;
            tracked.title = current.title.clone();
            refreshed += 1;
        }
        refreshed
    }
}
