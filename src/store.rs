use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::aggregator::Aggregator;
use crate::client::FixtureSource;
use crate::config::{Config, TRACKED_MATCHES_KEY};
use crate::model::{Match, MatchList, TrackedMatch};
use crate::query::{self, Pager};
use crate::sample::sample_matches;
use crate::scheduler::LiveUpdates;
use crate::storage::BlobStore;
use crate::tracked::TrackedSet;

#[derive(Debug)]
struct State {
    matches: MatchList,
    tracked: TrackedSet,
    loading: bool,
    error: Option<String>,
    search_query: String,
    pager: Pager,
}

/// Everything the presentation layer reads, copied out at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub matches: MatchList,
    pub tracked_matches: Vec<TrackedMatch>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub current_page: usize,
    pub page_size: usize,
    pub filtered_matches: MatchList,
    pub paginated_matches: MatchList,
    pub total_pages: usize,
    pub tracked_count: usize,
}

/// The match store: aggregated fixtures, the tracked subset, search and paging state.
///
/// All accessors take `&self`; share it behind an [`Arc`] to run live updates.
pub struct MatchesStore<S> {
    aggregator: Aggregator<S>,
    blobs: Box<dyn BlobStore>,
    recent_finished_days: i64,
    state: Mutex<State>,
    /// Serializes aggregation cycles.
    cycle: tokio::sync::Mutex<()>,
    live: Mutex<Option<LiveUpdates>>,
}

impl<S: FixtureSource> MatchesStore<S> {
    /// Load the persisted tracked set and seed the sample matches.
    pub fn new(source: S, blobs: impl BlobStore + 'static, config: &Config) -> Self {
        let tracked = TrackedSet::load(&blobs, TRACKED_MATCHES_KEY);
        info!(tracked = tracked.len(), "match store ready");
        Self {
            aggregator: Aggregator::from_config(source, config),
            blobs: Box::new(blobs),
            recent_finished_days: config.recent_finished_days,
            state: Mutex::new(State {
                matches: sample_matches(),
                tracked,
                loading: false,
                error: None,
                search_query: String::new(),
                pager: Pager::new(config.page_size),
            }),
            cycle: tokio::sync::Mutex::new(()),
            live: Mutex::new(None),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn matches(&self) -> MatchList {
        self.state().matches.clone()
    }

    pub fn tracked_matches(&self) -> Vec<TrackedMatch> {
        self.state().tracked.as_slice().to_vec()
    }

    pub fn loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn search_query(&self) -> String {
        self.state().search_query.clone()
    }

    pub fn current_page(&self) -> usize {
        self.state().pager.current()
    }

    pub fn page_size(&self) -> usize {
        self.state().pager.size()
    }

    pub fn tracked_count(&self) -> usize {
        self.state().tracked.len()
    }

    pub fn filtered_matches(&self) -> MatchList {
        self.filtered_matches_at(Utc::now())
    }

    pub fn filtered_matches_at(&self, now: DateTime<Utc>) -> MatchList {
        let state = self.state();
        let filtered = self.filter(&state, now).into_iter().cloned().collect();
        filtered
    }

    pub fn paginated_matches(&self) -> MatchList {
        self.paginated_matches_at(Utc::now())
    }

    pub fn paginated_matches_at(&self, now: DateTime<Utc>) -> MatchList {
        let state = self.state();
        let filtered = self.filter(&state, now);
        let page = query::paginate(&filtered, state.pager.current(), state.pager.size())
            .iter()
            .map(|m| (*m).clone())
            .collect();
        page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages_at(Utc::now())
    }

    pub fn total_pages_at(&self, now: DateTime<Utc>) -> usize {
        let state = self.state();
        let count = self.filter(&state, now).len();
        query::total_pages(count, state.pager.size())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> StoreSnapshot {
        let state = self.state();
        let filtered: MatchList = self.filter(&state, now).into_iter().cloned().collect();
        let paginated =
            query::paginate(&filtered, state.pager.current(), state.pager.size()).to_vec();
        StoreSnapshot {
            matches: state.matches.clone(),
            tracked_matches: state.tracked.as_slice().to_vec(),
            loading: state.loading,
            error: state.error.clone(),
            search_query: state.search_query.clone(),
            current_page: state.pager.current(),
            page_size: state.pager.size(),
            total_pages: query::total_pages(filtered.len(), state.pager.size()),
            tracked_count: state.tracked.len(),
            filtered_matches: filtered,
            paginated_matches: paginated,
        }
    }

    fn filter<'a>(&self, state: &'a State, now: DateTime<Utc>) -> Vec<&'a Match> {
        query::filter_matches(
            &state.matches,
            &state.search_query,
            now,
            self.recent_finished_days,
        )
    }

    /// Replace the aggregated set with a fresh fetch of every competition.
    ///
    /// If every feed fails the set falls back to the sample matches and `error`
    /// holds the reason. `loading` is true only while the cycle runs.
    #[instrument(skip(self))]
    pub async fn fetch_matches(&self) {
        let _cycle = self.cycle.lock().await;
        {
            let mut state = self.state();
            state.loading = true;
            state.error = None;
        }
        let _loading = LoadingGuard(&self.state);

        let outcome = self.aggregator.fetch_matches(Utc::now()).await;

        let mut state = self.state();
        match outcome {
            Ok(matches) => {
                info!(count = matches.len(), "matches refreshed");
                state.matches = matches;
            }
            Err(e) => {
                error!(error = %e, "failed to fetch matches, using sample data");
                state.error = Some(e.to_string());
                state.matches = sample_matches();
            }
        }
    }

    /// Update the search text and go back to the first page.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let mut state = self.state();
        state.search_query = query.into();
        state.pager.reset();
    }

    /// Jump to `page` if it exists; otherwise nothing changes.
    pub fn set_current_page(&self, page: usize) -> bool {
        let mut state = self.state();
        let total = query::total_pages(self.filter(&state, Utc::now()).len(), state.pager.size());
        state.pager.set(page, total)
    }

    pub fn next_page(&self) -> bool {
        let mut state = self.state();
        let total = query::total_pages(self.filter(&state, Utc::now()).len(), state.pager.size());
        state.pager.next(total)
    }

    pub fn prev_page(&self) -> bool {
        self.state().pager.prev()
    }

    /// Pin `item` unless a match with the same id is already tracked.
    pub fn add_tracked_match(&self, item: Match) -> bool {
        let mut state = self.state();
        let added = state.tracked.add(item);
        if added {
            self.persist(&state.tracked);
        }
        added
    }

    /// Unpin the match at `index` in the tracked ordering.
    pub fn remove_tracked_match(&self, index: usize) -> Option<TrackedMatch> {
        let mut state = self.state();
        let removed = state.tracked.remove(index);
        match removed {
            Some(_) => self.persist(&state.tracked),
            None => warn!(index, len = state.tracked.len(), "tracked index out of range"),
        }
        removed
    }

    /// Refresh the tracked set from the current aggregated matches.
    pub fn update_tracked_matches(&self) {
        let mut state = self.state();
        let State {
            matches, tracked, ..
        } = &mut *state;
        let refreshed = tracked.reconcile(matches);
        info!(refreshed, tracked = tracked.len(), "tracked matches reconciled");
        self.persist(tracked);
    }

    /// One aggregation cycle followed by reconciliation.
    pub async fn refresh(&self) {
        self.fetch_matches().await;
        self.update_tracked_matches();
    }

    fn persist(&self, tracked: &TrackedSet) {
        if let Err(e) = tracked.save(self.blobs.as_ref(), TRACKED_MATCHES_KEY) {
            error!(error = %e, "failed to persist tracked matches");
        }
    }

    pub fn is_live_updating(&self) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|live| !live.is_finished())
    }

    /// Stop the live-update timer if it is running.
    pub fn stop_live_updates(&self) {
        let live = self.live.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(live) = live {
            info!("stopping live updates");
            drop(live.stop());
        }
    }
}

impl<S: FixtureSource + 'static> MatchesStore<S> {
    /// Run [`MatchesStore::refresh`] every `period`. No-op if already running.
    ///
    /// The task only holds a weak reference: dropping the last `Arc` to the
    /// store stops it.
    pub fn start_live_updates(self: &Arc<Self>, period: Duration) {
        let mut live = self.live.lock().unwrap_or_else(PoisonError::into_inner);
        if live.as_ref().is_some_and(|l| !l.is_finished()) {
            return;
        }
        let store = Arc::downgrade(self);
        *live = Some(LiveUpdates::start(period, move || {
            let store = store.upgrade();
            async move {
                if let Some(store) = store {
                    store.refresh().await;
                }
            }
        }));
    }
}

/// Clears `loading` on every exit from a cycle, including cancellation.
struct LoadingGuard<'a>(&'a Mutex<State>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).loading = false;
    }
}
