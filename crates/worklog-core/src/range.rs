//! Day-range aggregation: bounded parallel per-day fetches, merge, filter,
//! sort, and debounced filter input.
//!
//! A range load fans out one GET per day through a counting semaphore, merges
//! whatever settled into a single working set, and is superseded wholesale by
//! the next load: starting a new one cancels the previous token, so a stale
//! load can never overwrite a newer one. One bad day never blanks the view;
//! its failure is logged and contributes an empty day.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use time::Date;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{format_iso_date, WorkEntry};

/// At most this many day-fetches are in flight at once.
pub const DAY_FETCH_CONCURRENCY: usize = 6;

pub const DEFAULT_WINDOW_DAYS: u16 = 30;

/// Idle interval a filter-text burst must pause for before filtering re-runs.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(350);

pub const ENTRIES_PATH: &str = "/api/v1/partes";

/// Path of the single-day query feeding the aggregator.
pub fn day_entries_path(date: Date) -> String {
    let iso = format_iso_date(date);
    format!("{ENTRIES_PATH}?fecha={}", urlencoding::encode(&iso))
}

/// Observable state of the current logical load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Completed,
    Cancelled,
    Failed,
}

/// Result of one `load_range` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// All day-tasks settled and merged, in chronological day order.
    Completed(Vec<WorkEntry>),
    /// Superseded by a newer load; partial results were discarded.
    Cancelled,
    /// The load could not start (date window arithmetic out of range).
    Failed,
}

pub struct RangeLoader {
    client: Arc<ApiClient>,
    semaphore: Arc<Semaphore>,
    state: Mutex<LoadState>,
    current: Mutex<Option<CancellationToken>>,
    generation: AtomicU64,
}

impl RangeLoader {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(DAY_FETCH_CONCURRENCY)),
            state: Mutex::new(LoadState::Idle),
            current: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock().expect("load state lock should not be poisoned")
    }

    fn set_state(&self, state: LoadState) {
        *self.state.lock().expect("load state lock should not be poisoned") = state;
    }

    /// Record the final state of a load unless a newer one already took over
    /// the state machine.
    fn finish_state(&self, generation: u64, state: LoadState) {
        let _guard = self
            .current
            .lock()
            .expect("current load lock should not be poisoned");
        if self.generation.load(Ordering::SeqCst) == generation {
            self.set_state(state);
        }
    }

    /// Cancel whatever load is in flight and install a fresh token for the
    /// next one.
    fn supersede(&self) -> (CancellationToken, u64) {
        let token = CancellationToken::new();
        let mut current = self
            .current
            .lock()
            .expect("current load lock should not be poisoned");
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        (token, generation)
    }

    /// Cancel the in-flight load, if any, without starting a new one.
    pub fn cancel(&self) {
        let current = self
            .current
            .lock()
            .expect("current load lock should not be poisoned");
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }

    /// Load the trailing window ending at `end_date` (inclusive), one bounded
    /// fetch per day. Supersedes and cancels any load already in flight.
    pub async fn load_range(&self, end_date: Date, window_days: u16) -> LoadOutcome {
        let (token, generation) = self.supersede();
        self.set_state(LoadState::Loading);

        let Some(days) = window_dates(end_date, window_days) else {
            self.finish_state(generation, LoadState::Failed);
            return LoadOutcome::Failed;
        };

        let mut tasks = JoinSet::new();
        for (index, date) in days.iter().copied().enumerate() {
            let client = Arc::clone(&self.client);
            let semaphore = Arc::clone(&self.semaphore);
            let token = token.clone();
            tasks.spawn(async move {
                (index, fetch_day(&client, &semaphore, date, &token).await)
            });
        }

        // The merge only proceeds after every day-task settled, whatever its
        // outcome; completion order is irrelevant because merging is by index.
        let mut per_day: Vec<Vec<WorkEntry>> = vec![Vec::new(); days.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, entries)) => per_day[index] = entries,
                Err(error) => warn!(%error, "day-fetch task did not complete"),
            }
        }

        if token.is_cancelled() {
            self.finish_state(generation, LoadState::Cancelled);
            return LoadOutcome::Cancelled;
        }

        self.finish_state(generation, LoadState::Completed);
        LoadOutcome::Completed(per_day.into_iter().flatten().collect())
    }
}

/// Chronological dates of the trailing window, oldest first; `None` when the
/// window falls outside the representable date range.
fn window_dates(end_date: Date, window_days: u16) -> Option<Vec<Date>> {
    let mut days = Vec::with_capacity(usize::from(window_days) + 1);
    for offset in (0..=i64::from(window_days)).rev() {
        days.push(end_date.checked_sub(time::Duration::days(offset))?);
    }
    Some(days)
}

/// One day's fetch: acquire an admission slot, GET the day, release the slot
/// regardless of outcome. Failures and cancellations contribute an empty day.
async fn fetch_day(
    client: &ApiClient,
    semaphore: &Semaphore,
    date: Date,
    token: &CancellationToken,
) -> Vec<WorkEntry> {
    let _permit = match semaphore.acquire().await {
        Ok(permit) => permit,
        Err(_) => return Vec::new(),
    };
    if token.is_cancelled() {
        return Vec::new();
    }

    let path = day_entries_path(date);
    let fetched = client.get::<Vec<WorkEntry>>(&path, token).await;

    // A cancellation observed after the network call must not contribute
    // partial state to the merge.
    if token.is_cancelled() {
        return Vec::new();
    }

    match fetched {
        Ok(Some(entries)) => entries,
        Ok(None) => Vec::new(),
        Err(ClientError::Cancelled) => Vec::new(),
        Err(error) => {
            warn!(date = %format_iso_date(date), %error, "day fetch failed; treating as empty");
            Vec::new()
        }
    }
}

/// Fields the free-text filter matches against.
fn filter_haystack(entry: &WorkEntry) -> [&Option<String>; 8] {
    [
        &entry.client,
        &entry.site,
        &entry.action,
        &entry.ticket,
        &entry.group,
        &entry.entry_type,
        &entry.technician,
        &entry.status,
    ]
}

/// Case-insensitive substring OR-match across the textual fields. An empty
/// query matches everything.
pub fn filter_entries(entries: &[WorkEntry], query: &str) -> Vec<WorkEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| {
            filter_haystack(entry).into_iter().any(|field| {
                field
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(&query))
            })
        })
        .cloned()
        .collect()
}

/// Order by date descending, then start time descending; stable, so records
/// tied on both keys keep their fetch order.
pub fn sort_entries(entries: &mut [WorkEntry]) {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.start_time.cmp(&a.start_time))
    });
}

/// Restartable idle timer gating filter re-runs.
///
/// Each call supersedes the previous one: the superseded caller resolves
/// `false` immediately, and only the call that waits out the full delay
/// resolves `true`. Filtering never re-triggers the network fetch.
pub struct FilterDebouncer {
    delay: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl Default for FilterDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDebouncer {
    pub fn new() -> Self {
        Self::with_delay(DEBOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            current: Mutex::new(None),
        }
    }

    /// Wait out the idle window. `true` means the window elapsed and the
    /// caller should apply its filter; `false` means a newer edit superseded
    /// this one.
    pub async fn debounce(&self) -> bool {
        let token = CancellationToken::new();
        {
            let mut current = self
                .current
                .lock()
                .expect("debounce lock should not be poisoned");
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
        }
        tokio::select! {
            _ = token.cancelled() => false,
            _ = tokio::time::sleep(self.delay) => true,
        }
    }
}
