pub mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;

use crate::catalog::{CatalogClient, CatalogError};
use crate::domain::Page;

pub use state::BrowseState;

/// Browsing settings, loaded from the `[browse]` config section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Quiet period after the last query change before a search is issued.
    pub debounce_ms: u64,
    /// Page number of the first page, as the remote source counts them.
    pub first_page: u32,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            first_page: 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Initial,
    More,
}

struct Inner {
    state: BrowseState,
    /// Whether the source indicated more pages exist. False until the first
    /// page arrives, so `load_more` before `start` is a no-op.
    has_more: bool,
}

/// Coordinates paginated fetching for one browsing session.
///
/// Intents (`start`, `load_more`, `retry`) never block: fetches run as
/// spawned tasks and deliver their results through the state stream.
/// Every `start` bumps a generation counter; a fetch completion whose
/// generation has been superseded is discarded without touching state.
pub struct Browser<C> {
    client: Arc<C>,
    debounce: Duration,
    first_page: u32,
    inner: Arc<Mutex<Inner>>,
    tx: watch::Sender<BrowseState>,
    generation: Arc<AtomicU64>,
}

impl<C> Clone for Browser<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            debounce: self.debounce,
            first_page: self.first_page,
            inner: self.inner.clone(),
            tx: self.tx.clone(),
            generation: self.generation.clone(),
        }
    }
}

impl<C: CatalogClient + Send + Sync + 'static> Browser<C> {
    pub fn new(client: Arc<C>, config: &BrowseConfig) -> Self {
        let (tx, _) = watch::channel(BrowseState::idle(config.first_page));
        Self {
            client,
            debounce: Duration::from_millis(config.debounce_ms),
            first_page: config.first_page,
            inner: Arc::new(Mutex::new(Inner {
                state: BrowseState::idle(config.first_page),
                has_more: false,
            })),
            tx,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The state stream. At least one snapshot is observable immediately
    /// after `start`.
    pub fn subscribe(&self) -> watch::Receiver<BrowseState> {
        self.tx.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> BrowseState {
        self.lock().state.clone()
    }

    /// (Re)initialize the session for `query` (empty = top-list mode) and
    /// schedule a debounced fetch of the first page. A newer `start`
    /// cancels the pending debounce and invalidates any in-flight fetch.
    pub fn start(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut inner = self.lock();
            inner.state = BrowseState::initial(query.clone(), self.first_page);
            inner.has_more = true;
            self.tx.send_replace(inner.state.clone());
        }

        tracing::debug!(%query, generation, "browse session started");
        self.spawn_fetch(generation, Phase::Initial, self.first_page, query, Some(self.debounce));
    }

    /// Fetch the next page. No-op while any fetch is outstanding, after the
    /// source reported no more pages, or while the initial load is failed
    /// (`retry` is the way out of that state).
    pub fn load_more(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        let (page, query) = {
            let mut inner = self.lock();
            if inner.state.is_loading() || !inner.has_more {
                return;
            }
            if inner.state.initial_load_error.is_some() {
                return;
            }
            inner.state.is_loading_more = true;
            inner.state.load_more_error = None;
            self.tx.send_replace(inner.state.clone());
            (inner.state.current_page, inner.state.query.clone())
        };

        tracing::debug!(page, "loading more");
        self.spawn_fetch(generation, Phase::More, page, query, None);
    }

    /// Re-issue the most recently failed fetch. The failed page was never
    /// advanced past, so this requests the same page again. No debounce:
    /// the query did not change.
    pub fn retry(&self) {
        let generation = self.generation.load(Ordering::SeqCst);
        let (phase, page, query) = {
            let mut inner = self.lock();
            let phase = if inner.state.initial_load_error.is_some() {
                inner.state.initial_load_error = None;
                inner.state.is_initial_loading = true;
                Phase::Initial
            } else if inner.state.load_more_error.is_some() {
                inner.state.load_more_error = None;
                inner.state.is_loading_more = true;
                Phase::More
            } else {
                return;
            };
            self.tx.send_replace(inner.state.clone());
            (phase, inner.state.current_page, inner.state.query.clone())
        };

        tracing::debug!(page, ?phase, "retrying failed fetch");
        self.spawn_fetch(generation, phase, page, query, None);
    }

    fn spawn_fetch(
        &self,
        generation: u64,
        phase: Phase,
        page: u32,
        query: String,
        debounce: Option<Duration>,
    ) {
        let browser = self.clone();
        tokio::spawn(async move {
            if let Some(wait) = debounce {
                tokio::time::sleep(wait).await;
                if browser.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!(%query, "query superseded during debounce");
                    return;
                }
            }

            let result = if query.is_empty() {
                browser.client.top(page).await
            } else {
                browser.client.search(page, &query).await
            };

            browser.apply(generation, phase, page, result);
        });
    }

    fn apply(&self, generation: u64, phase: Phase, page: u32, result: Result<Page, CatalogError>) {
        let mut inner = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(page, "discarding stale fetch result");
            return;
        }

        match result {
            Ok(fetched) => {
                inner.has_more = !fetched.is_empty() && fetched.has_more;
                tracing::debug!(
                    page,
                    count = fetched.len(),
                    has_more = inner.has_more,
                    "page fetched"
                );
                let state = &mut inner.state;
                state.items.extend(fetched.items);
                state.current_page = page + 1;
                match phase {
                    Phase::Initial => {
                        state.is_initial_loading = false;
                        state.initial_load_error = None;
                    }
                    Phase::More => {
                        state.is_loading_more = false;
                        state.load_more_error = None;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(page, %err, "catalog fetch failed");
                let state = &mut inner.state;
                match phase {
                    Phase::Initial => {
                        state.is_initial_loading = false;
                        state.initial_load_error = Some(err);
                    }
                    Phase::More => {
                        state.is_loading_more = false;
                        state.load_more_error = Some(err);
                    }
                }
            }
        }

        self.tx.send_replace(inner.state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a fetch task panicked mid-update.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
