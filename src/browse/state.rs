use crate::catalog::CatalogError;
use crate::domain::Anime;

/// Immutable snapshot of a browsing session, published on every transition.
///
/// Invariants: at most one of the two loading flags is set; an error is
/// never set while the same phase is loading; `items` is only cleared when
/// the query changes. Items accumulate in page order and are not
/// deduplicated across pages, mirroring the source's ordering.
#[derive(Debug, Clone)]
pub struct BrowseState {
    pub items: Vec<Anime>,
    /// The next page index to request.
    pub current_page: u32,
    /// True only while the very first page for the current query is outstanding.
    pub is_initial_loading: bool,
    /// True while a page beyond the first is outstanding.
    pub is_loading_more: bool,
    /// Set when the first page failed and no items are held.
    pub initial_load_error: Option<CatalogError>,
    /// Set when a subsequent page failed; prior items are retained.
    pub load_more_error: Option<CatalogError>,
    /// The active search string. Empty means top-list mode.
    pub query: String,
}

impl BrowseState {
    /// State before any `start` call.
    pub fn idle(first_page: u32) -> Self {
        Self {
            items: Vec::new(),
            current_page: first_page,
            is_initial_loading: false,
            is_loading_more: false,
            initial_load_error: None,
            load_more_error: None,
            query: String::new(),
        }
    }

    /// Fresh state for a (re)started query, first page outstanding.
    pub fn initial(query: String, first_page: u32) -> Self {
        Self {
            is_initial_loading: true,
            query,
            ..Self::idle(first_page)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_initial_loading || self.is_loading_more
    }

    pub fn error(&self) -> Option<&CatalogError> {
        self.initial_load_error
            .as_ref()
            .or(self.load_more_error.as_ref())
    }
}
