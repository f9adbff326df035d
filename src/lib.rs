//! # Mikan
//!
//! A terminal anime catalog browser backed by a remote paginated API and a
//! local favorites store.
//!
//! ## Architecture
//!
//! ```text
//! Catalog (HTTP) → Browser (pagination) → state stream → TUI/CLI
//!                                          Favorites (SQLite) ↗
//! ```
//!
//! - [`catalog`]: async client for the paginated catalog API
//! - [`browse`]: the pagination coordinator — debounced search, load-more,
//!   retry, stale-response discarding
//! - [`favorites`]: SQLite-backed favorites with live-updating streams
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick start
//!
//! ```bash
//! # Browse the top list in the TUI
//! mikan
//!
//! # One page of top anime on stdout
//! mikan top
//!
//! # Search the catalog
//! mikan search "cowboy bebop"
//!
//! # List favorites
//! mikan fav list
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires together the catalog client, the
/// favorites store, and configuration.
pub mod app;

/// The pagination coordinator.
///
/// [`Browser`](browse::Browser) owns a browsing session: it decides when to
/// fetch page 1 (debounced on query changes), when to fetch the next page,
/// how failures surface, and publishes every transition as an immutable
/// [`BrowseState`](browse::BrowseState) snapshot on a watch channel.
pub mod browse;

/// Remote catalog access.
///
/// - [`CatalogClient`](catalog::CatalogClient): async trait over the API
/// - [`HttpCatalog`](catalog::HttpCatalog): reqwest-based implementation
/// - [`wire`](catalog::wire): deserialization of the API envelope
pub mod catalog;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/mikan/config.toml`: catalog endpoint and page
/// size, search debounce, first page index.
pub mod config;

/// Core domain models: [`Anime`](domain::Anime) and [`Page`](domain::Page).
pub mod domain;

/// Favorites persistence.
///
/// - [`FavoritesStore`](favorites::FavoritesStore): storage trait
/// - [`SqliteFavorites`](favorites::SqliteFavorites): SQLite implementation
/// - [`Favorites`](favorites::Favorites): live-updating view over a store
pub mod favorites;

/// Terminal user interface.
///
/// Search bar, results/favorites panes, detail view. Scrolling near the end
/// of the results emits a load-more intent; typing in the search bar feeds
/// the coordinator's debounce.
pub mod tui;
