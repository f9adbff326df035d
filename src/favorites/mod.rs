pub mod sqlite;

use std::sync::Arc;

use tokio::sync::watch;

use crate::app::Result;
use crate::domain::Anime;

pub use sqlite::SqliteFavorites;

/// Durable favorites storage, keyed by anime id.
pub trait FavoritesStore {
    fn add(&self, anime: &Anime) -> Result<()>;
    fn remove(&self, id: i64) -> Result<bool>;
    fn contains(&self, id: i64) -> Result<bool>;
    /// All favorites, most recently favorited first.
    fn list_all(&self) -> Result<Vec<Anime>>;
}

/// Live view over a [`FavoritesStore`]. Every mutation publishes a fresh
/// list snapshot, so open subscriptions observe changes without re-querying.
/// Independent of pagination: browse state is never touched from here.
pub struct Favorites<S> {
    store: Arc<S>,
    tx: watch::Sender<Vec<Anime>>,
}

impl<S: FavoritesStore> Favorites<S> {
    pub fn new(store: Arc<S>) -> Result<Self> {
        let list = store.list_all()?;
        let (tx, _) = watch::channel(list);
        Ok(Self { store, tx })
    }

    pub fn add(&self, anime: &Anime) -> Result<()> {
        self.store.add(anime)?;
        tracing::debug!(id = anime.id, "favorite added");
        self.publish()
    }

    pub fn remove(&self, id: i64) -> Result<bool> {
        let removed = self.store.remove(id)?;
        if removed {
            tracing::debug!(id, "favorite removed");
            self.publish()?;
        }
        Ok(removed)
    }

    /// Add if absent, remove if present. Returns whether the anime is a
    /// favorite afterwards.
    pub fn toggle(&self, anime: &Anime) -> Result<bool> {
        if self.contains(anime.id) {
            self.remove(anime.id)?;
            Ok(false)
        } else {
            self.add(anime)?;
            Ok(true)
        }
    }

    /// Answered from the current snapshot, no store round trip.
    pub fn contains(&self, id: i64) -> bool {
        self.tx.borrow().iter().any(|a| a.id == id)
    }

    pub fn list(&self) -> Vec<Anime> {
        self.tx.borrow().clone()
    }

    /// Live stream of the full favorites list.
    pub fn watch_all(&self) -> watch::Receiver<Vec<Anime>> {
        self.tx.subscribe()
    }

    /// Live boolean stream for a single id.
    pub fn watch_one(&self, id: i64) -> FavoriteWatch {
        FavoriteWatch {
            id,
            rx: self.tx.subscribe(),
        }
    }

    fn publish(&self) -> Result<()> {
        let list = self.store.list_all()?;
        self.tx.send_replace(list);
        Ok(())
    }
}

/// Observes whether one anime is favorited, derived from the list stream.
pub struct FavoriteWatch {
    id: i64,
    rx: watch::Receiver<Vec<Anime>>,
}

impl FavoriteWatch {
    pub fn get(&self) -> bool {
        self.rx.borrow().iter().any(|a| a.id == self.id)
    }

    /// Wait for the next mutation and return the then-current answer.
    /// `None` once the owning [`Favorites`] is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime(id: i64, title: &str) -> Anime {
        Anime {
            id,
            title: title.into(),
            title_english: None,
            cover_url: None,
            kind: None,
            episodes: None,
            score: None,
            year: None,
            synopsis: None,
            url: None,
        }
    }

    fn favorites() -> Favorites<SqliteFavorites> {
        Favorites::new(Arc::new(SqliteFavorites::in_memory().unwrap())).unwrap()
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let favorites = favorites();
        let bebop = anime(1, "Cowboy Bebop");

        assert!(favorites.toggle(&bebop).unwrap());
        assert!(favorites.contains(1));
        assert!(!favorites.toggle(&bebop).unwrap());
        assert!(!favorites.contains(1));
    }

    #[tokio::test]
    async fn test_mutations_are_visible_to_open_subscriptions() {
        let favorites = favorites();
        let mut all = favorites.watch_all();
        let mut one = favorites.watch_one(2);

        assert!(all.borrow().is_empty());
        assert!(!one.get());

        favorites.add(&anime(2, "Mushishi")).unwrap();

        all.changed().await.unwrap();
        assert_eq!(all.borrow().len(), 1);
        assert_eq!(one.changed().await, Some(true));

        favorites.remove(2).unwrap();
        assert_eq!(one.changed().await, Some(false));
    }

    #[tokio::test]
    async fn test_remove_missing_does_not_publish() {
        let favorites = favorites();
        let all = favorites.watch_all();

        assert!(!favorites.remove(99).unwrap());
        assert!(!all.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let favorites = favorites();
        favorites.add(&anime(1, "first")).unwrap();
        favorites.add(&anime(2, "second")).unwrap();

        let list = favorites.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 2);
        assert_eq!(list[1].id, 1);
    }
}
