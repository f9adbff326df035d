use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{MikanError, Result};
use crate::domain::Anime;
use crate::favorites::FavoritesStore;

pub struct SqliteFavorites {
    conn: Mutex<Connection>,
}

impl SqliteFavorites {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| MikanError::Storage(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            MikanError::Storage(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn row_to_anime(row: &Row) -> rusqlite::Result<Anime> {
        Ok(Anime {
            id: row.get(0)?,
            title: row.get(1)?,
            title_english: row.get(2)?,
            cover_url: row.get(3)?,
            kind: row.get(4)?,
            episodes: row.get(5)?,
            score: row.get(6)?,
            year: row.get(7)?,
            synopsis: row.get(8)?,
            url: row.get(9)?,
        })
    }
}

impl FavoritesStore for SqliteFavorites {
    fn add(&self, anime: &Anime) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT OR IGNORE INTO favorites
                 (id, title, title_english, cover_url, kind, episodes, score, year, synopsis, url, favorited_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                anime.id,
                anime.title,
                anime.title_english,
                anime.cover_url,
                anime.kind,
                anime.episodes,
                anime.score,
                anime.year,
                anime.synopsis,
                anime.url,
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(())
    }

    fn remove(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM favorites WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    fn contains(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_all(&self) -> Result<Vec<Anime>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, title_english, cover_url, kind, episodes, score, year, synopsis, url
             FROM favorites ORDER BY favorited_at DESC, id DESC",
        )?;

        let favorites = stmt
            .query_map([], Self::row_to_anime)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime(id: i64, title: &str) -> Anime {
        Anime {
            id,
            title: title.into(),
            title_english: Some(format!("{title} (en)")),
            cover_url: Some("https://cdn.example/cover.jpg".into()),
            kind: Some("TV".into()),
            episodes: Some(26),
            score: Some(8.75),
            year: Some(1998),
            synopsis: Some("Space bounty hunters.".into()),
            url: None,
        }
    }

    #[test]
    fn test_add_and_contains() {
        let store = SqliteFavorites::in_memory().unwrap();
        store.add(&anime(1, "Cowboy Bebop")).unwrap();

        assert!(store.contains(1).unwrap());
        assert!(!store.contains(2).unwrap());
    }

    #[test]
    fn test_add_is_idempotent() {
        let store = SqliteFavorites::in_memory().unwrap();
        store.add(&anime(1, "Cowboy Bebop")).unwrap();
        store.add(&anime(1, "Cowboy Bebop")).unwrap();

        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_reports_presence() {
        let store = SqliteFavorites::in_memory().unwrap();
        store.add(&anime(1, "Cowboy Bebop")).unwrap();

        assert!(store.remove(1).unwrap());
        assert!(!store.remove(1).unwrap());
        assert!(!store.contains(1).unwrap());
    }

    #[test]
    fn test_round_trips_all_fields() {
        let store = SqliteFavorites::in_memory().unwrap();
        let original = anime(1, "Cowboy Bebop");
        store.add(&original).unwrap();

        let stored = &store.list_all().unwrap()[0];
        assert_eq!(stored.title, "Cowboy Bebop");
        assert_eq!(stored.title_english.as_deref(), Some("Cowboy Bebop (en)"));
        assert_eq!(stored.episodes, Some(26));
        assert_eq!(stored.score, Some(8.75));
        assert_eq!(stored.synopsis.as_deref(), Some("Space bounty hunters."));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.db");

        {
            let store = SqliteFavorites::new(&path).unwrap();
            store.add(&anime(1, "Cowboy Bebop")).unwrap();
        }

        let store = SqliteFavorites::new(&path).unwrap();
        assert!(store.contains(1).unwrap());
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
