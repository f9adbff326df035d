use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{MikanError, Result};
use crate::browse::Browser;
use crate::catalog::HttpCatalog;
use crate::config::Config;
use crate::favorites::{Favorites, SqliteFavorites};

pub struct AppContext {
    pub catalog: Arc<HttpCatalog>,
    pub favorites: Favorites<SqliteFavorites>,
    pub config: Config,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let catalog = Arc::new(HttpCatalog::with_config(&config.catalog)?);
        let favorites = Favorites::new(Arc::new(SqliteFavorites::new(&db_path)?))?;

        Ok(Self {
            catalog,
            favorites,
            config,
        })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let catalog = Arc::new(HttpCatalog::with_config(&config.catalog)?);
        let favorites = Favorites::new(Arc::new(SqliteFavorites::in_memory()?))?;

        Ok(Self {
            catalog,
            favorites,
            config,
        })
    }

    /// A fresh browsing session against the configured catalog.
    pub fn browser(&self) -> Browser<HttpCatalog> {
        Browser::new(self.catalog.clone(), &self.config.browse)
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MikanError::Config("Could not find data directory".into()))?;
        let mikan_dir = data_dir.join("mikan");
        std::fs::create_dir_all(&mikan_dir)?;
        Ok(mikan_dir.join("mikan.db"))
    }
}
