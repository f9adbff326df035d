use serde::{Deserialize, Serialize};

/// A single catalog entry. Equality is by id only: the remote source may
/// return the same anime with slightly different summary fields across
/// pages, and two values with the same id refer to the same entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    pub id: i64,
    pub title: String,
    pub title_english: Option<String>,
    pub cover_url: Option<String>,
    /// Media kind as reported by the source: "TV", "Movie", "OVA", ...
    pub kind: Option<String>,
    pub episodes: Option<i32>,
    pub score: Option<f64>,
    pub year: Option<i32>,
    pub synopsis: Option<String>,
    pub url: Option<String>,
}

impl PartialEq for Anime {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Anime {}

impl Anime {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.title_english.as_deref().unwrap_or("(Untitled)")
        } else {
            &self.title
        }
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

    #[test]
    fn test_equality_is_by_id() {
        let a = anime(1, "Cowboy Bebop");
        let b = anime(1, "COWBOY BEBOP (remaster)");
        let c = anime(2, "Cowboy Bebop");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_title_prefers_main_title() {
        let mut a = anime(1, "Shingeki no Kyojin");
        a.title_english = Some("Attack on Titan".into());
        assert_eq!(a.display_title(), "Shingeki no Kyojin");
    }

    #[test]
    fn test_display_title_falls_back_to_english() {
        let mut a = anime(1, "");
        a.title_english = Some("Attack on Titan".into());
        assert_eq!(a.display_title(), "Attack on Titan");
    }

    #[test]
    fn test_display_title_untitled() {
        let a = anime(1, "");
        assert_eq!(a.display_title(), "(Untitled)");
    }
}
