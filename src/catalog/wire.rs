//! Wire types for the Jikan-style v4 API. Only the fields the application
//! reads are deserialized; everything else in the payload is ignored.

use html_escape::decode_html_entities;
use serde::Deserialize;

use crate::domain::{Anime, Page};

/// Paginated list envelope: `{ "data": [...], "pagination": {...} }`.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<WireAnime>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub has_next_page: bool,
    pub current_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WireAnime {
    pub mal_id: i64,
    pub url: Option<String>,
    pub title: String,
    pub title_english: Option<String>,
    pub images: Option<WireImages>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub episodes: Option<i32>,
    pub score: Option<f64>,
    pub year: Option<i32>,
    pub synopsis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireImages {
    pub jpg: Option<WireImageSet>,
    pub webp: Option<WireImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct WireImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

impl WireAnime {
    pub fn into_domain(self) -> Anime {
        let cover_url = self.images.and_then(|images| {
            images
                .jpg
                .or(images.webp)
                .and_then(|set| set.large_image_url.or(set.image_url))
        });

        Anime {
            id: self.mal_id,
            title: decode_html_entities(&self.title).to_string(),
            title_english: self
                .title_english
                .map(|t| decode_html_entities(&t).to_string()),
            cover_url,
            kind: self.kind,
            episodes: self.episodes,
            score: self.score,
            year: self.year,
            synopsis: self
                .synopsis
                .map(|s| decode_html_entities(&s).to_string()),
            url: self.url,
        }
    }
}

impl ListEnvelope {
    /// Map the envelope into a domain [`Page`]. When the source omits the
    /// pagination block, `has_more` is derived from whether the returned
    /// count reached the requested limit.
    pub fn into_page(self, number: u32, limit: usize) -> Page {
        let has_more = match &self.pagination {
            Some(p) => p.has_next_page,
            None => self.data.len() >= limit,
        };

        let items = self.data.into_iter().map(WireAnime::into_domain).collect();
        Page::new(number, items, has_more)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_SAMPLE: &str = r#"{
        "pagination": { "last_visible_page": 42, "has_next_page": true, "current_page": 1 },
        "data": [
            {
                "mal_id": 5114,
                "url": "https://myanimelist.net/anime/5114",
                "title": "Hagane no Renkinjutsushi",
                "title_english": "Fullmetal Alchemist: Brotherhood",
                "images": { "jpg": { "image_url": "https://cdn.example/5114.jpg", "large_image_url": "https://cdn.example/5114l.jpg" } },
                "type": "TV",
                "episodes": 64,
                "score": 9.1,
                "year": 2009,
                "synopsis": "Two brothers &amp; the philosopher&#39;s stone."
            },
            {
                "mal_id": 9253,
                "title": "Steins;Gate",
                "images": null,
                "type": "TV",
                "episodes": 24,
                "score": 9.07
            }
        ]
    }"#;

    #[test]
    fn test_parse_list_envelope() {
        let envelope: ListEnvelope = serde_json::from_str(LIST_SAMPLE).unwrap();
        let page = envelope.into_page(1, 25);

        assert_eq!(page.number, 1);
        assert_eq!(page.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.items[0].id, 5114);
        assert_eq!(
            page.items[0].cover_url.as_deref(),
            Some("https://cdn.example/5114l.jpg")
        );
        assert_eq!(page.items[1].id, 9253);
        assert_eq!(page.items[1].cover_url, None);
    }

    #[test]
    fn test_html_entities_are_decoded() {
        let envelope: ListEnvelope = serde_json::from_str(LIST_SAMPLE).unwrap();
        let page = envelope.into_page(1, 25);
        assert_eq!(
            page.items[0].synopsis.as_deref(),
            Some("Two brothers & the philosopher's stone.")
        );
    }

    #[test]
    fn test_has_more_derived_from_limit_without_pagination() {
        let body = r#"{ "data": [] }"#;
        let envelope: ListEnvelope = serde_json::from_str(body).unwrap();
        let page = envelope.into_page(3, 25);
        assert!(!page.has_more);
        assert!(page.is_empty());
    }

    #[test]
    fn test_malformed_body_fails_to_parse() {
        let body = r#"{ "data": "not a list" }"#;
        assert!(serde_json::from_str::<ListEnvelope>(body).is_err());
    }
}
