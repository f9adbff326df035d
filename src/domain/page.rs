use crate::domain::Anime;

/// One batch of catalog results for a given page index and query.
#[derive(Debug, Clone)]
pub struct Page {
    /// The page index this batch was fetched for.
    pub number: u32,
    pub items: Vec<Anime>,
    /// Whether the source believes more pages exist after this one.
    pub has_more: bool,
}

impl Page {
    pub fn new(number: u32, items: Vec<Anime>, has_more: bool) -> Self {
        Self {
            number,
            items,
            has_more,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
