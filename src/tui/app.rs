use ratatui::widgets::ListState;

use crate::browse::BrowseState;
use crate::domain::Anime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Results,
    Favorites,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Results => ActivePane::Favorites,
            ActivePane::Favorites => ActivePane::Results,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub const PAGE_JUMP: usize = 10;

/// How close to the end of the loaded results the cursor may get before a
/// load-more request is emitted.
pub const LOAD_MORE_THRESHOLD: usize = 5;

pub struct TuiApp {
    pub browse: BrowseState,
    pub favorites: Vec<Anime>,
    pub active_pane: ActivePane,
    pub input_mode: InputMode,
    pub search_input: String,
    pub result_index: usize,
    pub favorite_index: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub list_state: ListState,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            browse: BrowseState::idle(1),
            favorites: Vec::new(),
            active_pane: ActivePane::Results,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            result_index: 0,
            favorite_index: 0,
            should_quit: false,
            status_message: None,
            list_state,
        }
    }

    /// Items of the pane currently shown.
    pub fn visible_items(&self) -> &[Anime] {
        match self.active_pane {
            ActivePane::Results => &self.browse.items,
            ActivePane::Favorites => &self.favorites,
        }
    }

    pub fn selected_index(&self) -> usize {
        match self.active_pane {
            ActivePane::Results => self.result_index,
            ActivePane::Favorites => self.favorite_index,
        }
    }

    pub fn selected(&self) -> Option<&Anime> {
        self.visible_items().get(self.selected_index())
    }

    pub fn move_up(&mut self) {
        self.move_to(self.selected_index().saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.move_to(self.selected_index() + 1);
    }

    pub fn next_page(&mut self) {
        self.move_to(self.selected_index() + PAGE_JUMP);
    }

    pub fn prev_page(&mut self) {
        self.move_to(self.selected_index().saturating_sub(PAGE_JUMP));
    }

    fn move_to(&mut self, index: usize) {
        let max = self.visible_items().len().saturating_sub(1);
        let index = index.min(max);
        match self.active_pane {
            ActivePane::Results => self.result_index = index,
            ActivePane::Favorites => self.favorite_index = index,
        }
        self.list_state.select(Some(index));
    }

    pub fn next_pane(&mut self) {
        self.active_pane = self.active_pane.next();
        self.list_state.select(Some(self.selected_index()));
    }

    /// Whether the cursor is near the end of the loaded results. The view
    /// layer owns this threshold; the coordinator only receives the intent.
    pub fn near_end(&self) -> bool {
        self.active_pane == ActivePane::Results
            && !self.browse.items.is_empty()
            && self.result_index + LOAD_MORE_THRESHOLD >= self.browse.items.len()
    }

    pub fn set_browse(&mut self, state: BrowseState) {
        self.browse = state;
        if self.result_index >= self.browse.items.len() {
            self.result_index = self.browse.items.len().saturating_sub(1);
        }
        if self.active_pane == ActivePane::Results {
            self.list_state.select(Some(self.result_index));
        }
    }

    pub fn set_favorites(&mut self, favorites: Vec<Anime>) {
        self.favorites = favorites;
        if self.favorite_index >= self.favorites.len() {
            self.favorite_index = self.favorites.len().saturating_sub(1);
        }
        if self.active_pane == ActivePane::Favorites {
            self.list_state.select(Some(self.favorite_index));
        }
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.favorites.iter().any(|a| a.id == id)
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime(id: i64) -> Anime {
        Anime {
            id,
            title: format!("anime-{id}"),
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

    fn app_with_results(count: usize) -> TuiApp {
        let mut app = TuiApp::new();
        let mut state = BrowseState::idle(1);
        state.items = (0..count).map(|i| anime(i as i64)).collect();
        app.set_browse(state);
        app
    }

    #[test]
    fn test_move_down_clamps_at_end() {
        let mut app = app_with_results(3);
        app.move_down();
        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.result_index, 2);
    }

    #[test]
    fn test_move_up_clamps_at_start() {
        let mut app = app_with_results(3);
        app.move_up();
        assert_eq!(app.result_index, 0);
    }

    #[test]
    fn test_page_jump() {
        let mut app = app_with_results(25);
        app.next_page();
        assert_eq!(app.result_index, 10);
        app.prev_page();
        assert_eq!(app.result_index, 0);
    }

    #[test]
    fn test_near_end_threshold() {
        let mut app = app_with_results(20);
        assert!(!app.near_end());

        app.result_index = 14;
        assert!(!app.near_end());

        app.result_index = 15;
        assert!(app.near_end());
    }

    #[test]
    fn test_near_end_false_for_favorites_pane() {
        let mut app = app_with_results(3);
        app.result_index = 2;
        assert!(app.near_end());

        app.next_pane();
        assert!(!app.near_end());
    }

    #[test]
    fn test_selection_clamped_when_results_shrink() {
        let mut app = app_with_results(20);
        app.result_index = 19;

        let mut state = BrowseState::idle(1);
        state.items = (0..5).map(|i| anime(i as i64)).collect();
        app.set_browse(state);

        assert_eq!(app.result_index, 4);
    }
}
