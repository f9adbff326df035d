pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::browse::Browser;
use crate::catalog::HttpCatalog;

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let browser = ctx.browser();
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    let mut state_rx = browser.subscribe();
    let mut favorites_rx = ctx.favorites.watch_all();
    tui_app.set_favorites(favorites_rx.borrow().clone());

    // Top-list mode until the user searches.
    browser.start("");

    loop {
        if state_rx.has_changed().unwrap_or(false) {
            let state = state_rx.borrow_and_update().clone();
            tui_app.set_browse(state);
        }
        if favorites_rx.has_changed().unwrap_or(false) {
            let favorites = favorites_rx.borrow_and_update().clone();
            tui_app.set_favorites(favorites);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match tui_app.input_mode {
                InputMode::Search => handle_search_key(&mut tui_app, &browser, key),
                InputMode::Normal => handle_action(&mut tui_app, &ctx, &browser, key.into()),
            },
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// In search mode every printable key edits the query; the coordinator
/// debounces the resulting burst of `start` calls.
fn handle_search_key(tui_app: &mut TuiApp, browser: &Browser<HttpCatalog>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            tui_app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            tui_app.search_input.pop();
            browser.start(tui_app.search_input.clone());
        }
        KeyCode::Char(c) => {
            tui_app.search_input.push(c);
            browser.start(tui_app.search_input.clone());
        }
        _ => {}
    }
}

fn handle_action(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    browser: &Browser<HttpCatalog>,
    action: Action,
) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down();
            if tui_app.near_end() {
                browser.load_more();
            }
        }
        Action::NextPage => {
            tui_app.next_page();
            if tui_app.near_end() {
                browser.load_more();
            }
        }
        Action::PrevPage => {
            tui_app.prev_page();
        }
        Action::NextPane => {
            tui_app.next_pane();
        }
        Action::StartSearch => {
            tui_app.input_mode = InputMode::Search;
        }
        Action::ClearSearch => {
            if !tui_app.search_input.is_empty() {
                tui_app.search_input.clear();
                browser.start("");
            }
        }
        Action::ToggleFavorite => {
            if let Some(anime) = tui_app.selected().cloned() {
                match ctx.favorites.toggle(&anime) {
                    Ok(true) => tui_app.set_status(format!("Added: {}", anime.display_title())),
                    Ok(false) => {
                        tui_app.set_status(format!("Removed: {}", anime.display_title()))
                    }
                    Err(e) => tui_app.set_status(format!("Favorite failed: {}", e)),
                }
            }
        }
        Action::OpenInBrowser => {
            if let Some(anime) = tui_app.selected() {
                if let Some(url) = &anime.url {
                    if let Err(e) = open::that(url) {
                        tui_app.set_status(format!("Failed to open browser: {}", e));
                    }
                }
            }
        }
        Action::Retry => {
            tui_app.clear_status();
            browser.retry();
        }
        Action::None => {}
    }
}
