use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActivePane, InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // List + detail
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Min(30)])
        .split(chunks[1]);

    render_search_bar(frame, app, chunks[0]);
    render_list(frame, app, main[0]);
    render_detail(frame, app, main[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_search_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let is_active = app.input_mode == InputMode::Search;
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if app.search_input.is_empty() && !is_active {
        Span::styled("Top anime (press / to search)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.search_input.as_str())
    };

    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if is_active {
        frame.set_cursor_position((
            area.x + 1 + app.search_input.len() as u16,
            area.y + 1,
        ));
    }
}

fn render_list(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let selected = app.selected_index();

    let items: Vec<ListItem> = app
        .visible_items()
        .iter()
        .enumerate()
        .map(|(i, anime)| {
            let marker = if app.is_favorite(anime.id) { "★" } else { " " };
            let score = anime
                .score
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "  - ".into());

            let content = format!("{} {:>5}  {}", marker, score, anime.display_title());

            let style = if i == selected {
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = match app.active_pane {
        ActivePane::Results => {
            if app.browse.query.is_empty() {
                format!(" Top ({}) ", app.browse.items.len())
            } else {
                format!(" Results ({}) ", app.browse.items.len())
            }
        }
        ActivePane::Favorites => format!(" Favorites ({}) ", app.favorites.len()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let (title, content) = if let Some(anime) = app.selected() {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            anime.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(english) = &anime.title_english {
            lines.push(Line::from(Span::styled(
                english.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));

        let mut meta = Vec::new();
        if let Some(kind) = &anime.kind {
            meta.push(kind.clone());
        }
        if let Some(episodes) = anime.episodes {
            meta.push(format!("{} eps", episodes));
        }
        if let Some(year) = anime.year {
            meta.push(year.to_string());
        }
        if let Some(score) = anime.score {
            meta.push(format!("score {:.2}", score));
        }
        if !meta.is_empty() {
            lines.push(Line::from(Span::styled(
                meta.join("  ·  "),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(url) = &anime.url {
            lines.push(Line::from(Span::styled(
                url.clone(),
                Style::default().fg(Color::Blue),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
        lines.push(Line::from(""));

        if let Some(synopsis) = &anime.synopsis {
            for line in synopsis.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        (
            format!(" {} ", anime.display_title()),
            Text::from(lines),
        )
    } else {
        (" Detail ".to_string(), Text::from("Nothing selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = if app.browse.is_initial_loading {
        "Loading...".to_string()
    } else if app.browse.is_loading_more {
        "Loading more...".to_string()
    } else if let Some(err) = app.browse.error() {
        format!("Error: {}  (r to retry)", err)
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "j/k:Navigate  /:Search  Tab:Favorites  f:Fav  o:Open  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
