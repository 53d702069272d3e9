use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::app::{App, InputMode, ViewMode};
use crate::internal::models::{FavoriteEntry, Tip, Video};
use crate::utils::datetime::{format_relative, format_relative_secs};

#[tracing::instrument(skip(app, f))]
pub fn draw(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_top_bar(app, f, chunks[0]);

    match app.view_mode {
        ViewMode::Home => render_home(app, f, chunks[1]),
        ViewMode::Tips => render_tips(app, f, chunks[1], true),
        ViewMode::Favorites => render_favorites(app, f, chunks[1]),
    }

    render_status_bar(app, f, chunks[2]);

    if app.input_mode == InputMode::Search {
        render_search_overlay(app, f);
    }

    if app.notification.is_some() {
        render_notification(app, f);
    }
}

/// Wrap `text` to `width` columns with each line indented by `indent`
/// spaces. Widths too small to be useful fall back to a single line.
pub fn wrap_text(text: &str, width: u16, indent: u16) -> Vec<String> {
    let pad = " ".repeat(indent as usize);
    let usable = width.saturating_sub(indent) as usize;
    if usable < 8 {
        return vec![format!("{pad}{text}")];
    }
    textwrap::wrap(text, usable)
        .into_iter()
        .map(|line| format!("{pad}{line}"))
        .collect()
}

fn favorite_marker(app: &App, id: &str) -> &'static str {
    match app.favorites.contains(id) {
        true => "★",
        false => "☆",
    }
}

fn render_top_bar(app: &App, f: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        format!("Daily Wellness v{}", app.app_version),
        Style::default().fg(app.theme.accent),
    )];
    for (label, mode) in [
        ("1:Home", ViewMode::Home),
        ("2:Tips", ViewMode::Tips),
        ("3:Favorites", ViewMode::Favorites),
    ] {
        let style = match app.view_mode == mode {
            true => Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
            false => Style::default().fg(app.theme.muted),
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label, style));
    }
    let left = Paragraph::new(Line::from(spans)).style(Style::default().bg(app.theme.background));
    f.render_widget(left, area);

    let mut right = format!("{} theme", app.theme_mode.as_str());
    if let Some(secs) = app.last_fetch {
        right = format!("updated {} | {right}", format_relative_secs(secs));
    }
    let right = Paragraph::new(right).alignment(Alignment::Right).style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.muted),
    );
    f.render_widget(right, area);
}

fn render_home(app: &mut App, f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    render_quote(app, f, chunks[0]);
    render_videos(app, f, chunks[1]);
    render_tips(app, f, chunks[2], false);
}

fn render_quote(app: &App, f: &mut Frame, area: Rect) {
    let lines = match &app.quote {
        Some(quote) => vec![
            Line::from(Span::styled(
                format!("\"{}\"", quote.text),
                Style::default().fg(app.theme.foreground),
            )),
            Line::from(Span::styled(
                format!("— {}", quote.author),
                Style::default().fg(app.theme.muted),
            )),
            Line::from(Span::styled(
                format!("{} d: save quote", favorite_marker(app, &quote.id)),
                Style::default().fg(app.theme.favorite),
            )),
        ],
        None => {
            let text = match app.quote_loading {
                true => "Fetching today's quote...",
                false => "No quote available.",
            };
            vec![Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.muted),
            ))]
        }
    };

    let p = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.background))
        .block(titled_block(app, "Quote of the Day"))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_videos(app: &mut App, f: &mut Frame, area: Rect) {
    let title = format!("Videos ({})", app.video_query());

    if app.videos.is_empty() {
        let text = match app.videos_loading {
            true => "Searching videos...",
            false => "No videos found. Check the API credential in config.ron.",
        };
        render_placeholder(app, f, area, &title, text);
        return;
    }

    let videos = app.videos.clone();
    let items: Vec<ListItem> = videos
        .iter()
        .map(|video| video_list_item(app, video))
        .collect();

    let list = List::new(items)
        .block(titled_block(app, &title))
        .style(Style::default().bg(app.theme.background))
        .highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .fg(app.theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn video_list_item<'a>(app: &App, video: &'a Video) -> ListItem<'a> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", favorite_marker(app, &video.video_id)),
                Style::default().fg(app.theme.favorite),
            ),
            Span::styled(
                video.title.clone(),
                Style::default().fg(app.theme.foreground),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {} | {}", video.channel_title, video.watch_url()),
            Style::default().fg(app.theme.muted),
        )),
    ])
}

fn render_tips(app: &mut App, f: &mut Frame, area: Rect, selectable: bool) {
    let mut title = format!("Tips [{}]", app.category);
    if !app.search_query.is_empty() {
        title.push_str(&format!(" (Filter: {})", app.search_query));
    }

    let filtered: Vec<Tip> = app.filtered_tips().into_iter().cloned().collect();
    if filtered.is_empty() {
        render_placeholder(app, f, area, &title, "No tips match your filters.");
        return;
    }

    let items: Vec<ListItem> = filtered
        .iter()
        .map(|tip| tip_list_item(app, tip, area.width))
        .collect();

    let list = List::new(items)
        .block(titled_block(app, &title))
        .style(Style::default().bg(app.theme.background))
        .highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .fg(app.theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );

    match selectable {
        true => f.render_stateful_widget(list, area, &mut app.list_state),
        false => f.render_widget(list, area),
    }
}

fn tip_list_item<'a>(app: &App, tip: &Tip, width: u16) -> ListItem<'a> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", favorite_marker(app, &tip.id)),
            Style::default().fg(app.theme.favorite),
        ),
        Span::styled(
            tip.title.clone(),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" [{}]", tip.category),
            Style::default().fg(app.theme.accent),
        ),
    ])];

    for wrapped in wrap_text(&tip.content, width.saturating_sub(4), 3) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(app.theme.foreground),
        )));
    }

    if !tip.source.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("   source: {}", tip.source),
            Style::default().fg(app.theme.muted),
        )));
    }

    ListItem::new(lines)
}

fn render_favorites(app: &mut App, f: &mut Frame, area: Rect) {
    // Only saved videos are listed here; quote and tip favorites keep their
    // markers in their own regions.
    let videos: Vec<FavoriteEntry> = app.favorites.videos().into_iter().cloned().collect();

    if videos.is_empty() {
        render_placeholder(
            app,
            f,
            area,
            "Favorites",
            "You haven't saved any favorite videos yet.",
        );
        return;
    }

    let items: Vec<ListItem> = videos
        .iter()
        .filter_map(|entry| match entry {
            FavoriteEntry::Video {
                id,
                title,
                channel_title,
                saved_at,
            } => Some(ListItem::new(vec![
                Line::from(vec![
                    Span::styled("★ ", Style::default().fg(app.theme.favorite)),
                    Span::styled(title.clone(), Style::default().fg(app.theme.foreground)),
                ]),
                Line::from(Span::styled(
                    format!(
                        "   {} | saved {} | https://www.youtube.com/watch?v={}",
                        channel_title,
                        format_relative(saved_at),
                        id
                    ),
                    Style::default().fg(app.theme.muted),
                )),
            ])),
            _ => None,
        })
        .collect();

    let list = List::new(items)
        .block(titled_block(app, "Favorites"))
        .style(Style::default().bg(app.theme.background))
        .highlight_style(
            Style::default()
                .bg(app.theme.selection_bg)
                .fg(app.theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(app: &App, f: &mut Frame, area: Rect) {
    let status = match app.input_mode {
        InputMode::Search => "Search: type to filter tips and videos | Enter/Esc: done".to_string(),
        InputMode::Normal => {
            let filter_hint = match app.search_query.is_empty() {
                true => String::new(),
                false => format!(" | Filter: {} (C: clear)", app.search_query),
            };
            match app.view_mode {
                ViewMode::Home => format!(
                    "1-3: View | j/k: Nav | f: Fav video | d: Fav quote | o: Open | c: Category | /: Search | t: Theme | r: Refresh | q: Quit{filter_hint}"
                ),
                ViewMode::Tips => format!(
                    "1-3: View | j/k: Nav | f: Fav tip | c: Category ({}) | /: Search | t: Theme | q: Back{filter_hint}",
                    app.category
                ),
                ViewMode::Favorites => {
                    "1-3: View | j/k: Nav | f: Remove | o: Open | t: Theme | q: Back".to_string()
                }
            }
        }
    };

    let p = Paragraph::new(status).style(
        Style::default()
            .bg(app.theme.selection_bg)
            .fg(app.theme.selection_fg),
    );
    f.render_widget(p, area);
}

fn render_search_overlay(app: &App, f: &mut Frame) {
    let area = f.area();
    if area.width < 10 || area.height < 5 {
        return;
    }

    let search_width = 60.min(area.width.saturating_sub(4));
    let search_height = 3;
    let search_x = (area.width.saturating_sub(search_width)) / 2;
    let search_y = (area.height.saturating_sub(search_height)) / 2;
    let search_area = Rect::new(search_x, search_y, search_width, search_height);

    let display_text = format!("{}█", app.search_query);

    let search_box = Paragraph::new(display_text)
        .style(
            Style::default()
                .fg(app.theme.foreground)
                .bg(app.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.selection_bg))
                .title(" Search (Esc to cancel) ")
                .title_style(
                    Style::default()
                        .fg(app.theme.selection_fg)
                        .bg(app.theme.selection_bg)
                        .add_modifier(Modifier::BOLD),
                ),
        );

    f.render_widget(Clear, search_area);
    f.render_widget(search_box, search_area);
}

fn render_notification(app: &App, f: &mut Frame) {
    if let Some(notification) = &app.notification {
        let area = f.area();
        if area.width < 10 || area.height < 5 {
            return;
        }

        let popup_width = (notification.message.len() as u16 + 4).min(area.width.saturating_sub(4));
        let popup_height = 3;
        let popup_x = (area.width.saturating_sub(popup_width)) / 2;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        use crate::internal::notification::NotificationKind;
        let (bg_color, fg_color, title) = match notification.kind {
            NotificationKind::Info => (app.theme.selection_bg, app.theme.selection_fg, "Info"),
            NotificationKind::Error => (app.theme.favorite, app.theme.background, "Error"),
        };

        let popup = Paragraph::new(notification.message.as_str())
            .style(
                Style::default()
                    .bg(bg_color)
                    .fg(fg_color)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(bg_color))
                    .title(title)
                    .title_style(Style::default().fg(app.theme.foreground)),
            )
            .alignment(Alignment::Center);

        f.render_widget(Clear, popup_area);
        f.render_widget(popup, popup_area);
    }
}

fn render_placeholder(app: &App, f: &mut Frame, area: Rect, title: &str, text: &str) {
    let p = Paragraph::new(text)
        .style(
            Style::default()
                .fg(app.theme.muted)
                .bg(app.theme.background),
        )
        .block(titled_block(app, title))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn titled_block<'a>(app: &App, title: &str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(title.to_string())
        .title_style(Style::default().fg(app.theme.foreground))
}
