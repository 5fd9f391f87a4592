use std::collections::BTreeSet;
use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::events::Focus;
use super::layout::AppLayout;
use crate::history::{History, format_list_item};
use crate::utils::{format_path_with_tilde, sanitize_for_terminal};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const MATCH: Color = Color::Rgb(234, 179, 8);
const ERROR: Color = Color::Rgb(239, 68, 68);
const STATUS_BG: Color = Color::Rgb(24, 24, 27);

/// Everything the renderer needs from the app
pub struct RenderState<'a> {
    pub history: &'a History,
    pub selected_idx: usize,
    pub marked: &'a BTreeSet<usize>,
    pub matches: &'a [usize],
    pub search_input: &'a str,
    pub focus: Focus,
    pub paused: bool,
    pub reverse_lines: bool,
    pub data_dir: &'a Path,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_bar(frame, layout.search_area, state);
    render_history_list(frame, layout.list_area, state);
    render_preview(frame, layout.preview_area, state.history.get(state.selected_idx));
    render_status_bar(frame, layout.status_area, state);
}

fn border_style(active: bool) -> Style {
    if active { Style::default().fg(ACCENT) } else { Style::default().fg(MUTED) }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let active = state.focus == Focus::Search;
    let mut spans = vec![Span::raw(state.search_input.to_string())];
    if active {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if !state.matches.is_empty() {
        spans.push(Span::styled(
            format!("  ({} matches)", state.matches.len()),
            Style::default().fg(MUTED),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(active))
            .title(" Search (Ctrl+F) "),
    );
    frame.render_widget(paragraph, area);
}

fn render_history_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items: Vec<ListItem> = state
        .history
        .items()
        .enumerate()
        .map(|(idx, item)| {
            let mark = if state.marked.contains(&idx) { "+" } else { " " };
            let label = format_list_item(item, state.history.is_favorite(item));
            let label = sanitize_for_terminal(&label);
            let style = if state.matches.contains(&idx) {
                Style::default().fg(MATCH)
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(format!("{}{}", mark, label)).style(style)
        })
        .collect();

    let title = format!(" History ({}/{}) ", state.history.len(), state.history.capacity());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(state.focus == Focus::List))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(BRIGHT)
                .bg(ACCENT) // Emerald background
                .add_modifier(Modifier::BOLD),
        );

    let selected = if state.history.is_empty() { None } else { Some(state.selected_idx) };
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_preview(frame: &mut Frame, area: Rect, item: Option<&str>) {
    let content = match item {
        Some(text) => {
            let clean = sanitize_for_terminal(text);
            Text::from(clean.lines().map(|line| Line::from(line.to_string())).collect::<Vec<_>>())
        }
        None => Text::from(Span::styled("No entry selected", Style::default().fg(MUTED))),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = match state.status_message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => BRIGHT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", msg.text), Style::default().fg(fg).bg(STATUS_BG))
        }
        None => {
            let mut parts = vec![];

            parts.push(if state.paused { "[PAUSED]" } else { "[CAPTURING]" }.to_string());
            if state.reverse_lines {
                parts.push("[REVERSE]".to_string());
            }
            parts.push(format!(
                "{} items, {} favorites",
                state.history.len(),
                state.history.favorites().len()
            ));
            if !state.marked.is_empty() {
                parts.push(format!("{} marked", state.marked.len()));
            }
            parts.push(format!("data: {}", format_path_with_tilde(state.data_dir)));
            parts.push("Ctrl+C: copy | Del: delete | f: fav | Ctrl+Q: quit".to_string());

            (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(STATUS_BG))
        }
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
