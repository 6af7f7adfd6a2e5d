pub mod input;

use crate::app::{App, Mode};
use crate::remote::RemoteSource;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

/// Main draw function
pub fn draw<R: RemoteSource>(frame: &mut Frame, app: &App<R>) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Item list
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  draw_header(frame, chunks[0], app);
  draw_items(frame, chunks[1], app);
  draw_status_bar(frame, chunks[2], app);
}

fn draw_header<R: RemoteSource>(frame: &mut Frame, area: Rect, app: &App<R>) {
  let count = app.store().items().len();
  let header = format!(" {} ({} items)", app.title(), count);
  let paragraph = Paragraph::new(header).style(
    Style::default()
      .fg(Color::Black)
      .bg(Color::Blue)
      .add_modifier(Modifier::BOLD),
  );
  frame.render_widget(paragraph, area);
}

fn draw_items<R: RemoteSource>(frame: &mut Frame, area: Rect, app: &App<R>) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  // Not ready covers both "fetch outstanding" and "initial fetch failed";
  // a failed fetch intentionally leaves the loading state on screen.
  if !app.store().is_ready() {
    let content = Paragraph::new("Loading...")
      .style(Style::default().fg(Color::DarkGray))
      .block(block);
    frame.render_widget(content, area);
    return;
  }

  if app.store().items().is_empty() {
    let content = Paragraph::new("No items found")
      .style(Style::default().fg(Color::DarkGray))
      .block(block);
    frame.render_widget(content, area);
    return;
  }

  let editing_id = app.store().edit_state().active_id();

  let items: Vec<ListItem> = app
    .store()
    .items()
    .iter()
    .enumerate()
    .map(|(index, item)| {
      let marker = if editing_id == Some(item.id) { "*" } else { " " };
      let line = format!("{}#{:<4} {}", marker, index + 1, item.title);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items).block(block).highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::Black)
      .add_modifier(Modifier::BOLD),
  );

  let mut state = ListState::default();
  state.select(Some(app.selected()));
  frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar<R: RemoteSource>(frame: &mut Frame, area: Rect, app: &App<R>) {
  let (content, style) = match app.mode() {
    Mode::Normal => {
      let hint = " j/k:nav  e/Enter:edit  d:delete  q:quit";
      (hint.to_string(), Style::default().fg(Color::DarkGray))
    }
    Mode::Edit => {
      let prefix = " title> ";
      let edit = format!("{}{}", prefix, app.input().value());
      // Place the terminal cursor where the next character will land.
      let x = area.x + (prefix.chars().count() + app.input().cursor_chars()) as u16;
      frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
      (edit, Style::default().fg(Color::Yellow))
    }
    Mode::ConfirmSave { .. } => (
      " Save changes to this item? (y/n)".to_string(),
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ),
    Mode::ConfirmDelete { .. } => (
      " Delete this item? (y/n)".to_string(),
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ),
  };

  let paragraph = Paragraph::new(content).style(style);
  frame.render_widget(paragraph, area);
}
