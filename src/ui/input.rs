use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event in the draft input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
  /// The buffer changed (or the cursor moved)
  Changed,
  /// Enter pressed
  Confirmed,
  /// Escape pressed
  Dismissed,
  /// Key not handled, pass to next handler
  Ignored,
}

/// Single-line text input for composing a draft title
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
  buffer: String,
  cursor: usize,
}

impl DraftInput {
  /// Create an input pre-filled with `value`, cursor at the end.
  pub fn with_value(value: &str) -> Self {
    Self {
      buffer: value.to_string(),
      cursor: value.len(),
    }
  }

  /// Get the current input value
  pub fn value(&self) -> &str {
    &self.buffer
  }

  /// Cursor offset in characters, for rendering
  pub fn cursor_chars(&self) -> usize {
    self.buffer[..self.cursor].chars().count()
  }

  /// Byte index of the char boundary before the cursor, if any.
  fn prev_boundary(&self) -> Option<usize> {
    self.buffer[..self.cursor]
      .char_indices()
      .next_back()
      .map(|(idx, _)| idx)
  }

  /// Handle a key event, returning the result
  pub fn handle_key(&mut self, key: KeyEvent) -> DraftEvent {
    match key.code {
      KeyCode::Esc => DraftEvent::Dismissed,
      KeyCode::Enter => DraftEvent::Confirmed,
      KeyCode::Backspace => {
        if let Some(idx) = self.prev_boundary() {
          self.buffer.remove(idx);
          self.cursor = idx;
        }
        DraftEvent::Changed
      }
      KeyCode::Delete => {
        if self.cursor < self.buffer.len() {
          self.buffer.remove(self.cursor);
        }
        DraftEvent::Changed
      }
      KeyCode::Left => {
        if let Some(idx) = self.prev_boundary() {
          self.cursor = idx;
        }
        DraftEvent::Changed
      }
      KeyCode::Right => {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
          self.cursor += c.len_utf8();
        }
        DraftEvent::Changed
      }
      KeyCode::Home => {
        self.cursor = 0;
        DraftEvent::Changed
      }
      KeyCode::End => {
        self.cursor = self.buffer.len();
        DraftEvent::Changed
      }
      KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        // Clear line before cursor
        self.buffer = self.buffer[self.cursor..].to_string();
        self.cursor = 0;
        DraftEvent::Changed
      }
      KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.buffer.insert(self.cursor, c);
        // The cursor is a byte index and must stay on a char boundary.
        self.cursor += c.len_utf8();
        DraftEvent::Changed
      }
      _ => DraftEvent::Ignored,
    }
  }
}
