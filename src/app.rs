use crate::cache::CacheStore;
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::items::{Answer, ListStore};
use crate::remote::{HttpRemote, RemoteSource};
use crate::ui;
use crate::ui::input::{DraftEvent, DraftInput};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Normal,
  /// Composing a draft title for the item under edit
  Edit,
  /// Yes/no prompt before the draft is sent to the remote source
  ConfirmSave { id: u64 },
  /// Yes/no prompt before an item is deleted
  ConfirmDelete { id: u64 },
}

/// Main application state
pub struct App<R: RemoteSource> {
  /// The collection core; the UI is a consumer of its read-only views
  store: ListStore<R>,
  /// Current input mode
  mode: Mode,
  /// Selected row in the item list
  selected: usize,
  /// Draft title input, live while in Edit mode
  input: DraftInput,
  /// Header title
  title: String,
  /// Whether to quit
  should_quit: bool,
}

impl App<HttpRemote> {
  pub fn new(config: &Config, cache: Box<dyn CacheStore>) -> Result<Self> {
    let remote = HttpRemote::new(config)?;
    let title = config
      .title
      .clone()
      .unwrap_or_else(|| config.api.base_url.clone());

    Ok(Self::with_remote(remote, cache, title))
  }
}

impl<R: RemoteSource> App<R> {
  pub fn with_remote(remote: R, cache: Box<dyn CacheStore>, title: String) -> Self {
    Self {
      store: ListStore::new(remote, cache),
      mode: Mode::Normal,
      selected: 0,
      input: DraftInput::default(),
      title,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // First frame shows the loading indicator while the initial read runs.
    // Mutation keys are unreachable until the collection is populated.
    terminal.draw(|frame| ui::draw(frame, self))?;
    self.store.initialize().await;

    let mut events = EventHandler::new(Duration::from_millis(250));

    // Main loop
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      if let Some(event) = events.next().await {
        self.handle_event(event).await;
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  async fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key).await,
      Event::Tick => {} // UI refresh happens automatically
    }
  }

  async fn handle_key(&mut self, key: KeyEvent) {
    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Edit => self.handle_edit_mode_key(key),
      Mode::ConfirmSave { id } => self.handle_confirm_save_key(id, key).await,
      Mode::ConfirmDelete { id } => self.handle_confirm_delete_key(id, key).await,
    }
  }

  fn handle_normal_mode_key(&mut self, key: KeyEvent) {
    match key.code {
      // Quit
      KeyCode::Char('q') => {
        self.should_quit = true;
      }
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }

      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),

      // Mutations
      KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
      KeyCode::Char('d') => {
        if let Some(item) = self.store.items().get(self.selected) {
          self.mode = Mode::ConfirmDelete { id: item.id };
        }
      }

      _ => {}
    }
  }

  fn handle_edit_mode_key(&mut self, key: KeyEvent) {
    // Save-control path: Ctrl-S opens the same confirmation the
    // keyboard-confirm (Enter) path does.
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
      if let Some(id) = self.store.edit_state().active_id() {
        self.mode = Mode::ConfirmSave { id };
      }
      return;
    }

    match self.input.handle_key(key) {
      DraftEvent::Changed => {
        self.store.update_draft(self.input.value());
      }
      DraftEvent::Confirmed => {
        if let Some(id) = self.store.edit_state().active_id() {
          self.mode = Mode::ConfirmSave { id };
        }
      }
      DraftEvent::Dismissed => {
        // Leaves the input overlay, but the edit state stays active: the
        // state machine has no cancel transition. Starting another edit
        // abandons this draft.
        self.mode = Mode::Normal;
      }
      DraftEvent::Ignored => {}
    }
  }

  async fn handle_confirm_save_key(&mut self, id: u64, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        self.store.commit_edit(id, &Answer(true)).await;
        self.mode = Mode::Normal;
      }
      KeyCode::Char('n') | KeyCode::Esc => {
        // Declined: no-op in the store, back to composing the draft.
        self.store.commit_edit(id, &Answer(false)).await;
        self.mode = Mode::Edit;
      }
      _ => {}
    }
  }

  async fn handle_confirm_delete_key(&mut self, id: u64, key: KeyEvent) {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        self.store.delete_item(id, &Answer(true)).await;
        self.mode = Mode::Normal;
        self.clamp_selection();
      }
      KeyCode::Char('n') | KeyCode::Esc => {
        self.store.delete_item(id, &Answer(false)).await;
        self.mode = Mode::Normal;
      }
      _ => {}
    }
  }

  fn begin_edit(&mut self) {
    let Some(item) = self.store.items().get(self.selected) else {
      return;
    };

    self.store.start_edit(item.id);
    if let Some(draft) = self.store.edit_state().draft() {
      self.input = DraftInput::with_value(draft);
      self.mode = Mode::Edit;
    }
  }

  fn move_selection(&mut self, delta: i32) {
    let len = self.store.items().len();
    if len > 0 {
      self.selected = (self.selected as i32 + delta).rem_euclid(len as i32) as usize;
    }
  }

  fn clamp_selection(&mut self) {
    let len = self.store.items().len();
    if len == 0 {
      self.selected = 0;
    } else if self.selected >= len {
      self.selected = len - 1;
    }
  }

  // Accessors for UI rendering

  pub fn store(&self) -> &ListStore<R> {
    &self.store
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn selected(&self) -> usize {
    self.selected
  }

  pub fn input(&self) -> &DraftInput {
    &self.input
  }

  pub fn title(&self) -> &str {
    &self.title
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{MemoryStore, ITEMS_KEY};
  use crate::items::{EditState, Item};
  use color_eyre::eyre::eyre;

  /// Remote stub: the tests below initialize from a preloaded cache, so
  /// fetch is never reached; updates echo the submitted title back.
  #[derive(Clone, Copy)]
  struct StubRemote {
    patch_ok: bool,
  }

  impl RemoteSource for StubRemote {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
      Err(eyre!("not reachable from these tests"))
    }

    async fn update_title(&self, id: u64, title: &str) -> Result<Item> {
      if self.patch_ok {
        Ok(Item {
          id,
          title: title.to_string(),
        })
      } else {
        Err(eyre!("update rejected"))
      }
    }

    async fn delete_item(&self, _id: u64) -> Result<()> {
      Ok(())
    }
  }

  async fn app_with_cache(cached: &str, patch_ok: bool) -> App<StubRemote> {
    let cache = MemoryStore::new();
    cache.set(ITEMS_KEY, cached).unwrap();

    let mut app = App::with_remote(
      StubRemote { patch_ok },
      Box::new(cache),
      "test".to_string(),
    );
    app.store.initialize().await;
    app
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
  }

  async fn type_str(app: &mut App<StubRemote>, text: &str) {
    for c in text.chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
  }

  const TWO_ITEMS: &str = r#"[{"id":1,"title":"A"},{"id":2,"title":"B"}]"#;

  #[tokio::test]
  async fn test_selection_wraps_around() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('j'))).await;
    assert_eq!(app.selected(), 1);
    app.handle_key(key(KeyCode::Char('j'))).await;
    assert_eq!(app.selected(), 0);
    app.handle_key(key(KeyCode::Char('k'))).await;
    assert_eq!(app.selected(), 1);
  }

  #[tokio::test]
  async fn test_edit_key_seeds_draft_from_title() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('e'))).await;

    assert_eq!(app.mode(), Mode::Edit);
    assert_eq!(app.input().value(), "A");
    assert_eq!(
      app.store().edit_state(),
      &EditState::Editing {
        id: 1,
        draft: "A".to_string()
      }
    );
  }

  #[tokio::test]
  async fn test_enter_and_ctrl_s_both_open_save_confirmation() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('e'))).await;
    app.handle_key(key(KeyCode::Enter)).await;
    assert_eq!(app.mode(), Mode::ConfirmSave { id: 1 });

    // Decline, then take the save-control path instead.
    app.handle_key(key(KeyCode::Char('n'))).await;
    assert_eq!(app.mode(), Mode::Edit);
    app.handle_key(ctrl(KeyCode::Char('s'))).await;
    assert_eq!(app.mode(), Mode::ConfirmSave { id: 1 });
  }

  #[tokio::test]
  async fn test_confirmed_save_applies_title() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('e'))).await;
    type_str(&mut app, "2").await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Char('y'))).await;

    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.store().items()[0].title, "A2");
    assert_eq!(app.store().edit_state(), &EditState::Resting);
  }

  #[tokio::test]
  async fn test_declined_save_keeps_draft() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('e'))).await;
    type_str(&mut app, "2").await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Char('n'))).await;

    assert_eq!(app.mode(), Mode::Edit);
    assert_eq!(app.store().items()[0].title, "A");
    assert_eq!(app.store().edit_state().draft(), Some("A2"));
  }

  #[tokio::test]
  async fn test_failed_save_discards_draft() {
    let mut app = app_with_cache(TWO_ITEMS, false).await;

    app.handle_key(key(KeyCode::Char('e'))).await;
    type_str(&mut app, "2").await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Char('y'))).await;

    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.store().items()[0].title, "A");
    assert_eq!(app.store().edit_state(), &EditState::Resting);
  }

  #[tokio::test]
  async fn test_escape_leaves_edit_mode_but_not_edit_state() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('e'))).await;
    type_str(&mut app, "bc").await;
    app.handle_key(key(KeyCode::Esc)).await;

    assert_eq!(app.mode(), Mode::Normal);
    // No cancel transition: the draft survives until another edit starts.
    assert_eq!(app.store().edit_state().draft(), Some("Abc"));

    app.handle_key(key(KeyCode::Char('j'))).await;
    app.handle_key(key(KeyCode::Char('e'))).await;
    assert_eq!(
      app.store().edit_state(),
      &EditState::Editing {
        id: 2,
        draft: "B".to_string()
      }
    );
  }

  #[tokio::test]
  async fn test_delete_flow_clamps_selection() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('j'))).await;
    app.handle_key(key(KeyCode::Char('d'))).await;
    assert_eq!(app.mode(), Mode::ConfirmDelete { id: 2 });

    app.handle_key(key(KeyCode::Char('y'))).await;
    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.store().items(), &[Item {
      id: 1,
      title: "A".to_string()
    }]);
    assert_eq!(app.selected(), 0);
  }

  #[tokio::test]
  async fn test_delete_declined_keeps_item() {
    let mut app = app_with_cache(TWO_ITEMS, true).await;

    app.handle_key(key(KeyCode::Char('d'))).await;
    app.handle_key(key(KeyCode::Char('n'))).await;

    assert_eq!(app.mode(), Mode::Normal);
    assert_eq!(app.store().items().len(), 2);
  }
}
