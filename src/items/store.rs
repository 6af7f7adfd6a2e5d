//! Collection state: cache-or-fetch initialization and optimistic mutation.

use tracing::{debug, error, info, warn};

use super::types::{EditState, Item, Phase};
use crate::cache::{CacheStore, ITEMS_KEY};
use crate::remote::RemoteSource;

/// A yes/no question put to the user before a destructive or remote-visible
/// operation proceeds.
///
/// The core only sees the boolean outcome; how the question is presented is
/// the host's concern. Declining is a normal no-op path, not an error.
pub trait ConfirmPrompt {
  fn confirm(&self, question: &str) -> bool;
}

/// An already-resolved confirmation outcome.
///
/// The TUI collects the answer through an overlay and hands it in here, so
/// both the accepted and the declined path still flow through the store.
pub struct Answer(pub bool);

impl ConfirmPrompt for Answer {
  fn confirm(&self, _question: &str) -> bool {
    self.0
  }
}

/// Owner of the in-memory collection and the edit state machine.
///
/// Created empty, populated exactly once by [`initialize`](Self::initialize)
/// (from the local cache or the remote source), then mutated in place for
/// the rest of the process lifetime. Every collection change after
/// initialization is written through to the cache store.
///
/// Operation failures are reported via `tracing` and absorbed here; none of
/// them are fatal and none are retried.
pub struct ListStore<R: RemoteSource> {
  remote: R,
  cache: Box<dyn CacheStore>,
  items: Vec<Item>,
  edit: EditState,
  phase: Phase,
  loading: bool,
}

impl<R: RemoteSource> ListStore<R> {
  pub fn new(remote: R, cache: Box<dyn CacheStore>) -> Self {
    Self {
      remote,
      cache,
      items: Vec::new(),
      edit: EditState::Resting,
      phase: Phase::Uninitialized,
      loading: false,
    }
  }

  /// Populate the collection, once per process lifetime.
  ///
  /// A non-empty cache record is authoritative and skips the remote read
  /// entirely. Otherwise the collection is fetched from the remote source;
  /// a failed fetch is logged and leaves the collection empty and the
  /// lifecycle at `Uninitialized`, so nothing gets written over a cache
  /// that some earlier run may have populated.
  pub async fn initialize(&mut self) {
    match self.cache.get(ITEMS_KEY) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<Item>>(&raw) {
        Ok(items) if !items.is_empty() => {
          debug!(count = items.len(), "loaded collection from cache");
          self.items = items;
          self.phase = Phase::Ready;
          return;
        }
        Ok(_) => {}
        Err(e) => warn!("discarding unreadable cache record: {}", e),
      },
      Ok(None) => {}
      Err(e) => warn!("failed to read cache record: {}", e),
    }

    self.loading = true;
    match self.remote.fetch_items().await {
      Ok(items) => {
        info!(count = items.len(), "fetched collection from remote");
        self.items = items;
        self.phase = Phase::Ready;
        self.persist();
      }
      Err(e) => error!("initial fetch failed: {}", e),
    }
    self.loading = false;
  }

  /// Begin editing the item with `id`, seeding the draft from its current
  /// title. Starting an edit while another is active abandons the other
  /// draft; only one item is ever in edit mode. Unknown ids are ignored.
  pub fn start_edit(&mut self, id: u64) {
    if let Some(item) = self.items.iter().find(|i| i.id == id) {
      self.edit = EditState::Editing {
        id,
        draft: item.title.clone(),
      };
    }
  }

  /// Replace the draft title. Pure local state; ignored while resting.
  pub fn update_draft(&mut self, text: impl Into<String>) {
    if let EditState::Editing { draft, .. } = &mut self.edit {
      *draft = text.into();
    }
  }

  /// Commit the active draft for `id` to the remote source.
  ///
  /// Declined confirmation leaves everything untouched. On success the
  /// title the remote returned wins over the submitted draft. On failure
  /// the draft is discarded and the collection stays unchanged; there is
  /// no retry.
  pub async fn commit_edit(&mut self, id: u64, confirm: &impl ConfirmPrompt) {
    let draft = match &self.edit {
      EditState::Editing { id: active, draft } if *active == id => draft.clone(),
      _ => return,
    };

    if !confirm.confirm("Save changes to this item?") {
      return;
    }

    match self.remote.update_title(id, &draft).await {
      Ok(updated) => {
        // The remote response is authoritative over the draft we sent.
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
          item.title = updated.title;
        }
        self.edit = EditState::Resting;
        self.persist();
      }
      Err(e) => {
        error!("update of item {} failed, draft discarded: {}", id, e);
        self.edit = EditState::Resting;
      }
    }
  }

  /// Delete the item with `id`, best-effort.
  ///
  /// The local removal happens regardless of the remote outcome; a failed
  /// remote delete is logged only and never rolled back.
  pub async fn delete_item(&mut self, id: u64, confirm: &impl ConfirmPrompt) {
    if !self.items.iter().any(|i| i.id == id) {
      return;
    }

    if !confirm.confirm("Delete this item?") {
      return;
    }

    if let Err(e) = self.remote.delete_item(id).await {
      error!("remote delete of item {} failed, removing locally anyway: {}", id, e);
    }

    self.items.retain(|i| i.id != id);
    self.persist();
  }

  /// Write the collection through to the cache store.
  /// Gated on the lifecycle so an unpopulated collection never overwrites
  /// a populated cache record.
  fn persist(&self) {
    if self.phase != Phase::Ready {
      return;
    }

    let json = match serde_json::to_string(&self.items) {
      Ok(json) => json,
      Err(e) => {
        error!("failed to serialize collection: {}", e);
        return;
      }
    };

    if let Err(e) = self.cache.set(ITEMS_KEY, &json) {
      error!("write-through to cache failed: {}", e);
    }
  }

  // Read-only views for the rendering surface

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn edit_state(&self) -> &EditState {
    &self.edit
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn is_ready(&self) -> bool {
    self.phase == Phase::Ready
  }
}
