use serde::{Deserialize, Serialize};

/// A single record in the collection.
///
/// The id is assigned by the remote source and is stable; the title is the
/// only mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id: u64,
  pub title: String,
}

/// The single-item edit mode state machine.
///
/// At most one item is in edit mode at a time. `Editing` carries the draft
/// title being composed, so "no edit" and "editing with an empty draft" are
/// distinct states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
  Resting,
  Editing { id: u64, draft: String },
}

impl EditState {
  /// The id under edit, if any.
  pub fn active_id(&self) -> Option<u64> {
    match self {
      EditState::Resting => None,
      EditState::Editing { id, .. } => Some(*id),
    }
  }

  /// The current draft, if an edit is active.
  pub fn draft(&self) -> Option<&str> {
    match self {
      EditState::Resting => None,
      EditState::Editing { draft, .. } => Some(draft),
    }
  }
}

/// Collection lifecycle. Write-through to the local store only happens once
/// the collection has been populated, so an outstanding initial fetch can
/// never clobber a populated cache with an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Uninitialized,
  Ready,
}
