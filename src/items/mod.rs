//! The collection core: cache-or-fetch loading and optimistic mutation.
//!
//! This module has no UI dependencies. The presentation layer binds to the
//! read-only views (`items()`, `edit_state()`, lifecycle accessors) and the
//! mutation entry points on [`ListStore`].

mod store;
mod types;

pub use store::{Answer, ConfirmPrompt, ListStore};
pub use types::{EditState, Item, Phase};
