//! Remote collection endpoint.
//!
//! The remote source is an opaque request/response boundary: a list read,
//! a partial title update, and a delete. Extra response fields beyond
//! id/title are ignored.

mod api_types;
mod client;

pub use client::HttpRemote;

use crate::items::Item;
use color_eyre::Result;

/// The remote collection endpoint, abstracted so the core can be exercised
/// against a stub in tests.
pub trait RemoteSource {
  /// `GET /posts` - read the full collection.
  fn fetch_items(&self) -> impl std::future::Future<Output = Result<Vec<Item>>> + Send;

  /// `PATCH /posts/{id}` with `{title}` - returns the updated record as the
  /// remote sees it, which is authoritative over the submitted title.
  fn update_title(
    &self,
    id: u64,
    title: &str,
  ) -> impl std::future::Future<Output = Result<Item>> + Send;

  /// `DELETE /posts/{id}`.
  fn delete_item(&self, id: u64) -> impl std::future::Future<Output = Result<()>> + Send;
}
