use color_eyre::{eyre::eyre, Result};
use url::Url;

use super::api_types::{ApiPost, TitlePatch};
use super::RemoteSource;
use crate::config::Config;
use crate::items::Item;

/// HTTP client for the posts endpoint.
#[derive(Clone)]
pub struct HttpRemote {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpRemote {
  pub fn new(config: &Config) -> Result<Self> {
    let base_url = Url::parse(&config.api.base_url)
      .map_err(|e| eyre!("Invalid API base url {}: {}", config.api.base_url, e))?;

    let client = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, base_url })
  }

  fn posts_url(&self) -> Result<Url> {
    self
      .base_url
      .join("posts")
      .map_err(|e| eyre!("Failed to build posts url: {}", e))
  }

  fn post_url(&self, id: u64) -> Result<Url> {
    self
      .base_url
      .join(&format!("posts/{}", id))
      .map_err(|e| eyre!("Failed to build post url for {}: {}", id, e))
  }
}

impl RemoteSource for HttpRemote {
  async fn fetch_items(&self) -> Result<Vec<Item>> {
    let url = self.posts_url()?;

    let posts: Vec<ApiPost> = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch posts: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Posts endpoint returned an error: {}", e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse posts response: {}", e))?;

    Ok(posts.into_iter().map(ApiPost::into_item).collect())
  }

  async fn update_title(&self, id: u64, title: &str) -> Result<Item> {
    let url = self.post_url(id)?;

    let post: ApiPost = self
      .client
      .patch(url)
      .json(&TitlePatch { title })
      .send()
      .await
      .map_err(|e| eyre!("Failed to update post {}: {}", id, e))?
      .error_for_status()
      .map_err(|e| eyre!("Update of post {} was rejected: {}", id, e))?
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse update response for {}: {}", id, e))?;

    Ok(post.into_item())
  }

  async fn delete_item(&self, id: u64) -> Result<()> {
    let url = self.post_url(id)?;

    self
      .client
      .delete(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to delete post {}: {}", id, e))?
      .error_for_status()
      .map_err(|e| eyre!("Delete of post {} was rejected: {}", id, e))?;

    Ok(())
  }
}
