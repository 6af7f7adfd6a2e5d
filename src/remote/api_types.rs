//! Wire types for the posts endpoint.

use serde::{Deserialize, Serialize};

use crate::items::Item;

/// A post as the endpoint returns it. The endpoint sends more fields than
/// we keep (userId, body, ...); everything beyond id/title is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPost {
  pub id: u64,
  pub title: String,
}

impl ApiPost {
  pub fn into_item(self) -> Item {
    Item {
      id: self.id,
      title: self.title,
    }
  }
}

/// Body for the partial title update.
#[derive(Debug, Serialize)]
pub struct TitlePatch<'a> {
  pub title: &'a str,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extra_fields_ignored() {
    let json = r#"{"userId":1,"id":7,"title":"hello","body":"long text"}"#;
    let post: ApiPost = serde_json::from_str(json).unwrap();
    assert_eq!(post.into_item(), Item {
      id: 7,
      title: "hello".to_string()
    });
  }

  #[test]
  fn test_list_parses_in_order() {
    let json = r#"[{"id":2,"title":"B"},{"id":1,"title":"A"}]"#;
    let posts: Vec<ApiPost> = serde_json::from_str(json).unwrap();
    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
  }

  #[test]
  fn test_patch_body_shape() {
    let body = serde_json::to_string(&TitlePatch { title: "new" }).unwrap();
    assert_eq!(body, r#"{"title":"new"}"#);
  }
}
