use axum::{extract::Query, Extension, Json};
use serde::Deserialize;

use crate::blog::{filter_by_title, Blog, BlogEntry};
use crate::post::Post;
use crate::util::Result;

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
  #[serde(default)]
  pub q: Option<String>,
}

pub async fn list_posts(
  Extension(blog): Extension<Blog>,
) -> Result<Json<Vec<Post>>> {
  Ok(Json(blog.local_posts().await?))
}

pub async fn list_entries(
  Extension(blog): Extension<Blog>,
  Query(SearchQuery { q }): Query<SearchQuery>,
) -> Json<Vec<BlogEntry>> {
  let entries = blog.entries().await;
  let query = q.unwrap_or_default();
  let filtered = filter_by_title(&entries, &query)
    .into_iter()
    .cloned()
    .collect();
  Json(filtered)
}
