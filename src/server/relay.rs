//! Same-origin relay so that browsers can read third-party feeds.

use axum::{
  extract::Query,
  response::{IntoResponse, Response},
  Extension,
};
use http::{header, StatusCode};
use serde::Deserialize;
use tracing::error;
use url::Url;

use super::error_json;
use crate::blog::Blog;
use crate::client::Client;
use crate::util::Result;

const RSS_CONTENT_TYPE: &str = "application/rss+xml";

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
pub struct RelayQuery {
  url: Option<String>,
}

pub async fn handler(
  Extension(blog): Extension<Blog>,
  Query(RelayQuery { url }): Query<RelayQuery>,
) -> Response {
  let Some(url) = url.filter(|url| !url.is_empty()) else {
    return error_json(StatusCode::BAD_REQUEST, "Missing RSS feed URL");
  };

  match fetch(blog.client(), &url).await {
    Ok(body) => {
      ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], body).into_response()
    }
    Err(e) => {
      error!("error relaying feed {url}: {e}");
      error_json(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch RSS feed")
    }
  }
}

// the upstream body is passed on whatever its status
async fn fetch(client: &Client, url: &str) -> Result<Vec<u8>> {
  let url = Url::parse(url)?;
  let resp = client.get(&url).await?;
  if !resp.status().is_success() {
    tracing::warn!("relaying {url} with upstream status {}", resp.status());
  }
  Ok(resp.body().to_vec())
}
