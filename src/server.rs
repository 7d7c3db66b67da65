mod endpoint;
mod relay;
mod web;

use axum::{
  response::{IntoResponse, Response},
  routing::get,
  Extension, Json, Router,
};
use clap::Parser;
use http::StatusCode;
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::blog::Blog;
use crate::util::{Error, Result};

#[derive(Parser)]
pub struct ServerConfig {
  #[clap(long, short, default_value = "127.0.0.1:4080")]
  bind: String,
}

impl ServerConfig {
  pub async fn run(self, blog: Blog) -> Result<()> {
    info!("listening on {}", self.bind);
    let listener = tokio::net::TcpListener::bind(&self.bind).await?;

    info!("starting server");
    Ok(axum::serve(listener, router(blog)).await?)
  }
}

pub fn router(blog: Blog) -> Router {
  Router::new()
    .route("/api/posts", get(endpoint::list_posts))
    .route("/api/blog", get(endpoint::list_entries))
    .route("/api/proxy-rss", get(relay::handler))
    .route("/blog", get(web::blog_page))
    .route("/posts/:slug", get(web::post_page))
    .route("/", get(|| async { "folio is up and running!" }))
    .route("/health", get(|| async { "ok" }))
    .fallback(get(|| async { (StatusCode::NOT_FOUND, "Endpoint not found") }))
    .layer(Extension(blog))
    .layer(CompressionLayer::new().gzip(true))
}

fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
  let body = json!({ "error": message.into() });
  (status, Json(body)).into_response()
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::PostNotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_json(status, self.to_string())
  }
}

#[cfg(test)]
mod test {
  use axum::body::Body;
  use tower::ServiceExt;
  use url::Url;

  use super::*;
  use crate::client::ClientConfig;
  use crate::post::PostRepository;

  pub(super) struct TestSite {
    pub dir: tempfile::TempDir,
    pub app: Router,
  }

  pub(super) fn site(feeds: &[&str]) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let posts = [
      ("hello world.md", "Hello world", "2024-06-01"),
      ("first-post.md", "First post", "2024-01-01"),
    ];
    for (name, title, date) in posts {
      std::fs::write(
        dir.path().join(name),
        format!(
          "---\ntitle: {title}\ndate: {date}\nexcerpt: Intro to {title}\n\
           coverImage: /img/cover.jpg\n---\n\n# {title} heading\n\nSome *body*.\n"
        ),
      )
      .unwrap();
    }
    std::fs::write(dir.path().join("broken.md"), "no front matter").unwrap();

    let feeds = feeds.iter().map(|u| Url::parse(u).unwrap()).collect();
    let client = ClientConfig::default().build().unwrap();
    let blog = Blog::new(PostRepository::new(dir.path()), client, feeds, 150);

    TestSite {
      dir,
      app: router(blog),
    }
  }

  pub(super) async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = http::Request::builder()
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
  }

  #[tokio::test]
  async fn test_health_and_fallback() {
    let site = site(&[]);
    assert_eq!(get(&site.app, "/health").await, (StatusCode::OK, "ok".into()));

    let (status, _) = get(&site.app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[test]
  fn test_error_status() {
    let resp = Error::PostNotFound("x".into()).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = Error::Io(std::io::Error::other("boom")).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
