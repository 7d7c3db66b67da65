use axum::{
  extract::{Query, RawPathParams},
  Extension,
};
use http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::endpoint::SearchQuery;
use crate::blog::{Blog, BlogEntry, SearchState, Target};
use crate::markdown::markdown_to_html;
use crate::post::Post;
use crate::util::date::parse_date;
use crate::util::Error;

pub async fn blog_page(
  Extension(blog): Extension<Blog>,
  Query(SearchQuery { q }): Query<SearchQuery>,
) -> Markup {
  let mut search = SearchState::new(blog.entries().await);
  if let Some(q) = q {
    search.set_query(q);
  }

  let displayed = search.displayed();
  page(
    "Blog",
    html! {
      h1 { "Blog" }
      form method="get" action="/blog" {
        input type="search" name="q" value=(search.query())
          placeholder="Search blog posts...";
      }
      ul .entries {
        @for entry in &displayed {
          (entry_fragment(entry))
        }
        @if displayed.is_empty() {
          li { "No posts found." }
        }
      }
    },
  )
}

pub async fn post_page(
  params: RawPathParams,
  Extension(blog): Extension<Blog>,
) -> Result<Markup, (StatusCode, Markup)> {
  let raw = params
    .iter()
    .find_map(|(key, value)| (key == "slug").then_some(value))
    .unwrap_or_default();
  // a listed slug may hold escapes that are not valid UTF-8; those are
  // looked up undecoded
  let slug = urlencoding::decode(raw)
    .map(|decoded| decoded.into_owned())
    .unwrap_or_else(|_| raw.to_owned());

  match blog.post(&slug).await {
    Ok(post) => Ok(post_fragment(&post)),
    Err(Error::PostNotFound(_)) => Err((StatusCode::NOT_FOUND, not_found())),
    Err(e) => {
      tracing::warn!("failed to render post {slug:?}: {e}");
      Err((StatusCode::INTERNAL_SERVER_ERROR, page("Error", html! {
        h1 { "Something went wrong" }
      })))
    }
  }
}

fn post_fragment(post: &Post) -> Markup {
  let rendered = markdown_to_html(&post.content);

  page(
    &post.title,
    html! {
      article {
        h1 { (rendered.title_html(&post.title)) }
        @if !post.cover_image.is_empty() {
          img .cover src=(post.cover_image) alt=(post.title);
        }
        p .byline {
          @if !post.author.name.is_empty() {
            (post.author.name) " · "
          }
          time datetime=(post.date) { (display_date(&post.date)) }
        }
        (PreEscaped(&rendered.content))
      }
    },
  )
}

fn entry_fragment(entry: &BlogEntry) -> Markup {
  let target = entry.target();
  html! {
    li {
      @if let Some(image) = entry.image() {
        img src=(image) alt=(entry.title());
      }
      @match &target {
        Target::External(href) => {
          a href=(href) target="_blank" rel="noopener noreferrer" {
            (entry.title())
          }
        }
        Target::Local(href) => {
          a href=(href) { (entry.title()) }
        }
      }
      p .date { (display_date(entry.date())) }
      p { (entry.summary()) }
    }
  }
}

fn not_found() -> Markup {
  page(
    "Not found",
    html! {
      h1 { "404" }
      p { "This post could not be found." }
    },
  )
}

fn display_date(date: &str) -> String {
  match parse_date(date) {
    Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
    None => date.to_owned(),
  }
}

fn page(title: &str, body: Markup) -> Markup {
  html! {
    (DOCTYPE)
    head {
      title { (title) }
      meta charset="utf-8";
    }
    body {
      main { (body) }
    }
  }
}

#[cfg(test)]
mod test {
  use http::StatusCode;

  use super::super::test::{get, site};
  use super::display_date;

  #[tokio::test]
  async fn test_post_page() {
    let site = site(&[]);
    let (status, body) = get(&site.app, "/posts/hello%20world").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Hello world heading</h1>"));
    assert!(body.contains("<em>body</em>"));
    assert!(body.contains("June 1, 2024"));

    // double-encoded and raw filename forms reach the same post
    let (_, double) = get(&site.app, "/posts/hello%2520world").await;
    assert_eq!(double, body);
    let (_, by_name) = get(&site.app, "/posts/hello%20world.md").await;
    assert_eq!(by_name, body);
  }

  #[tokio::test]
  async fn test_post_not_found() {
    let site = site(&[]);
    let (status, body) = get(&site.app, "/posts/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("could not be found"));

    let (status, _) = get(&site.app, "/posts/..%2Fhello%20world").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn test_front_matter_title_escaped() {
    let site = site(&[]);
    std::fs::write(
      site.dir.path().join("generics.md"),
      "---\ntitle: \"Generics <script>alert(1)</script> & you\"\n\
       date: 2024-02-01\n---\n\nNo heading here.\n",
    )
    .unwrap();

    let (status, body) = get(&site.app, "/posts/generics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("<script>"));
    assert!(body.contains(
      "<h1>Generics &lt;script&gt;alert(1)&lt;/script&gt; &amp; you</h1>"
    ));
  }

  #[tokio::test]
  async fn test_slug_with_undecodable_escape() {
    let site = site(&[]);
    std::fs::write(
      site.dir.path().join("bad%FFslug.md"),
      "---\ntitle: Odd name\ndate: 2024-02-01\n---\n\nBody.\n",
    )
    .unwrap();

    let (status, body) = get(&site.app, "/posts/bad%FFslug").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Odd name</h1>"));
  }

  #[tokio::test]
  async fn test_broken_post() {
    let site = site(&[]);
    let (status, _) = get(&site.app, "/posts/broken").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[tokio::test]
  async fn test_blog_page_search() {
    let site = site(&["fixture:///newsletter.xml"]);
    let (status, body) = get(&site.app, "/blog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Hello world"));
    assert!(body.contains("Launch window roundup"));
    assert!(body.contains(r#"href="/posts/hello%20world""#));

    let (_, body) = get(&site.app, "/blog?q=first").await;
    assert!(body.contains("First post"));
    assert!(!body.contains("Hello world"));

    let (_, body) = get(&site.app, "/blog?q=zzz").await;
    assert!(body.contains("No posts found."));
  }

  #[test]
  fn test_display_date() {
    assert_eq!(display_date("2024-03-01"), "March 1, 2024");
    assert_eq!(display_date("whenever"), "whenever");
  }
}
