mod search;

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::client::Client;
use crate::feed::{fetch_feeds, FeedItem};
use crate::post::{Post, PostRepository};
use crate::util::date::parse_date;
use crate::util::Result;

pub use search::{Key, SearchState};

/// An entry in the blog listing, either a local post or a syndicated item.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum BlogEntry {
  Local(Post),
  Feed(FeedItem),
}

/// Where selecting an entry leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  External(String),
  Local(String),
}

impl Target {
  pub fn href(&self) -> &str {
    match self {
      Target::External(href) | Target::Local(href) => href,
    }
  }
}

impl BlogEntry {
  pub fn title(&self) -> &str {
    match self {
      BlogEntry::Local(post) => &post.title,
      BlogEntry::Feed(item) => &item.title,
    }
  }

  /// The date as written by the source (`date` or `pubDate`).
  pub fn date(&self) -> &str {
    match self {
      BlogEntry::Local(post) => &post.date,
      BlogEntry::Feed(item) => &item.pub_date,
    }
  }

  pub fn summary(&self) -> &str {
    match self {
      BlogEntry::Local(post) => &post.excerpt,
      BlogEntry::Feed(item) => &item.content_snippet,
    }
  }

  pub fn image(&self) -> Option<&str> {
    match self {
      BlogEntry::Local(post) => {
        Some(post.cover_image.as_str()).filter(|s| !s.is_empty())
      }
      BlogEntry::Feed(item) => item.image(),
    }
  }

  pub fn target(&self) -> Target {
    match self {
      BlogEntry::Local(post) => Target::Local(post.route()),
      BlogEntry::Feed(item) => Target::External(item.link.clone()),
    }
  }

  /// Missing or unreadable dates count as `now`.
  pub fn timestamp(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    parse_date(self.date()).unwrap_or(now)
  }

  pub fn title_matches(&self, query: &str) -> bool {
    self.title().to_lowercase().contains(&query.to_lowercase())
  }
}

/// Local posts and feed items in one list, newest first. Entries with
/// equal dates keep their input order, local posts ahead of feed items.
pub fn merge(posts: Vec<Post>, items: Vec<FeedItem>) -> Vec<BlogEntry> {
  let now = Utc::now().fixed_offset();
  let mut entries: Vec<BlogEntry> = posts
    .into_iter()
    .map(BlogEntry::Local)
    .chain(items.into_iter().map(BlogEntry::Feed))
    .collect();

  entries.sort_by_cached_key(|entry| Reverse(entry.timestamp(now)));
  entries
}

/// Case-insensitive substring match on titles. A blank query matches
/// everything.
pub fn filter_by_title<'a>(
  entries: &'a [BlogEntry],
  query: &str,
) -> Vec<&'a BlogEntry> {
  if query.trim().is_empty() {
    return entries.iter().collect();
  }
  entries.iter().filter(|e| e.title_matches(query)).collect()
}

/// Everything the blog pages need: the post repository plus the feeds to
/// merge in.
#[derive(Clone)]
pub struct Blog {
  repo: PostRepository,
  client: Arc<Client>,
  feeds: Arc<[Url]>,
  excerpt_length: usize,
}

impl Blog {
  pub fn new(
    repo: PostRepository,
    client: Client,
    feeds: Vec<Url>,
    excerpt_length: usize,
  ) -> Self {
    Self {
      repo,
      client: Arc::new(client),
      feeds: feeds.into(),
      excerpt_length,
    }
  }

  pub fn client(&self) -> &Client {
    &self.client
  }

  pub async fn local_posts(&self) -> Result<Vec<Post>> {
    let repo = self.repo.clone();
    tokio::task::spawn_blocking(move || repo.all_posts()).await?
  }

  pub async fn post(&self, slug: &str) -> Result<Post> {
    let repo = self.repo.clone();
    let slug = slug.to_owned();
    tokio::task::spawn_blocking(move || repo.post_by_slug(&slug)).await?
  }

  pub async fn feed_items(&self) -> Vec<FeedItem> {
    fetch_feeds(&self.client, &self.feeds, self.excerpt_length).await
  }

  /// Reads local posts and fetches all feeds concurrently, then merges.
  /// Neither side failing prevents the other from showing up.
  pub async fn entries(&self) -> Vec<BlogEntry> {
    let (posts, items) = tokio::join!(self.local_posts(), self.feed_items());
    let posts = posts.unwrap_or_else(|e| {
      warn!("failed to read posts from {}: {e}", self.repo.root().display());
      Vec::new()
    });

    info!("merging {} posts with {} feed items", posts.len(), items.len());
    merge(posts, items)
  }

  pub async fn local_entries(&self) -> Result<Vec<BlogEntry>> {
    Ok(merge(self.local_posts().await?, Vec::new()))
  }
}
