use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::excerpt;
use super::extension::ExtensionExt;

/// One entry of an external feed, normalized for display.
///
/// Items are identified by `link` only; the same story syndicated by two
/// feeds shows up twice.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
  pub title: String,
  pub link: String,
  pub pub_date: String,
  pub content_snippet: String,
  /// Empty when no image could be found.
  pub image_url: String,
  #[serde(rename = "content:encoded")]
  pub content_encoded: String,
  pub description: String,
  pub content: String,
}

impl FeedItem {
  pub fn image(&self) -> Option<&str> {
    Some(self.image_url.as_str()).filter(|url| !url.is_empty())
  }
}

/// The fields of an RSS item or Atom entry that feed into a [`FeedItem`],
/// before any fallbacks are applied.
#[derive(Debug, Default, Clone)]
pub struct RawItem {
  pub title: Option<String>,
  pub link: Option<String>,
  pub pub_date: Option<String>,
  pub content_encoded: Option<String>,
  pub description: Option<String>,
  pub content: Option<String>,
  pub media_url: Option<String>,
  pub enclosure_url: Option<String>,
}

impl RawItem {
  pub fn into_feed_item(self, excerpt_length: usize) -> FeedItem {
    let content_encoded = non_empty(self.content_encoded).unwrap_or_default();
    let description = non_empty(self.description).unwrap_or_default();
    let content = non_empty(self.content).unwrap_or_default();

    let image_url = non_empty(self.media_url)
      .or_else(|| non_empty(self.enclosure_url))
      .or_else(|| excerpt::first_image(&content_encoded).map(str::to_owned))
      .unwrap_or_default();

    let content_snippet =
      excerpt::excerpt(&content_encoded, &description, &content, excerpt_length);

    FeedItem {
      title: non_empty(self.title).unwrap_or_else(|| "No title".into()),
      link: non_empty(self.link).unwrap_or_else(|| "#".into()),
      pub_date: non_empty(self.pub_date).unwrap_or_else(|| {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
      }),
      content_snippet,
      image_url,
      content_encoded,
      description,
      content,
    }
  }
}

impl From<&rss::Item> for RawItem {
  fn from(item: &rss::Item) -> Self {
    let dc_date = item
      .dublin_core_ext
      .as_ref()
      .and_then(|dc| dc.dates().first().cloned());

    Self {
      title: item.title.clone(),
      link: item.link.clone(),
      pub_date: item.pub_date.clone().or(dc_date),
      content_encoded: item.content.clone(),
      description: item.description.clone(),
      content: None,
      media_url: item
        .extensions
        .first_attr("media:content", "url")
        .map(str::to_owned),
      enclosure_url: item.enclosure.as_ref().map(|e| e.url.clone()),
    }
  }
}

impl From<&atom_syndication::Entry> for RawItem {
  fn from(entry: &atom_syndication::Entry) -> Self {
    let link = entry
      .links
      .iter()
      .find(|l| l.rel == "alternate")
      .or_else(|| entry.links.first())
      .map(|l| l.href.clone());
    let enclosure_url = entry
      .links
      .iter()
      .find(|l| l.rel == "enclosure")
      .map(|l| l.href.clone());
    let pub_date = entry.published.unwrap_or(entry.updated);

    Self {
      title: Some(entry.title.value.clone()),
      link,
      pub_date: Some(pub_date.to_rfc3339()),
      content_encoded: None,
      description: entry.summary.as_ref().map(|s| s.value.clone()),
      content: entry.content.as_ref().and_then(|c| c.value.clone()),
      media_url: entry
        .extensions
        .first_attr("media:content", "url")
        .map(str::to_owned),
      enclosure_url,
    }
  }
}

// feeds often carry empty elements; treat them like missing ones
fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
