mod aggregator;
pub mod excerpt;
mod extension;
mod item;

use crate::util::Result;

pub use aggregator::{fetch_feed, fetch_feeds};
pub use item::{FeedItem, RawItem};

#[derive(Clone, Debug, PartialEq)]
pub enum Feed {
  Rss(rss::Channel),
  Atom(atom_syndication::Feed),
}

impl Feed {
  pub fn from_rss_content(content: &[u8]) -> Result<Self> {
    let cursor = std::io::Cursor::new(content);
    let channel = rss::Channel::read_from(cursor)?;
    Ok(Feed::Rss(channel))
  }

  pub fn from_atom_content(content: &[u8]) -> Result<Self> {
    let cursor = std::io::Cursor::new(content);
    let feed = atom_syndication::Feed::read_from(cursor)?;
    Ok(Feed::Atom(feed))
  }

  /// Tries RSS first, then Atom. The RSS error is reported when both fail.
  pub fn from_xml_content(content: &[u8]) -> Result<Self> {
    Feed::from_rss_content(content).or_else(|rss_err| {
      Feed::from_atom_content(content).map_err(|_| rss_err)
    })
  }

  pub fn title(&self) -> &str {
    match self {
      Feed::Rss(channel) => &channel.title,
      Feed::Atom(feed) => feed.title.as_str(),
    }
  }

  pub fn raw_items(&self) -> Vec<RawItem> {
    match self {
      Feed::Rss(channel) => channel.items.iter().map(RawItem::from).collect(),
      Feed::Atom(feed) => feed.entries.iter().map(RawItem::from).collect(),
    }
  }

  pub fn into_items(self, excerpt_length: usize) -> Vec<FeedItem> {
    self
      .raw_items()
      .into_iter()
      .map(|raw| raw.into_feed_item(excerpt_length))
      .collect()
  }
}
