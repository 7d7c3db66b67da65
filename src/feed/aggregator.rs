use futures::future::join_all;
use tracing::{debug, warn};
use url::Url;

use super::{Feed, FeedItem};
use crate::client::Client;
use crate::util::Result;

const FEED_ACCEPT: &str = "application/rss+xml, application/atom+xml, \
                           application/xml;q=0.9, text/xml;q=0.9, */*;q=0.8";

/// Fetches and parses a single feed.
pub async fn fetch_feed(
  client: &Client,
  url: &Url,
  excerpt_length: usize,
) -> Result<Vec<FeedItem>> {
  let resp = client
    .get_with(url, |req| req.header("Accept", FEED_ACCEPT))
    .await?
    .error_for_status()?;
  let content = resp.text();
  let feed = Feed::from_xml_content(content.as_bytes())?;
  debug!("parsed feed {:?} from {url}", feed.title());
  Ok(feed.into_items(excerpt_length))
}

/// Fetches every feed concurrently and concatenates the items in `urls`
/// order. A feed that fails contributes no items; the others are
/// unaffected.
pub async fn fetch_feeds(
  client: &Client,
  urls: &[Url],
  excerpt_length: usize,
) -> Vec<FeedItem> {
  let fetches = urls.iter().map(|url| async move {
    (url, fetch_feed(client, url, excerpt_length).await)
  });

  join_all(fetches)
    .await
    .into_iter()
    .flat_map(|(url, outcome)| match outcome {
      Ok(items) => {
        debug!("fetched {} items from {url}", items.len());
        items
      }
      Err(e) => {
        warn!("failed to fetch feed {url}: {e}");
        Vec::new()
      }
    })
    .collect()
}
