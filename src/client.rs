mod cache;

use std::num::NonZeroUsize;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::cache::TimedLruCache;
use crate::util::{ConfigError, Result};

pub use self::cache::Response;

#[derive(Deserialize, Debug, Clone)]
pub struct ClientConfig {
  user_agent: Option<String>,
  accept: Option<String>,
  referer: Option<String>,
  /// Number of responses to keep. Zero disables caching.
  #[serde(default)]
  cache_size: usize,
  #[serde(deserialize_with = "duration_str::deserialize_duration")]
  #[serde(default = "default_cache_ttl")]
  cache_ttl: Duration,
  #[serde(default = "default_timeout")]
  #[serde(deserialize_with = "duration_str::deserialize_duration")]
  timeout: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      user_agent: None,
      accept: None,
      referer: None,
      cache_size: 0,
      cache_ttl: default_cache_ttl(),
      timeout: default_timeout(),
    }
  }
}

impl ClientConfig {
  fn to_builder(&self) -> Result<reqwest::ClientBuilder, ConfigError> {
    let mut builder = reqwest::Client::builder();

    if let Some(user_agent) = &self.user_agent {
      builder = builder.user_agent(user_agent);
    } else {
      builder = builder.user_agent(crate::util::USER_AGENT);
    }

    let mut header_map = HeaderMap::new();
    if let Some(accept) = &self.accept {
      header_map.append("Accept", header_value("accept", accept)?);
    }

    if let Some(referer) = &self.referer {
      header_map.append("Referer", header_value("referer", referer)?);
    }

    if !header_map.is_empty() {
      builder = builder.default_headers(header_map);
    }

    Ok(builder.timeout(self.timeout))
  }

  pub fn build(&self) -> Result<Client> {
    let reqwest_client = self.to_builder()?.build()?;
    let cache = NonZeroUsize::new(self.cache_size)
      .map(|size| TimedLruCache::new(size, self.cache_ttl));

    Ok(Client {
      cache,
      client: reqwest_client,
    })
  }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
  HeaderValue::from_str(value)
    .map_err(|e| ConfigError::Message(format!("invalid {name} header: {e}")))
}

pub struct Client {
  cache: Option<TimedLruCache<Url, Response>>,
  client: reqwest::Client,
}

impl Client {
  pub async fn get(&self, url: &Url) -> Result<Response> {
    self.get_with(url, |req| req).await
  }

  pub async fn get_with(
    &self,
    url: &Url,
    f: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
  ) -> Result<Response> {
    #[cfg(test)]
    if url.scheme() == "fixture" {
      return Response::from_fixture(url);
    }

    if let Some(resp) = self.cache.as_ref().and_then(|c| c.get_cached(url)) {
      return Ok(resp);
    }

    let resp = f(self.client.get(url.clone())).send().await?;
    let resp = Response::from_reqwest_resp(resp).await?;
    if let Some(cache) = &self.cache {
      cache.insert(url.clone(), resp.clone());
    }
    Ok(resp)
  }
}

fn default_timeout() -> Duration {
  Duration::from_secs(10)
}

fn default_cache_ttl() -> Duration {
  Duration::from_secs(10 * 60)
}
