use std::sync::Arc;

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use reqwest::StatusCode;
use url::Url;

use crate::util::{Error, Result};

/// A fetched feed document, fully buffered so it can sit in the response
/// cache and be handed out to several readers.
#[derive(Clone)]
pub struct Response {
  inner: Arc<Fetched>,
}

struct Fetched {
  url: Url,
  status: StatusCode,
  content_type: Option<Mime>,
  body: Box<[u8]>,
}

impl Response {
  pub async fn from_reqwest_resp(resp: reqwest::Response) -> Result<Self> {
    let url = resp.url().clone();
    let status = resp.status();
    let content_type = resp
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.parse().ok());
    let body = resp.bytes().await?.to_vec().into_boxed_slice();

    Ok(Self::new(url, status, content_type, body))
  }

  fn new(
    url: Url,
    status: StatusCode,
    content_type: Option<Mime>,
    body: Box<[u8]>,
  ) -> Self {
    let inner = Fetched {
      url,
      status,
      content_type,
      body,
    };
    Self {
      inner: Arc::new(inner),
    }
  }

  // fixture:///name.xml reads fixtures/name.xml; a missing file fails the
  // same way an unreachable host would
  #[cfg(test)]
  pub(super) fn from_fixture(url: &Url) -> Result<Self> {
    let path = format!("{}/fixtures{}", env!("CARGO_MANIFEST_DIR"), url.path());
    let body = std::fs::read(path)?.into_boxed_slice();
    let content_type = url
      .query_pairs()
      .find(|(k, _)| k == "content_type")
      .and_then(|(_, v)| v.parse().ok())
      .or(Some(mime::TEXT_XML));

    Ok(Self::new(url.clone(), StatusCode::OK, content_type, body))
  }

  pub fn error_for_status(self) -> Result<Self> {
    let status = self.inner.status;
    if status.is_client_error() || status.is_server_error() {
      return Err(Error::HttpStatus(status, self.inner.url.clone()));
    }
    Ok(self)
  }

  pub fn status(&self) -> StatusCode {
    self.inner.status
  }

  pub fn body(&self) -> &[u8] {
    &self.inner.body
  }

  /// Encoding named by the `charset` parameter, UTF-8 when absent or
  /// unknown.
  pub fn encoding(&self) -> &'static Encoding {
    self
      .inner
      .content_type
      .as_ref()
      .and_then(|mime| mime.get_param(mime::CHARSET))
      .and_then(|charset| Encoding::for_label(charset.as_str().as_bytes()))
      .unwrap_or(UTF_8)
  }

  /// The body decoded to text. Malformed sequences are replaced rather
  /// than rejected.
  pub fn text(&self) -> String {
    let (text, _, _) = self.encoding().decode(self.body());
    text.into_owned()
  }
}
