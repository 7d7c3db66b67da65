use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::blog::Blog;
use crate::client::ClientConfig;
use crate::feed::excerpt::DEFAULT_EXCERPT_LENGTH;
use crate::post::PostRepository;
use crate::util::{ConfigError, Result};

/// Site configuration, loaded from a YAML file.
///
/// ```yaml
/// content_root: ./_posts
/// excerpt_length: 150
/// feeds:
///   - https://medium.com/feed/@someone
/// client:
///   timeout: 10s
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct SiteConfig {
  /// Directory holding the markdown posts. Relative paths are resolved
  /// against the directory of the config file.
  pub content_root: PathBuf,
  #[serde(default)]
  pub feeds: Vec<Url>,
  /// Character budget for feed item excerpts, ellipsis included.
  #[serde(default = "default_excerpt_length")]
  pub excerpt_length: usize,
  #[serde(default)]
  pub client: ClientConfig,
}

impl SiteConfig {
  pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = Self::parse(&content)?;

    if config.content_root.is_relative() {
      let base = path.parent().unwrap_or_else(|| Path::new("."));
      config.content_root = base.join(&config.content_root);
    }
    Ok(config)
  }

  pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_yaml::from_str(yaml)?;
    if config.excerpt_length <= 3 {
      return Err(ConfigError::Message(format!(
        "excerpt_length must leave room for an ellipsis (got {})",
        config.excerpt_length
      )));
    }
    Ok(config)
  }

  pub fn build_blog(&self) -> Result<Blog> {
    let client = self.client.build()?;
    let repo = PostRepository::new(&self.content_root);
    Ok(Blog::new(
      repo,
      client,
      self.feeds.clone(),
      self.excerpt_length,
    ))
  }
}

fn default_excerpt_length() -> usize {
  DEFAULT_EXCERPT_LENGTH
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_parse_minimal() {
    let config = SiteConfig::parse("content_root: _posts").unwrap();
    assert_eq!(config.content_root, PathBuf::from("_posts"));
    assert!(config.feeds.is_empty());
    assert_eq!(config.excerpt_length, 150);
  }

  #[test]
  fn test_parse_full() {
    let config = SiteConfig::parse(
      r#"
      content_root: /srv/blog/_posts
      excerpt_length: 80
      feeds:
        - https://medium.com/feed/@joshpeterson
        - https://rss.app/feeds/example.xml
      client:
        timeout: 5s
      "#,
    )
    .unwrap();
    assert_eq!(config.excerpt_length, 80);
    assert_eq!(config.feeds.len(), 2);
    assert_eq!(config.feeds[0].host_str(), Some("medium.com"));
    assert!(config.build_blog().is_ok());
  }

  #[test]
  fn test_parse_errors() {
    assert!(SiteConfig::parse("feeds: []").is_err());
    assert!(SiteConfig::parse("content_root: x\nfeeds: [not a url]").is_err());
    assert!(SiteConfig::parse("content_root: x\nexcerpt_length: 2").is_err());
  }

  #[test]
  fn test_relative_root_follows_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.yaml");
    std::fs::write(&path, "content_root: _posts\n").unwrap();

    let config = SiteConfig::load_from_file(&path).unwrap();
    assert_eq!(config.content_root, dir.path().join("_posts"));
  }
}
