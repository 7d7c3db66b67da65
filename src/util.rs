pub mod date;

use std::path::PathBuf;

pub const USER_AGENT: &str =
  concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("YAML parse error")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Failed to read config file")]
  Io(#[from] std::io::Error),

  #[error("{0}")]
  Message(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("IO error")]
  Io(#[from] std::io::Error),

  #[error("RSS error")]
  Rss(#[from] rss::Error),

  #[error("Atom error")]
  Atom(#[from] atom_syndication::Error),

  #[error("Invalid URL {0}")]
  InvalidUrl(#[from] url::ParseError),

  #[error("Reqwest client error {0:?}")]
  Reqwest(#[from] reqwest::Error),

  #[error("HTTP status error {0} (url: {1})")]
  HttpStatus(reqwest::StatusCode, url::Url),

  #[error("Bad front matter in {path}: {source}")]
  FrontMatter {
    path: PathBuf,
    source: serde_yaml::Error,
  },

  #[error("Post not found: {0}")]
  PostNotFound(String),

  #[error("Background task failed")]
  Join(#[from] tokio::task::JoinError),

  #[error("Config error {0:?}")]
  Config(#[from] ConfigError),
}
