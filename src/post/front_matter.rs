use serde::Deserialize;

use super::{Author, OgImage};

const DELIMITER: &str = "---";

/// Metadata block at the top of a post. A `slug` key, if present, is
/// ignored: slugs always come from the filename.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
  pub title: String,
  pub date: String,
  #[serde(default)]
  pub cover_image: String,
  #[serde(default)]
  pub excerpt: String,
  #[serde(default)]
  pub author: Author,
  #[serde(default)]
  pub og_image: Option<OgImage>,
}

impl FrontMatter {
  pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
  }
}

/// Splits a markdown document into its front matter source and body.
///
/// A document without an opening `---` line has an empty front matter
/// block. An unterminated block swallows the whole file.
pub fn split(document: &str) -> (&str, &str) {
  let document = document.strip_prefix('\u{feff}').unwrap_or(document);
  let Some(rest) = strip_delimiter_line(document) else {
    return ("", document);
  };

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == DELIMITER {
      let front = &rest[..offset];
      let body = &rest[offset + line.len()..];
      return (front, body.strip_prefix('\n').unwrap_or(body));
    }
    offset += line.len();
  }

  (rest, "")
}

fn strip_delimiter_line(document: &str) -> Option<&str> {
  let (first, rest) = match document.split_once('\n') {
    Some((first, rest)) => (first, rest),
    None => (document, ""),
  };
  (first.trim_end() == DELIMITER).then_some(rest)
}
