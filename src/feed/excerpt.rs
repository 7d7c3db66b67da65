//! Best-effort text and image extraction from feed item HTML.

use lazy_static::lazy_static;
use regex::Regex;

pub const DEFAULT_EXCERPT_LENGTH: usize = 150;
pub const NO_CONTENT: &str = "No content";
const ELLIPSIS: &str = "...";

lazy_static! {
  static ref CDATA: Regex = Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap();
  static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
  static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
  static ref PARAGRAPH: Regex =
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p>").unwrap();
  static ref IMG_SRC: Regex =
    Regex::new(r#"(?is)<img.*?src=["'](.*?)["']"#).unwrap();
}

/// Visible text of an HTML fragment: CDATA unwrapped, tags dropped and
/// whitespace collapsed.
pub fn strip_html(html: &str) -> String {
  let text = CDATA.replace_all(html, "$1");
  let text = TAG.replace_all(&text, " ");
  WHITESPACE.replace_all(&text, " ").trim().to_owned()
}

/// Cuts `text` to at most `budget` characters, the last three of which
/// become an ellipsis when anything was removed.
pub fn truncate(text: &str, budget: usize) -> String {
  if text.chars().count() <= budget {
    return text.to_owned();
  }

  let kept: String = text
    .chars()
    .take(budget.saturating_sub(ELLIPSIS.len()))
    .collect();
  kept + ELLIPSIS
}

pub fn first_paragraph(html: &str) -> Option<&str> {
  PARAGRAPH
    .captures(html)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str())
}

pub fn first_image(html: &str) -> Option<&str> {
  IMG_SRC
    .captures(html)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str())
    .filter(|src| !src.is_empty())
}

/// Picks the first candidate with visible text and turns it into a
/// plain-text excerpt. Encoded content contributes its first paragraph
/// before the whole body is considered.
pub fn excerpt(
  content_encoded: &str,
  description: &str,
  content: &str,
  budget: usize,
) -> String {
  let candidates = [
    first_paragraph(content_encoded).unwrap_or_default(),
    content_encoded,
    description,
    content,
  ];

  candidates
    .into_iter()
    .map(strip_html)
    .find(|text| !text.is_empty())
    .map(|text| truncate(&text, budget))
    .unwrap_or_else(|| NO_CONTENT.to_owned())
}
