//! Conversion between post filenames on disk and the slugs used in URLs.
//!
//! Slugs use the same character set as JavaScript's `encodeURIComponent`
//! so that links produced by older versions of the site keep resolving.

use std::borrow::Cow;

use tracing::{debug, warn};

const MARKDOWN_EXT: &str = ".md";

/// `encodeURIComponent` leaves these unescaped while `urlencoding`
/// escapes them.
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
  ("%21", "!"),
  ("%27", "'"),
  ("%28", "("),
  ("%29", ")"),
  ("%2A", "*"),
];

/// Strips the markdown extension and percent-encodes the rest.
///
/// Input that already looks encoded (contains `%`) is passed through as-is.
/// A filename with a literal `%` is therefore never encoded, which is a
/// known ambiguity.
pub fn filename_to_slug(filename: &str) -> String {
  let stem = filename.strip_suffix(MARKDOWN_EXT).unwrap_or(filename);

  if stem.contains("%25") {
    debug!("filename already double-encoded: {stem}");
    return stem.to_owned();
  }
  if stem.contains('%') {
    debug!("filename already encoded: {stem}");
    return stem.to_owned();
  }

  let mut slug = urlencoding::encode(stem).into_owned();
  for (escaped, mark) in URI_COMPONENT_MARKS {
    slug = slug.replace(escaped, mark);
  }
  slug
}

/// Decodes a slug (twice if it was double-encoded) and appends `.md`.
pub fn slug_to_filename(slug: &str) -> String {
  let decoded = if slug.contains("%25") {
    debug!("decoding double-encoded slug: {slug}");
    decode(slug).and_then(|once| decode(&once).map(Cow::into_owned))
  } else {
    decode(slug).map(Cow::into_owned)
  };

  let decoded = decoded.unwrap_or_else(|| {
    warn!("failed to decode slug {slug:?}, using it verbatim");
    slug.to_owned()
  });

  if decoded.ends_with(MARKDOWN_EXT) {
    decoded
  } else {
    format!("{decoded}{MARKDOWN_EXT}")
  }
}

fn decode(s: &str) -> Option<Cow<'_, str>> {
  urlencoding::decode(s).ok()
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_filename_to_slug() {
    assert_eq!(filename_to_slug("hello-world.md"), "hello-world");
    assert_eq!(filename_to_slug("hello world.md"), "hello%20world");
    assert_eq!(
      filename_to_slug("What's new (2024)!.md"),
      "What's%20new%20(2024)!"
    );
    assert_eq!(filename_to_slug("café.md"), "caf%C3%A9");
    assert_eq!(filename_to_slug("no-extension"), "no-extension");
  }

  #[test]
  fn test_encoded_input_passes_through() {
    assert_eq!(filename_to_slug("hello%20world.md"), "hello%20world");
    assert_eq!(filename_to_slug("hello%2520world"), "hello%2520world");
    // literal percent signs are indistinguishable from encoded input
    assert_eq!(filename_to_slug("100% done.md"), "100% done");
  }

  #[test]
  fn test_slug_to_filename() {
    assert_eq!(slug_to_filename("hello-world"), "hello-world.md");
    assert_eq!(slug_to_filename("hello%20world"), "hello world.md");
    assert_eq!(slug_to_filename("hello%2520world"), "hello world.md");
    assert_eq!(slug_to_filename("already.md"), "already.md");
    assert_eq!(slug_to_filename("caf%C3%A9"), "café.md");
  }

  #[test]
  fn test_undecodable_slug_is_used_verbatim() {
    // %FF alone is not valid UTF-8
    assert_eq!(slug_to_filename("bad%FFslug"), "bad%FFslug.md");
  }

  #[test]
  fn test_round_trip_without_percent() {
    let filenames = [
      "simple.md",
      "with spaces and, commas.md",
      "quotes 'single' and `back`.md",
      "ampersand & friends.md",
      "ünïcödé 日本語.md",
      "what? #hash.md",
      "(parens)*star*!bang~tilde.md",
    ];

    for filename in filenames {
      let slug = filename_to_slug(filename);
      assert_eq!(slug_to_filename(&slug), filename, "slug was {slug}");
    }
  }
}
