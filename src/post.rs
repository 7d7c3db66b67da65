mod front_matter;
mod repository;
pub mod slug;

use serde::{Deserialize, Serialize};

pub use front_matter::FrontMatter;
pub use repository::PostRepository;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Author {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub picture: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct OgImage {
  pub url: String,
}

/// A locally authored markdown post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub slug: String,
  pub title: String,
  pub date: String,
  pub cover_image: String,
  pub excerpt: String,
  pub author: Author,
  pub og_image: OgImage,
  /// Raw markdown body, front matter removed.
  pub content: String,
}

impl Post {
  pub fn from_parts(slug: String, meta: FrontMatter, content: String) -> Self {
    let og_image = meta.og_image.unwrap_or_else(|| OgImage {
      url: meta.cover_image.clone(),
    });

    Self {
      slug,
      title: meta.title,
      date: meta.date,
      cover_image: meta.cover_image,
      excerpt: meta.excerpt,
      author: meta.author,
      og_image,
      content,
    }
  }

  pub fn route(&self) -> String {
    format!("/posts/{}", self.slug)
  }
}
