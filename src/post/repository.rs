use std::cmp::Reverse;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::front_matter::{self, FrontMatter};
use super::slug::{filename_to_slug, slug_to_filename};
use super::Post;
use crate::util::date::parse_date;
use crate::util::{Error, Result};

/// Read-only view over a flat directory of markdown posts. Nothing is
/// cached; every call goes to the filesystem.
#[derive(Clone, Debug)]
pub struct PostRepository {
  root: PathBuf,
}

impl PostRepository {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Lists the directory entries (not recursive), markdown or not.
  pub fn post_slugs(&self) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(&self.root)? {
      let entry = entry?;
      if !entry.path().is_file() {
        continue;
      }
      match entry.file_name().into_string() {
        Ok(name) => names.push(name),
        Err(name) => warn!("skipping non-UTF-8 filename {name:?}"),
      }
    }
    Ok(names)
  }

  /// Loads a post by filename (`foo bar.md`) or by slug (`foo%20bar`).
  pub fn post_by_slug(&self, identifier: &str) -> Result<Post> {
    let filename = if is_markdown(identifier) {
      identifier.to_owned()
    } else {
      slug_to_filename(identifier)
    };
    let filename = filename.trim_start_matches('/');
    debug!("resolved {identifier:?} to {filename:?}");

    let path = self
      .resolve(filename)
      .ok_or_else(|| Error::PostNotFound(identifier.to_owned()))?;

    let document = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
      std::io::ErrorKind::NotFound => Error::PostNotFound(identifier.into()),
      _ => Error::Io(e),
    })?;

    let (front, body) = front_matter::split(&document);
    let meta = FrontMatter::parse(front)
      .map_err(|source| Error::FrontMatter { path, source })?;

    Ok(Post::from_parts(filename_to_slug(filename), meta, body.to_owned()))
  }

  /// Every loadable post, newest first. Posts that fail to load are logged
  /// and left out.
  pub fn all_posts(&self) -> Result<Vec<Post>> {
    let filenames = self.post_slugs()?;
    debug!(
      "found {} entries in {}",
      filenames.len(),
      self.root.display()
    );

    let mut posts: Vec<Post> = filenames
      .iter()
      .filter(|name| {
        let keep = is_markdown(name);
        if !keep {
          debug!("skipping non-markdown file {name:?}");
        }
        keep
      })
      .filter_map(|name| match self.post_by_slug(name) {
        Ok(post) => Some(post),
        Err(e) => {
          warn!("failed to load post {name:?}: {e}");
          None
        }
      })
      .collect();

    sort_newest_first(&mut posts);
    debug!("loaded {} posts", posts.len());
    Ok(posts)
  }

  // Only a single plain file name is accepted; anything else could leave
  // the content root.
  fn resolve(&self, filename: &str) -> Option<PathBuf> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
      (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
      _ => None,
    }
  }
}

fn is_markdown(name: &str) -> bool {
  name.to_lowercase().ends_with(".md")
}

// Unparseable dates go last and are ordered by their raw text.
fn sort_newest_first(posts: &mut [Post]) {
  posts.sort_by_cached_key(|post| {
    Reverse((parse_date(&post.date), post.date.clone()))
  });
}
