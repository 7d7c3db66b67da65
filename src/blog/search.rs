use super::{BlogEntry, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  Up,
  Down,
  Enter,
}

/// Title search over the merged listing with autocomplete suggestions and
/// a keyboard-driven selection cursor.
#[derive(Debug, Clone)]
pub struct SearchState {
  entries: Vec<BlogEntry>,
  query: String,
  displayed: Vec<usize>,
  suggestions: Vec<usize>,
  selected: Option<usize>,
}

impl SearchState {
  pub fn new(entries: Vec<BlogEntry>) -> Self {
    let displayed = (0..entries.len()).collect();
    Self {
      entries,
      query: String::new(),
      displayed,
      suggestions: Vec::new(),
      selected: None,
    }
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  /// The entries currently listed on the page.
  pub fn displayed(&self) -> Vec<&BlogEntry> {
    self.displayed.iter().map(|&i| &self.entries[i]).collect()
  }

  pub fn suggestions(&self) -> Vec<&BlogEntry> {
    self.suggestions.iter().map(|&i| &self.entries[i]).collect()
  }

  /// Index into [`Self::suggestions`] of the highlighted suggestion.
  pub fn selected(&self) -> Option<usize> {
    self.selected
  }

  /// Called on every edit of the search field.
  pub fn set_query(&mut self, query: impl Into<String>) {
    self.query = query.into();
    self.selected = None;

    if self.query.trim().is_empty() {
      self.suggestions.clear();
      self.displayed = self.all();
    } else {
      self.suggestions = self.matching(&self.query);
      self.displayed = self.suggestions.clone();
    }
  }

  /// Moves the cursor, or commits the highlighted suggestion on `Enter`.
  pub fn key(&mut self, key: Key) -> Option<Target> {
    match key {
      Key::Down => {
        let last = self.suggestions.len().checked_sub(1)?;
        self.selected = Some(match self.selected {
          Some(i) => (i + 1).min(last),
          None => 0,
        });
        None
      }
      Key::Up => {
        self.selected = self.selected.and_then(|i| i.checked_sub(1));
        None
      }
      Key::Enter => {
        let index = *self.suggestions.get(self.selected?)?;
        self.query = self.entries[index].title().to_owned();
        self.suggestions.clear();
        self.selected = None;
        Some(self.entries[index].target())
      }
    }
  }

  /// Clicking a suggestion narrows the listing to just that entry.
  pub fn choose(&mut self, suggestion: usize) {
    let Some(&index) = self.suggestions.get(suggestion) else {
      return;
    };
    self.query = self.entries[index].title().to_owned();
    self.displayed = vec![index];
    self.suggestions.clear();
    self.selected = None;
  }

  /// Submitting the form jumps to an entry whose title equals the query,
  /// otherwise narrows the listing to the matches.
  pub fn submit(&mut self) -> Option<Target> {
    self.suggestions.clear();
    self.selected = None;

    if self.query.trim().is_empty() {
      self.displayed = self.all();
      return None;
    }

    let query = self.query.to_lowercase();
    if let Some(entry) =
      self.entries.iter().find(|e| e.title().to_lowercase() == query)
    {
      return Some(entry.target());
    }

    self.displayed = self.matching(&self.query);
    None
  }

  /// Clicking outside the search box hides the suggestions.
  pub fn dismiss(&mut self) {
    self.suggestions.clear();
    self.selected = None;
  }

  fn all(&self) -> Vec<usize> {
    (0..self.entries.len()).collect()
  }

  fn matching(&self, query: &str) -> Vec<usize> {
    self
      .entries
      .iter()
      .enumerate()
      .filter(|(_, entry)| entry.title_matches(query))
      .map(|(i, _)| i)
      .collect()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::blog::merge;
  use crate::blog::test::{feed_item, post};

  fn state() -> SearchState {
    SearchState::new(merge(
      vec![
        post("rust-tips", "Rust tips", "2024-06-01"),
        post("rusty%20bikes", "Rusty bikes", "2024-01-01"),
      ],
      vec![feed_item("Space policy", "https://x/space", "2024-03-01")],
    ))
  }

  fn titles(entries: Vec<&BlogEntry>) -> Vec<&str> {
    entries.into_iter().map(BlogEntry::title).collect()
  }

  #[test]
  fn test_query_narrows_and_clear_restores() {
    let mut state = state();
    assert_eq!(state.displayed().len(), 3);

    state.set_query("polic");
    assert_eq!(titles(state.displayed()), ["Space policy"]);
    assert_eq!(titles(state.suggestions()), ["Space policy"]);

    state.set_query("");
    assert_eq!(
      titles(state.displayed()),
      ["Rust tips", "Space policy", "Rusty bikes"]
    );
    assert!(state.suggestions().is_empty());
  }

  #[test]
  fn test_keyboard_navigation() {
    let mut state = state();
    state.set_query("RUST");
    assert_eq!(state.suggestions().len(), 2);
    assert_eq!(state.selected(), None);

    assert_eq!(state.key(Key::Down), None);
    assert_eq!(state.selected(), Some(0));
    state.key(Key::Down);
    state.key(Key::Down);
    assert_eq!(state.selected(), Some(1));

    state.key(Key::Up);
    assert_eq!(state.selected(), Some(0));
    state.key(Key::Up);
    assert_eq!(state.selected(), None);

    // enter without a selection does nothing
    assert_eq!(state.key(Key::Enter), None);
    assert_eq!(state.suggestions().len(), 2);

    state.key(Key::Down);
    state.key(Key::Down);
    let target = state.key(Key::Enter).unwrap();
    assert_eq!(target, Target::Local("/posts/rusty%20bikes".into()));
    assert_eq!(state.query(), "Rusty bikes");
    assert!(state.suggestions().is_empty());
  }

  #[test]
  fn test_down_without_suggestions() {
    let mut state = state();
    state.set_query("nothing matches");
    assert_eq!(state.key(Key::Down), None);
    assert_eq!(state.selected(), None);
  }

  #[test]
  fn test_choose_suggestion() {
    let mut state = state();
    state.set_query("rust");
    state.choose(1);
    assert_eq!(state.query(), "Rusty bikes");
    assert_eq!(titles(state.displayed()), ["Rusty bikes"]);
    assert!(state.suggestions().is_empty());
  }

  #[test]
  fn test_submit() {
    let mut state = state();
    state.set_query("space POLICY");
    assert_eq!(
      state.submit(),
      Some(Target::External("https://x/space".into()))
    );

    state.set_query("rust");
    assert_eq!(state.submit(), None);
    assert_eq!(titles(state.displayed()), ["Rust tips", "Rusty bikes"]);
    assert!(state.suggestions().is_empty());

    state.set_query("");
    assert_eq!(state.submit(), None);
    assert_eq!(state.displayed().len(), 3);
  }

  #[test]
  fn test_dismiss() {
    let mut state = state();
    state.set_query("rust");
    state.key(Key::Down);
    state.dismiss();
    assert!(state.suggestions().is_empty());
    assert_eq!(state.selected(), None);
    assert_eq!(state.displayed().len(), 2);
  }
}
