use std::collections::BTreeMap;

/// Lookup over namespaced extension elements such as `media:content`,
/// including elements nested inside other extensions (`media:group`).
pub trait ExtensionExt {
  /// Calls `visit` with the name and attributes of every element, depth
  /// first, until it returns `Some`.
  fn find_element<'a, T>(
    &'a self,
    visit: &mut dyn FnMut(&'a str, &'a BTreeMap<String, String>) -> Option<T>,
  ) -> Option<T>;

  /// The given attribute of the first element called `name` that has it.
  fn first_attr(&self, name: &str, attr: &str) -> Option<&str> {
    self.find_element(&mut |element, attrs| {
      (element == name).then(|| attrs.get(attr)).flatten()
    })
    .map(String::as_str)
  }
}

// rss and atom_syndication each define an identical Extension struct
macro_rules! impl_extension_ext {
  ($ty:ty) => {
    impl ExtensionExt for $ty {
      fn find_element<'a, T>(
        &'a self,
        visit: &mut dyn FnMut(
          &'a str,
          &'a BTreeMap<String, String>,
        ) -> Option<T>,
      ) -> Option<T> {
        visit(self.name.as_str(), &self.attrs).or_else(|| {
          self
            .children
            .values()
            .flatten()
            .find_map(|child| child.find_element(visit))
        })
      }
    }
  };
}

impl_extension_ext!(atom_syndication::extension::Extension);
impl_extension_ext!(rss::extension::Extension);

impl<E: ExtensionExt> ExtensionExt for BTreeMap<String, BTreeMap<String, Vec<E>>> {
  fn find_element<'a, T>(
    &'a self,
    visit: &mut dyn FnMut(&'a str, &'a BTreeMap<String, String>) -> Option<T>,
  ) -> Option<T> {
    self
      .values()
      .flat_map(BTreeMap::values)
      .flatten()
      .find_map(|ext| ext.find_element(visit))
  }
}

#[cfg(test)]
mod test {
  use rss::extension::{Extension, ExtensionMap};

  use super::*;

  fn element(name: &str, attrs: &[(&str, &str)]) -> Extension {
    Extension {
      name: name.into(),
      attrs: attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
      ..Default::default()
    }
  }

  #[test]
  fn test_first_attr_nested() {
    let mut group = element("media:group", &[]);
    group.children.insert(
      "content".into(),
      vec![
        element("media:content", &[("medium", "image")]),
        element("media:content", &[("url", "https://x/a.jpg")]),
      ],
    );

    let mut map = ExtensionMap::default();
    map
      .entry("media".into())
      .or_default()
      .insert("group".into(), vec![group]);

    assert_eq!(map.first_attr("media:content", "url"), Some("https://x/a.jpg"));
    assert_eq!(map.first_attr("media:thumbnail", "url"), None);
  }
}
