use lazy_static::lazy_static;
use maud::{html, Markup, PreEscaped};
use pulldown_cmark::{Options, Parser};
use regex::Regex;

lazy_static! {
  static ref CODE_BLOCK: Regex =
    Regex::new(r#"<pre><code class="language-(\w+)">"#).unwrap();
  static ref FIRST_H1: Regex = Regex::new(r"(?s)<h1>(.*?)</h1>").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
  /// Inner HTML of the first `<h1>`, which is removed from `content`.
  pub heading: Option<String>,
  pub content: String,
}

impl Rendered {
  /// The extracted heading as-is, or `fallback` escaped as plain text.
  pub fn title_html(&self, fallback: &str) -> Markup {
    match &self.heading {
      Some(heading) => PreEscaped(heading.clone()),
      None => html! { (fallback) },
    }
  }
}

fn options() -> Options {
  Options::ENABLE_TABLES
    | Options::ENABLE_STRIKETHROUGH
    | Options::ENABLE_TASKLISTS
    | Options::ENABLE_FOOTNOTES
}

/// Renders GitHub-flavoured markdown. Raw HTML in the source is passed
/// through unsanitized.
pub fn markdown_to_html(markdown: &str) -> Rendered {
  let parser = Parser::new_ext(markdown, options());
  let mut html = String::with_capacity(markdown.len() * 3 / 2);
  pulldown_cmark::html::push_html(&mut html, parser);

  // the highlighter expects the language class on <pre> as well
  let html = CODE_BLOCK
    .replace_all(&html, r#"<pre class="language-$1"><code class="language-$1">"#)
    .into_owned();

  let first_h1 = FIRST_H1.captures(&html).and_then(|captures| {
    let whole = captures.get(0)?.range();
    Some((whole, captures.get(1)?.as_str().to_owned()))
  });

  let Some((whole, heading)) = first_h1 else {
    return Rendered {
      heading: None,
      content: html,
    };
  };

  let mut content = html;
  content.replace_range(whole, "");

  Rendered {
    heading: Some(heading),
    content,
  }
}
