use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::blog::{BlogEntry, SearchState};
use crate::config::SiteConfig;
use crate::markdown::markdown_to_html;
use crate::server::ServerConfig;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
  #[clap(subcommand)]
  subcmd: SubCommand,

  #[clap(long, short, env = "FOLIO_CONFIG")]
  config: PathBuf,
}

#[derive(Parser)]
enum SubCommand {
  /// Serve the blog and its JSON API
  Server(ServerConfig),
  /// Print the merged blog listing
  List(ListConfig),
  /// Print a single local post
  Post(PostConfig),
}

#[derive(Parser)]
struct ListConfig {
  /// Only show entries whose title contains this text
  #[clap(long, short)]
  query: Option<String>,
  /// Skip fetching external feeds
  #[clap(long)]
  local_only: bool,
  /// Print JSON instead of a table
  #[clap(long)]
  json: bool,
}

#[derive(Parser)]
struct PostConfig {
  /// Filename or slug of the post
  slug: String,
  /// Render the markdown body to HTML
  #[clap(long)]
  html: bool,
}

impl Cli {
  pub async fn run(self) -> anyhow::Result<()> {
    let config = SiteConfig::load_from_file(&self.config).with_context(|| {
      format!("failed to load config from {}", self.config.display())
    })?;
    let blog = config.build_blog()?;

    match self.subcmd {
      SubCommand::Server(server_config) => server_config.run(blog).await?,
      SubCommand::List(list) => {
        let entries = if list.local_only {
          blog.local_entries().await?
        } else {
          blog.entries().await
        };

        let mut search = SearchState::new(entries);
        if let Some(query) = list.query {
          search.set_query(query);
        }
        print_entries(&search.displayed(), list.json)?;
      }
      SubCommand::Post(post_config) => {
        let post = blog
          .post(&post_config.slug)
          .await
          .with_context(|| format!("cannot load {}", post_config.slug))?;

        if post_config.html {
          let rendered = markdown_to_html(&post.content);
          println!("<h1>{}</h1>", rendered.title_html(&post.title).into_string());
          println!("{}", rendered.content);
        } else {
          println!("{}", serde_json::to_string_pretty(&post)?);
        }
      }
    }

    Ok(())
  }
}

fn print_entries(entries: &[&BlogEntry], json: bool) -> anyhow::Result<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(entries)?);
    return Ok(());
  }

  for entry in entries {
    let origin = match entry {
      BlogEntry::Local(_) => "local",
      BlogEntry::Feed(_) => "feed",
    };
    println!(
      "{:<32} {:<5} {}  ->  {}",
      entry.date(),
      origin,
      entry.title(),
      entry.target().href()
    );
  }
  Ok(())
}
