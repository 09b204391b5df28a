//! Folio command-line entry point.

use anyhow::Result;
use clap::Parser;
use folio::{
    build::{build_site, check_site, list_posts, load_content},
    cli::{Cli, Commands},
    config::SiteConfig,
    log,
    serve::serve_site,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build => build_site(&config).map(|_| ()),
        Commands::Serve { .. } => serve_site(&config),
        Commands::Posts { drafts } => print_posts(&config, *drafts),
        Commands::Check => {
            let tags = check_site(&config)?;
            log!("check"; "ok, {} tags", tags);
            Ok(())
        }
    }
}

/// Print posts newest first with date, reading time and slug.
fn print_posts(config: &SiteConfig, drafts: bool) -> Result<()> {
    let store = load_content(config)?;
    for post in list_posts(&store, drafts) {
        let marker = if post.draft { " [draft]" } else { "" };
        log!(
            "posts";
            "{}  {:>6}  {}{}  ({})",
            post.pub_datetime.ymd(),
            post.reading_time(),
            post.title,
            marker,
            post.url_path()
        );
    }
    Ok(())
}
