//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Feeds, search index and preview images for a markdown blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write rss.xml, search.json, sitemap.xml, og images and theme assets
    Build,

    /// Serve the generated endpoints and the output directory
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List posts with publish date and reading time
    Posts {
        /// Include drafts
        #[arg(short, long)]
        drafts: bool,
    },

    /// Validate config and every post's front matter without writing anything
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_globals() {
        let cli = Cli::parse_from(["folio", "-r", "site", "-o", "public", "build"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.output, Some(PathBuf::from("public")));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        assert!(matches!(cli.command, Commands::Build));
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["folio", "serve", "-i", "0.0.0.0", "-p", "8080"]);
        match cli.command {
            Commands::Serve { interface, port } => {
                assert_eq!(interface.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_posts_drafts_flag() {
        let cli = Cli::parse_from(["folio", "posts", "--drafts"]);
        assert!(matches!(cli.command, Commands::Posts { drafts: true }));
    }
}
