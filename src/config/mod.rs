//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Site metadata (website, title, author, nav)      |
//! | `[build]`   | Content/output directories and artifact paths    |
//! | `[og]`      | Preview image font source and fetch policy       |
//! | `[serve]`   | Development server (interface, port)             |
//!
//! # Example
//!
//! ```toml
//! [site]
//! website = "https://xirain.github.io/techlearn/"
//! title = "Tech Learning Notes"
//! description = "个人技术文档库"
//!
//! [build]
//! content = "content/posts"
//!
//! [og]
//! fallback_on_error = true
//! ```

mod build;
pub mod defaults;
mod error;
mod og;
mod serve;
mod site;

pub use error::ConfigError;
pub use site::NavItem;

use build::BuildSection;
use og::OgSection;
use serve::ServeSection;
use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub og: OgSection,

    #[serde(default)]
    pub serve: ServeSection,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load `folio.toml` from the CLI root, apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let config_path = root.join(&cli.config);
        if !config_path.is_file() {
            bail!("Config file not found: {}", config_path.display());
        }

        let mut config = Self::from_path(&config_path)?;
        config.apply_cli(cli);
        config.resolve_paths(&absolute(&root));
        config.validate()?;
        Ok(config)
    }

    /// Absolute path of an artifact inside the output directory.
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.build.output.join(relative)
    }

    /// Flags given on the command line win over the file.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(content) = &cli.content {
            self.build.content.clone_from(content);
        }
        if let Some(output) = &cli.output {
            self.build.output.clone_from(output);
        }
        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface.clone_from(interface);
            }
            if let Some(port) = *port {
                self.serve.port = port;
            }
        }
    }

    /// Make every configured path absolute, relative to `root`.
    fn resolve_paths(&mut self, root: &Path) {
        self.config_path = absolute(&self.config_path);
        self.build.content = absolute(&root.join(&self.build.content));
        self.build.output = absolute(&root.join(&self.build.output));
        self.og.font_file = self.og.font_file.take().map(|file| absolute(&root.join(file)));
    }

    /// Parsed `[site.website]`, always ending in `/`.
    pub fn website(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&self.site.website).map_err(|source| ConfigError::Website {
            url: self.site.website.clone(),
            source,
        })?;
        // `Url::join` drops the last segment unless the path ends with '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let website = self.website()?;
        if !matches!(website.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(website.scheme().to_string()));
        }

        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Empty("site.title"));
        }

        if !self.build.content.is_dir() {
            return Err(ConfigError::MissingPath {
                key: "build.content",
                path: self.build.content.clone(),
            });
        }

        if let Some(path) = &self.og.font_file
            && !path.is_file()
        {
            return Err(ConfigError::MissingPath {
                key: "og.font_file",
                path: path.clone(),
            });
        }

        Ok(())
    }
}

/// Canonical form of `path` when it exists, otherwise joined onto the cwd.
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

// ============================================================================
// Tests
// ============================================================================
