//! Development server.
//!
//! Built on `tiny_http`. Derived artifacts are rendered per request from the
//! current content directory; everything else is served from the output
//! directory.
//!
//! | path                 | response                                    |
//! |----------------------|---------------------------------------------|
//! | `/rss.xml`           | feed, `application/rss+xml`                 |
//! | `/search.json`       | search index, `application/json`            |
//! | `/sitemap.xml`       | sitemap, when enabled                       |
//! | `/og/<slug>.png`     | preview image, immutable caching, 500 on a  |
//! |                      | failed render                               |
//! | anything else        | static file from `[build.output]`           |
//!
//! Requests are handled sequentially on the main thread until Ctrl+C.

use crate::{
    build::load_content,
    config::SiteConfig,
    generator::{rss, search, sitemap},
    log,
    og::{
        self, PreviewCard, PreviewRenderer,
        font::{FontFetcher, HttpFetcher, load_font},
    },
};
use anyhow::{Context, Result, anyhow};
use std::{
    borrow::Cow,
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server. Blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface = config
        .serve
        .ip()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, config.serve.port_retries.max(1))?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    let fetcher = HttpFetcher::new(config.og.fetch_policy().timeout)?;
    let mut endpoints = Endpoints::new(config, Box::new(fetcher));

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &mut endpoints) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Routing
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Rss,
    Search,
    Sitemap,
    Preview(String),
    Static(PathBuf),
    NotFound,
}

/// Map a decoded request path (no query, no surrounding slashes) to a route.
fn route(config: &SiteConfig, path: &str) -> Route {
    let matches = |artifact: &Path| Path::new(path) == artifact;

    if matches(&config.build.rss) {
        return Route::Rss;
    }
    if matches(&config.build.search) {
        return Route::Search;
    }
    if config.build.sitemap && matches(&config.build.sitemap_path) {
        return Route::Sitemap;
    }

    let og_prefix = format!("{}/", config.build.og.to_string_lossy().trim_matches('/'));
    if let Some(slug) = path.strip_prefix(&og_prefix).and_then(|rest| rest.strip_suffix(".png")) {
        return Route::Preview(slug.to_string());
    }

    let relative = Path::new(path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Route::NotFound;
    }
    Route::Static(config.build.output.join(relative))
}

// ============================================================================
// Endpoints
// ============================================================================

/// A fully formed response, independent of the transport.
struct Reply {
    status: u16,
    content_type: &'static str,
    cache_control: Option<&'static str>,
    body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type,
            cache_control: None,
            body: body.into(),
        }
    }

    fn text(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            cache_control: None,
            body: message.as_bytes().to_vec(),
        }
    }

    fn not_found() -> Self {
        Self::text(404, "404 Not Found")
    }

    fn internal_error(err: &anyhow::Error) -> Self {
        log!("error"; "{err:#}");
        Self::text(500, "500 Internal Server Error")
    }
}

/// Request handler state: config plus the lazily loaded preview font.
struct Endpoints<'a> {
    config: &'a SiteConfig,
    fetcher: Box<dyn FontFetcher>,
    /// Set once a non-empty font has been obtained.
    renderer: Option<PreviewRenderer>,
}

impl<'a> Endpoints<'a> {
    fn new(config: &'a SiteConfig, fetcher: Box<dyn FontFetcher>) -> Self {
        Self {
            config,
            fetcher,
            renderer: None,
        }
    }

    fn reply(&mut self, path: &str) -> Reply {
        let result = match route(self.config, path) {
            Route::Rss => self.feed(rss::CONTENT_TYPE, |config, posts| rss::build_rss_xml(config, posts)),
            Route::Search => self.feed(search::CONTENT_TYPE, |_, posts| search::build_search_index(posts)),
            Route::Sitemap => {
                self.feed(sitemap::CONTENT_TYPE, |config, posts| sitemap::build_sitemap_xml(config, posts))
            }
            Route::Preview(slug) => self.preview(&slug),
            Route::Static(path) => Ok(serve_file(&path)),
            Route::NotFound => Ok(Reply::not_found()),
        };
        result.unwrap_or_else(|err| Reply::internal_error(&err))
    }

    fn feed(
        &self,
        content_type: &'static str,
        render: impl FnOnce(&SiteConfig, &[crate::content::Post]) -> Result<String>,
    ) -> Result<Reply> {
        let store = load_content(self.config)?;
        Ok(Reply::ok(content_type, render(self.config, store.all())?))
    }

    fn preview(&mut self, slug: &str) -> Result<Reply> {
        let store = load_content(self.config)?;
        let Some(post) = store.get_published(slug) else {
            return Ok(Reply::not_found());
        };

        let renderer = self.renderer()?;
        let png = renderer
            .render(&PreviewCard::for_post(post, self.config))
            .with_context(|| format!("Failed to render preview for `{slug}`"))?;

        Ok(Reply {
            cache_control: Some(og::CACHE_CONTROL),
            ..Reply::ok(og::CONTENT_TYPE, png)
        })
    }

    fn renderer(&mut self) -> Result<PreviewRenderer> {
        if let Some(renderer) = &self.renderer {
            return Ok(renderer.clone());
        }

        let font = load_font(self.config, self.fetcher.as_ref())?;
        let renderer = PreviewRenderer::from_config(&font, self.config);
        if !font.is_empty() {
            self.renderer = Some(renderer.clone());
        }
        Ok(renderer)
    }
}

// ============================================================================
// Request Handling
// ============================================================================

fn handle_request(request: Request, endpoints: &mut Endpoints<'_>) -> Result<()> {
    let path = request_path(request.url());
    let reply = endpoints.reply(&path);
    send(request, reply)
}

/// Decoded path of a request target, without query and surrounding slashes.
///
/// The query is cut before decoding so an escaped `%3F` stays in the path.
fn request_path(url: &str) -> String {
    let raw = url.split(['?', '#']).next().unwrap_or_default();
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_default()
        .trim_matches('/')
        .to_string()
}

fn send(request: Request, reply: Reply) -> Result<()> {
    let mut headers = vec![header("Content-Type", reply.content_type)?];
    if let Some(cache_control) = reply.cache_control {
        headers.push(header("Cache-Control", cache_control)?);
    }

    let length = reply.body.len();
    let response = Response::new(
        StatusCode(reply.status),
        headers,
        Cursor::new(reply.body),
        Some(length),
        None,
    );
    request.respond(response)?;
    Ok(())
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("Invalid header {name}: {value}"))
}

/// Serve a file, resolving directories to their `index.html`.
fn serve_file(path: &Path) -> Reply {
    let path = if path.is_dir() { path.join("index.html") } else { path.to_path_buf() };
    match fs::read(&path) {
        Ok(content) => Reply::ok(guess_content_type(&path), content),
        Err(_) => Reply::not_found(),
    }
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
