//! Theme tokens for the Tailwind build.
//!
//! The palette, font stacks and prose overrides live here as static data and
//! are rendered two ways:
//!
//! | output                  | consumer                                  |
//! |-------------------------|-------------------------------------------|
//! | `theme/tailwind.json`   | `tailwind.config` (`darkMode` + `extend`) |
//! | `theme/prose.css`       | pages without the typography plugin       |
//! | `toggle-theme.js`       | inline head script, when dark mode is on  |
//!
//! Colors are indirections to CSS variables (`--background` etc.) so the
//! `.theme-dark` class can swap the whole palette at once.

pub mod mode;

use crate::{config::SiteConfig, generator::write_artifact};
use anyhow::Result;
use serde_json::{Map, Value, json};
use std::{fmt::Write, path::Path};

/// Class on `<html>` that switches to the dark palette.
pub const DARK_CLASS: &str = "theme-dark";

/// Early theme bootstrap shipped with the site.
pub const TOGGLE_THEME_JS: &str = include_str!("../embed/toggle-theme.js");

pub const SEMANTIC_COLORS: &[&str] = &[
    "background",
    "foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "muted",
    "muted-foreground",
    "accent",
    "accent-foreground",
    "border",
    "card",
    "card-foreground",
];

pub const FONT_SANS: &[&str] = &[
    "Inter",
    "ui-sans-serif",
    "system-ui",
    "-apple-system",
    "BlinkMacSystemFont",
    "Segoe UI",
    "Roboto",
    "Helvetica Neue",
    "Arial",
    "Noto Sans",
    "sans-serif",
];

pub const FONT_MONO: &[&str] = &[
    "JetBrains Mono",
    "Fira Code",
    "ui-monospace",
    "SFMono-Regular",
    "Monaco",
    "Consolas",
    "Liberation Mono",
    "Courier New",
    "monospace",
];

/// A prose selector (relative to `.prose`) and its declarations.
pub struct ProseRule {
    pub selector: &'static str,
    pub declarations: &'static [(&'static str, &'static str)],
}

/// Typography plugin overrides. The empty selector is `.prose` itself.
pub const PROSE_RULES: &[ProseRule] = &[
    ProseRule {
        selector: "",
        declarations: &[
            ("--tw-prose-body", "rgb(var(--foreground))"),
            ("--tw-prose-headings", "rgb(var(--foreground))"),
            ("--tw-prose-links", "rgb(var(--primary))"),
            ("--tw-prose-bold", "rgb(var(--foreground))"),
            ("--tw-prose-code", "rgb(var(--primary))"),
            ("--tw-prose-pre-bg", "rgb(var(--muted))"),
            ("--tw-prose-pre-code", "rgb(var(--foreground))"),
            ("max-width", "none"),
        ],
    },
    ProseRule {
        selector: "a",
        declarations: &[
            ("text-decoration", "underline"),
            ("text-underline-offset", "3px"),
        ],
    },
    ProseRule {
        selector: "a:hover",
        declarations: &[("color", "rgb(var(--accent))")],
    },
    ProseRule {
        selector: "code::before",
        declarations: &[("content", "\"\"")],
    },
    ProseRule {
        selector: "code::after",
        declarations: &[("content", "\"\"")],
    },
    ProseRule {
        selector: "code",
        declarations: &[
            ("background-color", "rgb(var(--muted))"),
            ("padding", "0.25rem 0.375rem"),
            ("border-radius", "0.25rem"),
            ("font-weight", "400"),
        ],
    },
    ProseRule {
        selector: "pre",
        declarations: &[
            ("border-radius", "0.5rem"),
            ("border", "1px solid rgb(var(--border))"),
        ],
    },
];

/// Tailwind color value for a semantic color, alpha-aware.
pub fn color_value(name: &str) -> String {
    format!("rgb(var(--{name}) / <alpha-value>)")
}

// ============================================================================
// Renderers
// ============================================================================

/// The `theme.extend` object.
pub fn tailwind_extend() -> Value {
    let colors: Map<String, Value> = SEMANTIC_COLORS
        .iter()
        .map(|name| (name.to_string(), Value::String(color_value(name))))
        .collect();

    let css: Map<String, Value> = PROSE_RULES
        .iter()
        .map(|rule| {
            let declarations: Map<String, Value> = rule
                .declarations
                .iter()
                .map(|(prop, value)| (prop.to_string(), Value::String(value.to_string())))
                .collect();
            (rule.selector.to_string(), Value::Object(declarations))
        })
        .collect();

    json!({
        "colors": colors,
        "fontFamily": { "sans": FONT_SANS, "mono": FONT_MONO },
        "typography": { "DEFAULT": { "css": flatten_root(css) } },
    })
}

/// Full config fragment: class-based dark mode plus `theme.extend`.
pub fn tailwind_config() -> Value {
    json!({
        "darkMode": ["class", format!(".{DARK_CLASS}")],
        "theme": { "extend": tailwind_extend() },
    })
}

/// Root declarations sit directly in the typography `css` object.
fn flatten_root(mut css: Map<String, Value>) -> Map<String, Value> {
    if let Some(Value::Object(root)) = css.remove("") {
        let mut flat = root;
        flat.extend(css);
        flat
    } else {
        css
    }
}

/// Prose overrides as plain CSS.
pub fn prose_css() -> String {
    let mut css = String::new();
    for rule in PROSE_RULES {
        let selector = match rule.selector {
            "" => ".prose".to_string(),
            s => format!(".prose {s}"),
        };
        // writing into a String cannot fail
        let _ = writeln!(css, "{selector} {{");
        for (prop, value) in rule.declarations {
            let _ = writeln!(css, "  {prop}: {value};");
        }
        css.push_str("}\n");
    }
    css
}

/// Write theme assets if `[build.theme]` is enabled.
pub fn build_theme(config: &SiteConfig) -> Result<()> {
    if !config.build.theme {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&tailwind_config())?;
    write_artifact("theme", &config.output_path(Path::new("theme/tailwind.json")), json)?;
    write_artifact("theme", &config.output_path(Path::new("theme/prose.css")), prose_css())?;

    if config.site.light_and_dark_mode {
        write_artifact("theme", &config.output_path(Path::new("toggle-theme.js")), TOGGLE_THEME_JS)?;
    }
    Ok(())
}
