//! Fixed card layout: card content to absolutely positioned text lines.
//!
//! ```text
//! ┌──────────────────────────── 1200 ────────────────────────────┐
//! │ 60                                                           │
//! │    Title (52px, 700, #22573b, lh 1.2)        ◄── 900 wide ──►│
//! │    ↕ 20                                                      │
//! │    Description (24px, #736d65, lh 1.5)                       │
//! │                                                              │
//! │    Site title (20px, #b45337)                  pinned bottom │
//! │ 60                                                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no text shaping here: line breaks use an advance estimate of
//! 1em for wide (CJK) characters and 0.55em for everything else.

use super::{HEIGHT, PreviewCard, WIDTH};
use crate::utils::width::is_wide;

pub const PADDING: f32 = 60.0;
pub const COLUMN_WIDTH: f32 = 900.0;
pub const GAP: f32 = 20.0;

pub const BACKGROUND_FROM: &str = "#fdfbf7";
pub const BACKGROUND_TO: &str = "#f5f1eb";

const TITLE: TextStyle = TextStyle {
    font_size: 52.0,
    line_height: 1.2,
    weight: 700,
    color: "#22573b",
    max_lines: 3,
};

const DESCRIPTION: TextStyle = TextStyle {
    font_size: 24.0,
    line_height: 1.5,
    weight: 400,
    color: "#736d65",
    max_lines: 4,
};

const SITE_TITLE: TextStyle = TextStyle {
    font_size: 20.0,
    line_height: 1.2,
    weight: 400,
    color: "#b45337",
    max_lines: 1,
};

/// Ascent as a fraction of the font size, used to place baselines.
const ASCENT: f32 = 0.8;
const WIDE_ADVANCE: f32 = 1.0;
const NARROW_ADVANCE: f32 = 0.55;
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Multiple of `font_size`.
    pub line_height: f32,
    pub weight: u16,
    pub color: &'static str,
    pub max_lines: usize,
}

impl TextStyle {
    fn line_px(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Baseline offset of the first line from the block top.
    fn first_baseline(&self) -> f32 {
        (self.line_px() - self.font_size) / 2.0 + self.font_size * ASCENT
    }
}

/// One positioned line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: TextStyle,
}

/// The laid-out card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<TextLine>,
}

/// Title weight when `[og] font_weight` is not set.
pub const DEFAULT_TITLE_WEIGHT: u16 = TITLE.weight;

/// Lay out a card at 1200×630, drawing the title at `title_weight`.
pub fn layout(card: &PreviewCard<'_>, title_weight: u16) -> CardLayout {
    let mut lines = Vec::new();

    let title = TextStyle {
        weight: title_weight,
        ..TITLE
    };
    let title_bottom = place_block(&mut lines, card.title, title, PADDING);
    if !card.description.trim().is_empty() {
        place_block(&mut lines, card.description, DESCRIPTION, title_bottom + GAP);
    }

    let site_top = HEIGHT as f32 - PADDING - SITE_TITLE.line_px();
    place_block(&mut lines, card.site_title, SITE_TITLE, site_top);

    CardLayout {
        width: WIDTH,
        height: HEIGHT,
        lines,
    }
}

/// Wrap `text` and push its lines starting at `top`; returns the block bottom.
fn place_block(lines: &mut Vec<TextLine>, text: &str, style: TextStyle, top: f32) -> f32 {
    let wrapped = wrap_text(text, style.font_size, COLUMN_WIDTH, style.max_lines);
    let count = wrapped.len();

    lines.extend(wrapped.into_iter().enumerate().map(|(i, text)| TextLine {
        x: PADDING,
        y: top + style.first_baseline() + i as f32 * style.line_px(),
        text,
        style,
    }));

    top + count as f32 * style.line_px()
}

// ============================================================================
// Line Breaking
// ============================================================================

/// Estimated advance of `c` in ems.
#[inline]
fn advance(c: char) -> f32 {
    if is_wide(c) { WIDE_ADVANCE } else { NARROW_ADVANCE }
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(advance).sum::<f32>() * font_size
}

/// Break units: runs of narrow non-space characters, single wide
/// characters, and single spaces.
fn tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() || is_wide(c) {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            tokens.push(&text[i..i + c.len_utf8()]);
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

/// Greedy line breaking within `max_width`. Lines past `max_lines` are
/// dropped and the last kept line ends with an ellipsis.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32, max_lines: usize) -> Vec<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;

    for token in tokens(&text) {
        let is_space = token == " ";
        if is_space && line.is_empty() {
            continue;
        }

        let token_width = text_width(token, font_size);
        if width + token_width <= max_width {
            line.push_str(token);
            width += token_width;
            continue;
        }
        if is_space {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line).trim_end().to_string());
            width = 0.0;
        }

        // a single word wider than the column is broken by character
        for c in token.chars() {
            let w = advance(c) * font_size;
            if width + w > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            line.push(c);
            width += w;
        }
    }

    let line = line.trim_end();
    if !line.is_empty() {
        lines.push(line.to_string());
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            ellipsize(last, font_size, max_width);
        }
    }
    lines
}

fn ellipsize(line: &mut String, font_size: f32, max_width: f32) {
    let budget = max_width - advance(ELLIPSIS) * font_size;
    while text_width(line, font_size) > budget && line.pop().is_some() {}
    let trimmed = line.trim_end().len();
    line.truncate(trimmed);
    line.push(ELLIPSIS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card<'a>(title: &'a str, description: &'a str) -> PreviewCard<'a> {
        PreviewCard {
            title,
            description,
            site_title: "Tech Learning Notes",
        }
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("hello world"), vec!["hello", " ", "world"]);
        assert_eq!(tokens("Rust中文"), vec!["Rust", "中", "文"]);
        assert_eq!(tokens("a，b"), vec!["a", "，", "b"]);
    }

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_text("Hello World", 52.0, 900.0, 3), vec!["Hello World"]);
        assert!(wrap_text("   ", 52.0, 900.0, 3).is_empty());
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        // 0.55 * 20px = 11px per char, 100px fits 9 chars
        let lines = wrap_text("aaaa bbbb cccc", 20.0, 100.0, 10);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_cjk_breaks_anywhere() {
        // 1em * 20px per glyph, 100px fits 5 glyphs
        let lines = wrap_text("一二三四五六七", 20.0, 100.0, 10);
        assert_eq!(lines, vec!["一二三四五", "六七"]);
    }

    #[test]
    fn test_long_word_broken_by_character() {
        let lines = wrap_text(&"x".repeat(20), 20.0, 100.0, 10);
        assert_eq!(lines, vec!["x".repeat(9), "x".repeat(9), "xx".to_string()]);
    }

    #[test]
    fn test_max_lines_ellipsis() {
        let lines = wrap_text("一二三四五六七八九十", 20.0, 100.0, 1);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(ELLIPSIS));
        assert!(text_width(&lines[0], 20.0) <= 100.0);
    }

    #[test]
    fn test_every_line_fits_column() {
        let title = "使用 Docker Compose 部署 Nginx 反向代理与 Let's Encrypt 证书自动续期的完整记录";
        for line in wrap_text(title, TITLE.font_size, COLUMN_WIDTH, TITLE.max_lines) {
            assert!(text_width(&line, TITLE.font_size) <= COLUMN_WIDTH, "{line}");
        }
    }

    #[test]
    fn test_layout_positions() {
        let layout = layout(&card("Hello", "World"), DEFAULT_TITLE_WEIGHT);
        assert_eq!((layout.width, layout.height), (1200, 630));
        assert_eq!(layout.lines.len(), 3);

        let [title, description, site] = &layout.lines[..] else {
            panic!("expected three lines");
        };
        assert!(layout.lines.iter().all(|line| line.x == PADDING));
        assert_eq!(title.style, TITLE);
        assert!(title.y > PADDING && title.y < PADDING + TITLE.line_px());
        // description starts below title block + gap
        assert!(description.y > PADDING + TITLE.line_px() + GAP);
        // site title sits inside the bottom padding
        assert!(site.y < HEIGHT as f32 - PADDING);
        assert!(site.y > HEIGHT as f32 - PADDING - SITE_TITLE.line_px());
        assert_eq!(site.text, "Tech Learning Notes");
    }

    #[test]
    fn test_title_weight_only_affects_title() {
        let layout = layout(&card("Hello", "World"), 500);
        assert_eq!(layout.lines[0].style.weight, 500);
        assert_eq!(layout.lines[0].style.font_size, TITLE.font_size);
        assert_eq!(layout.lines[1].style, DESCRIPTION);
        assert_eq!(layout.lines[2].style, SITE_TITLE);
    }

    #[test]
    fn test_layout_skips_empty_description() {
        let layout = layout(&card("Hello", ""), DEFAULT_TITLE_WEIGHT);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[1].style, SITE_TITLE);
    }
}
