//! Card layout to SVG markup.

use super::layout::{BACKGROUND_FROM, BACKGROUND_TO, CardLayout};
use crate::utils::xml::escape_xml;
use std::fmt::Write;

/// Serialize `layout` into a standalone SVG document.
///
/// The 135deg background gradient runs from the top-left to the
/// bottom-right corner.
pub fn to_svg(layout: &CardLayout, font_family: &str) -> String {
    let (w, h) = (layout.width, layout.height);
    let family = escape_xml(font_family);
    let mut svg = String::with_capacity(1024);

    // writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        svg,
        r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="{BACKGROUND_FROM}"/><stop offset="100%" stop-color="{BACKGROUND_TO}"/></linearGradient></defs>"#
    );
    let _ = writeln!(svg, r#"<rect width="{w}" height="{h}" fill="url(#bg)"/>"#);

    for line in &layout.lines {
        let style = &line.style;
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="{family}, sans-serif" font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
            line.x,
            line.y,
            style.font_size,
            style.weight,
            style.color,
            escape_xml(&line.text),
        );
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::og::{
        PreviewCard,
        layout::{DEFAULT_TITLE_WEIGHT, layout},
    };

    fn render(title: &str, description: &str) -> String {
        let card = PreviewCard {
            title,
            description,
            site_title: "Tech Learning Notes",
        };
        to_svg(&layout(&card, DEFAULT_TITLE_WEIGHT), "Inter")
    }

    #[test]
    fn test_document_shell() {
        let svg = render("Hello", "World");
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="630""#));
        assert!(svg.contains(r##"fill="url(#bg)""##));
        assert!(svg.contains(r##"stop-color="#fdfbf7""##));
        assert!(svg.contains(r##"stop-color="#f5f1eb""##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_styles() {
        let svg = render("Hello", "World");
        assert!(svg.contains(r##"font-size="52" font-weight="700" fill="#22573b">Hello</text>"##));
        assert!(svg.contains(r##"font-size="24" font-weight="400" fill="#736d65">World</text>"##));
        assert!(svg.contains(r##"fill="#b45337">Tech Learning Notes</text>"##));
        assert!(svg.contains(r#"font-family="Inter, sans-serif""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let svg = render("<script> & \"quotes\"", "");
        assert!(svg.contains("&lt;script&gt; &amp; &quot;quotes&quot;"));
        assert!(!svg.contains("<script>"));
    }

    #[test]
    fn test_control_chars_dropped() {
        let svg = render("a\u{1}b", "line\u{8}break");
        assert!(svg.contains(">ab</text>"));
        assert!(svg.contains(">linebreak</text>"));
        assert!(!svg.contains('\u{1}'));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(render("同一个标题", "desc"), render("同一个标题", "desc"));
    }
}
