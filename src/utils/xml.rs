//! XML text helpers shared by the sitemap and SVG writers.

/// Escape special XML characters and drop characters XML 1.0 cannot carry
/// (C0 controls other than tab, newline and carriage return, U+FFFE, U+FFFF).
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1f}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}
