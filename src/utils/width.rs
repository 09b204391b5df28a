//! East Asian wide characters, which take two terminal columns and a full
//! em on the preview card.

/// Characters drawn at double width.
#[inline]
pub const fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115f}'     // Hangul Jamo
        | '\u{2e80}'..='\u{303f}'   // CJK radicals, symbols and punctuation
        | '\u{3040}'..='\u{33ff}'   // kana, CJK compatibility
        | '\u{3400}'..='\u{4dbf}'   // Extension A
        | '\u{4e00}'..='\u{9fff}'   // Unified Ideographs
        | '\u{ac00}'..='\u{d7a3}'   // Hangul syllables
        | '\u{f900}'..='\u{faff}'   // compatibility ideographs
        | '\u{ff00}'..='\u{ff60}'   // fullwidth forms
        | '\u{ffe0}'..='\u{ffe6}')
}

/// Terminal columns taken by `c`.
#[inline]
pub const fn columns(c: char) -> usize {
    if is_wide(c) { 2 } else { 1 }
}
