//! Reading-time estimation for mixed CJK / Latin text.

/// Words per minute used for the estimate.
const WORDS_PER_MINUTE: usize = 200;

/// CJK Unified Ideographs and Extension A.
#[inline]
const fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}')
}

/// Estimated reading time in whole minutes, never less than 1.
///
/// Each ideograph counts as one word; the remaining text is split on
/// whitespace. Ideographs are removed before splitting, so `Rust中文` counts
/// as one Latin word plus two ideographs.
pub fn minutes(content: &str) -> usize {
    let cjk = content.chars().filter(|&c| is_cjk_ideograph(c)).count();
    let latin = content
        .chars()
        .filter(|&c| !is_cjk_ideograph(c))
        .collect::<String>()
        .split_whitespace()
        .count();

    (cjk + latin).div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Human-readable reading time, e.g. `"3 分钟"`.
pub fn reading_time(content: &str) -> String {
    format!("{} 分钟", minutes(content))
}
