//! Terminal output: a `log!` macro with colored stage prefixes and a
//! single-line progress indicator for the slow stages (OG rendering).
//!
//! ```ignore
//! log!("rss"; "{} items", count);
//!
//! let progress = Progress::new("og", posts.len());
//! progress.tick();
//! progress.finish();
//! ```

use crate::utils::width::columns;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{IsTerminal, Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

/// Width used when stdout is not a terminal.
const FALLBACK_WIDTH: usize = 100;
const BAR_MIN: usize = 8;
const BAR_MAX: usize = 32;

static WIDTH: OnceLock<usize> = OnceLock::new();

/// Set while a progress line occupies the last terminal row.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

fn terminal_width() -> usize {
    *WIDTH.get_or_init(|| size().map_or(FALLBACK_WIDTH, |(w, _)| usize::from(w)))
}

/// Log a message with a colored stage prefix.
///
/// ```ignore
/// log!("stage"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print `[module] message`, clearing an active progress line first.
///
/// Single-line messages are clipped to the terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = stage_prefix(module);
    let mut out = stdout().lock();

    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        execute!(out, Clear(ClearType::CurrentLine)).ok();
        write!(out, "\r").ok();
    }

    if message.contains('\n') {
        writeln!(out, "{prefix} {message}").ok();
    } else {
        let room = terminal_width().saturating_sub(module.chars().count() + 3);
        writeln!(out, "{prefix} {}", clip(message, room)).ok();
    }
    out.flush().ok();
}

/// Counter for a batch of parallel jobs, drawn on one line and redrawn in
/// place. Nothing is drawn when stdout is not a terminal.
pub struct Progress {
    module: &'static str,
    total: usize,
    done: AtomicUsize,
    draw: Mutex<()>,
    visible: bool,
}

impl Progress {
    pub fn new(module: &'static str, total: usize) -> Self {
        let visible = total > 0 && stdout().is_terminal();
        if visible {
            PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        }
        Self {
            module,
            total,
            done: AtomicUsize::new(0),
            draw: Mutex::new(()),
            visible,
        }
    }

    /// Record one finished job. Safe to call from rayon workers.
    pub fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.visible {
            self.redraw(done);
        }
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    fn redraw(&self, done: usize) {
        let _guard = self.draw.lock().ok();
        let count = format!("{done}/{}", self.total);
        let line = format!(
            "{} [{}] {count}",
            stage_prefix(self.module),
            bar(done, self.total, self.bar_width(&count))
        );

        let mut out = stdout().lock();
        execute!(out, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
        write!(out, "{line}").ok();
        out.flush().ok();
    }

    fn bar_width(&self, count: &str) -> usize {
        // "[module] [" + "] " + count
        let used = self.module.len() + 2 + 2 + 2 + count.len();
        terminal_width().saturating_sub(used).clamp(BAR_MIN, BAR_MAX)
    }

    /// Erase the progress line.
    pub fn finish(&self) {
        if !self.visible || !PROGRESS_ACTIVE.swap(false, Ordering::SeqCst) {
            return;
        }
        let _guard = self.draw.lock().ok();
        let mut out = stdout().lock();
        execute!(out, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
        out.flush().ok();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}

/// `width` cells of `█`, filled in proportion to `done / total`.
fn bar(done: usize, total: usize, width: usize) -> String {
    let filled = (done * width).checked_div(total).unwrap_or(0).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn stage_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module {
        "serve" => prefix.bright_blue().bold(),
        "og" => prefix.bright_magenta().bold(),
        "warn" => prefix.bright_yellow().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_green().bold(),
    }
}

/// Longest prefix of `s` that fits in `max` terminal columns.
fn clip(s: &str, max: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        used += columns(c);
        if used > max {
            return &s[..i];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_short_messages() {
        assert_eq!(clip("rss.xml", 20), "rss.xml");
        assert_eq!(clip("rss.xml", 7), "rss.xml");
        assert_eq!(clip("rss.xml", 3), "rss");
        assert_eq!(clip("rss.xml", 0), "");
    }

    #[test]
    fn test_clip_counts_wide_columns() {
        // each ideograph is two columns, not three bytes
        assert_eq!(clip("分钟阅读", 8), "分钟阅读");
        assert_eq!(clip("分钟阅读", 7), "分钟阅");
        assert_eq!(clip("分钟阅读", 1), "");
        assert_eq!(clip("3 分钟 read", 6), "3 分钟");
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar(0, 4, 8), "░░░░░░░░");
        assert_eq!(bar(2, 4, 8), "████░░░░");
        assert_eq!(bar(9, 4, 8), "████████");
        assert_eq!(bar(1, 0, 4), "░░░░");
    }

    #[test]
    fn test_progress_counts_ticks() {
        let progress = Progress::new("og", 3);
        progress.tick();
        progress.tick();
        assert_eq!(progress.done(), 2);
        progress.finish();
    }
}
