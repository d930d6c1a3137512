//! Prefix rendering per environment
//!
//! Builds the constructed part of a console line: the bold tag, the optional
//! upper-cased level label, and the optional timestamp. Browser mode encodes
//! styling as `%c` directives with a parallel style list (browser consoles do
//! not interpret ANSI codes); terminal and react-native mode embed ANSI
//! escapes directly, with a reset after each styled segment so the color does
//! not bleed into surrounding output.

use colored::{Color, Colorize};

use crate::levels::LogLevel;
use crate::runtime::RenderMode;

/// Browser console color per level (hex, used in `%c` style directives).
fn browser_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace | LogLevel::Debug => "#9E9E9E",
        LogLevel::Info => "#2196F3",
        LogLevel::Warn => "#FF9800",
        LogLevel::Error => "#F44336",
        LogLevel::Fatal => "#B00020",
        LogLevel::None => "#ffffff",
    }
}

/// Terminal color per level.
fn terminal_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Trace | LogLevel::Debug => Color::BrightBlack,
        LogLevel::Info => Color::Cyan,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Fatal => Color::Magenta,
        LogLevel::None => Color::White,
    }
}

/// Build the rendered prefix for a console line.
///
/// Returns the prefix string plus the browser style directives matching its
/// `%c` placeholders (empty in terminal mode). `timestamp` is the wall-clock
/// instant captured by the caller at log time, present only when the logger
/// was built with timestamps enabled.
pub fn render_prefix(
    mode: RenderMode,
    tag: &str,
    level: LogLevel,
    with_level_prefix: bool,
    timestamp: Option<&str>,
) -> (String, Vec<String>) {
    match mode {
        RenderMode::Browser => browser_prefix(tag, level, with_level_prefix, timestamp),
        // React Native has no DOM console styling, so it shares the
        // terminal branch.
        RenderMode::ReactNative | RenderMode::Terminal => {
            terminal_prefix(tag, level, with_level_prefix, timestamp)
        }
    }
}

fn browser_prefix(
    tag: &str,
    level: LogLevel,
    with_level_prefix: bool,
    timestamp: Option<&str>,
) -> (String, Vec<String>) {
    let color = browser_color(level);
    let mut prefix = format!("%c[{}]", tag);
    let mut styles = vec![format!("color:{}; font-weight:bold;", color)];

    if with_level_prefix {
        prefix.push_str(&format!(" %c[{}]", level.label()));
        styles.push(format!("color:{}; font-weight:normal;", color));
    }

    if let Some(ts) = timestamp {
        prefix.push_str(&format!(" %c{}", ts));
        styles.push("color:#888; font-style:italic;".to_string());
    }

    (prefix, styles)
}

fn terminal_prefix(
    tag: &str,
    level: LogLevel,
    with_level_prefix: bool,
    timestamp: Option<&str>,
) -> (String, Vec<String>) {
    let color = terminal_color(level);
    let mut prefix = format!("[{}]", tag).color(color).bold().to_string();

    if with_level_prefix {
        prefix.push(' ');
        prefix.push_str(&format!("[{}]", level.label()).color(color).to_string());
    }

    if let Some(ts) = timestamp {
        prefix.push(' ');
        prefix.push_str(&ts.dimmed().to_string());
    }

    (prefix, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn force_color() {
        colored::control::set_override(true);
    }

    #[test]
    fn test_browser_prefix_has_matching_styles() {
        let (prefix, styles) =
            render_prefix(RenderMode::Browser, "DB", LogLevel::Warn, true, Some("t0"));
        assert_eq!(prefix.matches("%c").count(), styles.len());
        assert_eq!(styles.len(), 3);
        assert!(prefix.contains("[DB]"));
        assert!(prefix.contains("[WARN]"));
        assert!(prefix.contains("t0"));
        assert!(styles[0].contains("#FF9800"));
        assert!(styles[0].contains("font-weight:bold"));
    }

    #[test]
    fn test_browser_prefix_minimal() {
        let (prefix, styles) =
            render_prefix(RenderMode::Browser, "DB", LogLevel::Info, false, None);
        assert_eq!(prefix, "%c[DB]");
        assert_eq!(styles.len(), 1);
        assert!(styles[0].contains("#2196F3"));
    }

    #[test]
    fn test_terminal_prefix_embeds_ansi_with_reset() {
        force_color();
        let (prefix, styles) =
            render_prefix(RenderMode::Terminal, "DB", LogLevel::Error, true, None);
        assert!(styles.is_empty());
        assert!(prefix.contains("\x1b["));
        assert!(prefix.contains("\x1b[0m"));
        assert!(prefix.contains("[DB]"));
        assert!(prefix.contains("[ERROR]"));
    }

    #[test]
    fn test_terminal_prefix_without_flags_has_no_label_or_timestamp() {
        force_color();
        let (prefix, _) = render_prefix(RenderMode::Terminal, "DB", LogLevel::Warn, false, None);
        assert!(prefix.contains("[DB]"));
        assert!(!prefix.contains("[WARN]"));
    }

    #[test]
    fn test_react_native_shares_terminal_branch() {
        force_color();
        let (rn, _) = render_prefix(RenderMode::ReactNative, "DB", LogLevel::Info, true, None);
        let (term, _) = render_prefix(RenderMode::Terminal, "DB", LogLevel::Info, true, None);
        assert_eq!(rn, term);
    }

    #[test]
    fn test_fatal_maps_to_alerting_colors() {
        assert_eq!(browser_color(LogLevel::Fatal), "#B00020");
        assert_eq!(terminal_color(LogLevel::Fatal), Color::Magenta);
    }
}
