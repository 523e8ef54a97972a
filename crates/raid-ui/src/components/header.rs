use crate::themes::Theme;
use raid_core::models::{SelectionMode, SESSION_SEPARATOR};
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Application title shown on the first header line.
pub const TITLE: &str = " RAID PERFORMANCE DASHBOARD ";

/// At most this many session identifiers are spelled out in the scope.
const MAX_SCOPE_IDS: usize = 3;

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. `[ mode | scope | rows ]` status line.
/// 4. An empty line.
pub struct Header<'a> {
    pub mode: SelectionMode,
    /// Session identifiers in scope.
    pub scope: &'a [String],
    /// Working-table rows; `None` when the selection is empty.
    pub rows: Option<usize>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        mode: SelectionMode,
        scope: &'a [String],
        rows: Option<usize>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            mode,
            scope,
            rows,
            theme,
        }
    }

    /// Human-readable description of the sessions in scope.
    pub fn scope_text(&self) -> String {
        match self.scope.len() {
            0 => "no sessions".to_string(),
            n if n <= MAX_SCOPE_IDS => self.scope.join(SESSION_SEPARATOR),
            n => format!(
                "{}{SESSION_SEPARATOR}… ({n} sessions)",
                self.scope[..MAX_SCOPE_IDS].join(SESSION_SEPARATOR)
            ),
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let rows = match self.rows {
            Some(1) => "1 player".to_string(),
            Some(n) => format!("{n} players"),
            None => "no data".to_string(),
        };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(TITLE, self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.mode.label(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.scope_text(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(rows, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let scope = ids(&["kara-01"]);
        let header = Header::new(SelectionMode::Single, &scope, Some(10), &theme);
        assert_eq!(header.to_lines().len(), 4);
    }

    #[test]
    fn test_header_title_line() {
        let theme = Theme::dark();
        let header = Header::new(SelectionMode::All, &[], None, &theme);
        let title = text(&header.to_lines()[0]);
        assert!(title.contains("RAID PERFORMANCE DASHBOARD"));
        assert!(title.starts_with(SPARKLES));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let header = Header::new(SelectionMode::All, &[], None, &theme);
        let sep = text(&header.to_lines()[1]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_status_line() {
        let theme = Theme::dark();
        let scope = ids(&["kara-01", "kara-02"]);
        let header = Header::new(SelectionMode::Multiple, &scope, Some(12), &theme);
        let status = text(&header.to_lines()[2]);
        assert_eq!(status, "[ Multiple | kara-01, kara-02 | 12 players ]");
    }

    #[test]
    fn test_header_status_line_empty_selection() {
        let theme = Theme::dark();
        let header = Header::new(SelectionMode::Multiple, &[], None, &theme);
        let status = text(&header.to_lines()[2]);
        assert_eq!(status, "[ Multiple | no sessions | no data ]");
    }

    #[test]
    fn test_scope_text_elides_long_lists() {
        let theme = Theme::dark();
        let scope = ids(&["a", "b", "c", "d", "e"]);
        let header = Header::new(SelectionMode::All, &scope, Some(1), &theme);
        assert_eq!(header.scope_text(), "a, b, c, … (5 sessions)");
    }

    #[test]
    fn test_header_fourth_line_empty() {
        let theme = Theme::light();
        let header = Header::new(SelectionMode::Single, &[], Some(1), &theme);
        assert!(text(&header.to_lines()[3]).is_empty());
    }
}
