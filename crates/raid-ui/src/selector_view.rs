//! Session selector panel.
//!
//! Lists every loaded session with a marker showing whether it feeds the
//! working table. The marker shape follows the selection mode: radio
//! buttons in Single mode, check boxes in Multiple mode, and a plain tick
//! in All mode where every session is included.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use raid_core::models::{Selection, SelectionMode};

use crate::components::fit_width;
use crate::themes::Theme;

/// Width of the selector panel including borders.
pub const SELECTOR_WIDTH: u16 = 30;

/// Marker drawn before a session identifier.
pub fn marker(mode: SelectionMode, included: bool) -> &'static str {
    match (mode, included) {
        (SelectionMode::All, _) => " ✓ ",
        (SelectionMode::Single, true) => "(•)",
        (SelectionMode::Single, false) => "( )",
        (SelectionMode::Multiple, true) => "[x]",
        (SelectionMode::Multiple, false) => "[ ]",
    }
}

/// First visible index so that `cursor` stays inside a window of `height`.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}

/// Build one line per session. `in_scope` lists the sessions currently
/// feeding the working table.
pub fn selector_lines<'a>(
    sessions: &'a [String],
    selection: &Selection,
    in_scope: &[String],
    cursor: usize,
    width: usize,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    sessions
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let included = in_scope.iter().any(|s| s == id);
            let mark = marker(selection.mode, included);
            let name = fit_width(id, width.saturating_sub(mark.chars().count() + 1));
            let style = if i == cursor {
                theme.cursor
            } else if included {
                theme.selected
            } else {
                theme.text
            };
            Line::from(vec![
                Span::styled(mark, style),
                Span::styled(" ", style),
                Span::styled(name, style),
            ])
        })
        .collect()
}

/// Render the selector panel into `area`.
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    sessions: &[String],
    selection: &Selection,
    in_scope: &[String],
    cursor: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(
            format!(" Sessions · {} ", selection.mode.label()),
            theme.table_header,
        ));
    let inner = block.inner(area);

    let lines = if sessions.is_empty() {
        vec![Line::from(Span::styled("no reports", theme.dim))]
    } else {
        let offset = scroll_offset(cursor, inner.height as usize);
        selector_lines(
            sessions,
            selection,
            in_scope,
            cursor,
            inner.width as usize,
            theme,
        )
        .into_iter()
        .skip(offset)
        .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
