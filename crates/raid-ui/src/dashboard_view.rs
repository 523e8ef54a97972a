//! Dashboard body: charts, catalog sections and overall statistics.
//!
//! The body is a vertical stack of [`BodyItem`]s. Scrolling skips whole
//! items, so a table is never cut at its top edge.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use raid_core::models::{SelectionMode, SessionLoadError};
use raid_data::ranking::ChartPayload;
use raid_runtime::dashboard::{DashboardSnapshot, OverallStats, SectionView};

use crate::components::bar_chart::chart_lines;
use crate::table_view::{render_averages, render_global_top, render_top_table, table_height};
use crate::themes::Theme;

/// Warning lines shown before the panel summarises the rest.
pub const MAX_WARNING_LINES: usize = 3;

/// One vertically stacked piece of the dashboard body.
#[derive(Debug, Clone, Copy)]
pub enum BodyItem<'a> {
    Charts(&'a [ChartPayload]),
    Section(&'a SectionView),
    Overall(&'a OverallStats),
}

impl BodyItem<'_> {
    /// Rows the item needs to be drawn in full.
    pub fn height(&self) -> u16 {
        match self {
            BodyItem::Charts(charts) => {
                charts.iter().map(|c| c.bars.len().max(1)).max().unwrap_or(1) as u16 + 2
            }
            BodyItem::Section(section) => {
                1 + section
                    .tables
                    .iter()
                    .map(|t| table_height(t.rows.len()))
                    .max()
                    .unwrap_or_else(|| table_height(0))
            }
            BodyItem::Overall(overall) => {
                1 + table_height(overall.top_dps.len().max(overall.average_dps.len()))
            }
        }
    }
}

/// Body items in display order.
pub fn body_items(snapshot: &DashboardSnapshot) -> Vec<BodyItem<'_>> {
    let mut items = Vec::with_capacity(snapshot.sections.len() + 2);
    if !snapshot.charts.is_empty() {
        items.push(BodyItem::Charts(&snapshot.charts));
    }
    items.extend(snapshot.sections.iter().map(BodyItem::Section));
    items.push(BodyItem::Overall(&snapshot.overall));
    items
}

/// Largest useful scroll offset for `snapshot`.
pub fn max_scroll(snapshot: &DashboardSnapshot) -> usize {
    body_items(snapshot).len().saturating_sub(1)
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// Render the dashboard body starting at item `scroll`.
pub fn render_body(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    scroll: usize,
    theme: &Theme,
) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    for item in body_items(snapshot).into_iter().skip(scroll) {
        if y >= bottom {
            break;
        }
        let height = item.height().min(bottom - y);
        let slot = Rect::new(area.x, y, area.width, height);
        match item {
            BodyItem::Charts(charts) => render_charts(frame, slot, charts, theme),
            BodyItem::Section(section) => render_section(frame, slot, section, theme),
            BodyItem::Overall(overall) => render_overall(frame, slot, overall, theme),
        }
        y += height;
    }
}

fn render_charts(frame: &mut Frame, area: Rect, charts: &[ChartPayload], theme: &Theme) {
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, charts.len() as u32); charts.len()])
        .split(area);

    for (chart, slot) in charts.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(Span::styled(format!(" {} ", chart.title), theme.table_header));
        let inner = block.inner(*slot);
        let lines = chart_lines(chart, inner.width, theme);
        frame.render_widget(Paragraph::new(lines).block(block), *slot);
    }
}

fn section_title<'a>(title: &str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(format!("── {title} ──"), theme.header)))
}

fn render_section(frame: &mut Frame, area: Rect, section: &SectionView, theme: &Theme) {
    let [title_area, tables_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    frame.render_widget(section_title(&section.title, theme), title_area);

    if section.tables.is_empty() {
        return;
    }
    let n = section.tables.len();
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, n as u32); n]).split(tables_area);
    for (table, slot) in section.tables.iter().zip(columns.iter()) {
        render_top_table(frame, *slot, table, theme);
    }
}

fn render_overall(frame: &mut Frame, area: Rect, overall: &OverallStats, theme: &Theme) {
    let [title_area, tables_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    frame.render_widget(section_title("Overall Statistics", theme), title_area);

    let [left, right] = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .areas(tables_area);
    render_global_top(frame, left, "Top 10 DPS", &overall.top_dps, theme);
    render_averages(frame, right, "Average DPS by Player", &overall.average_dps, theme);
}

// ── Blocking message ──────────────────────────────────────────────────────────

/// Render the message that replaces the body when the selection is empty.
pub fn render_blocked(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    mode: SelectionMode,
    theme: &Theme,
) {
    let hint = match mode {
        SelectionMode::Multiple => {
            "Press Space to add the session under the cursor, or 'a' for all."
        }
        SelectionMode::Single => "Pick a session with a readable report and press Enter.",
        SelectionMode::All => "Press 'r' after adding reports to reload.",
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.error)),
        Line::from(""),
        Line::from(Span::styled(hint, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(" Dashboard "),
            ),
        area,
    );
}

// ── Warnings ──────────────────────────────────────────────────────────────────

/// Height of the warning panel; zero when there is nothing to report.
pub fn warnings_height(count: usize) -> u16 {
    match count {
        0 => 0,
        n if n <= MAX_WARNING_LINES => n as u16 + 2,
        _ => MAX_WARNING_LINES as u16 + 3,
    }
}

/// One line per failed report, summarising overflow in a final line.
pub fn warning_lines<'a>(warnings: &[SessionLoadError], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = warnings
        .iter()
        .take(MAX_WARNING_LINES)
        .map(|w| Line::from(Span::styled(format!("⚠ {w}"), theme.warning)))
        .collect();
    if warnings.len() > MAX_WARNING_LINES {
        lines.push(Line::from(Span::styled(
            format!("… and {} more (see log)", warnings.len() - MAX_WARNING_LINES),
            theme.dim,
        )));
    }
    lines
}

pub fn render_warnings(
    frame: &mut Frame,
    area: Rect,
    warnings: &[SessionLoadError],
    theme: &Theme,
) {
    if warnings.is_empty() {
        return;
    }
    frame.render_widget(
        Paragraph::new(warning_lines(warnings, theme)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.warning)
                .title(" Warnings "),
        ),
        area,
    );
}

// ── Footer ────────────────────────────────────────────────────────────────────

/// Key help for the current selection mode.
pub fn footer_text(mode: SelectionMode) -> &'static str {
    match mode {
        SelectionMode::All => "m mode · ↑↓ move · PgUp/PgDn scroll · r reload · t theme · q quit",
        SelectionMode::Single => {
            "m mode · ↑↓ move · Enter pick · PgUp/PgDn scroll · r reload · t theme · q quit"
        }
        SelectionMode::Multiple => {
            concat!(
                "m mode · ↑↓ move · Space toggle · a all · n none · ",
                "PgUp/PgDn scroll · r reload · t theme · q quit"
            )
        }
    }
}

pub fn render_footer(frame: &mut Frame, area: Rect, mode: SelectionMode, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(footer_text(mode), theme.dim))),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
