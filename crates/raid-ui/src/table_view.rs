//! Ranking tables for the raid dashboard.
//!
//! Each table is a bordered [`ratatui::widgets::Table`] with a name column
//! and one or two value columns. Tables without rows show "no data" inside
//! their border instead of an empty grid.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use raid_core::formatting;
use raid_data::overview::PlayerAverage;
use raid_data::ranking::{RankedRow, TopTable};

use crate::themes::Theme;

/// Border plus header row.
pub const TABLE_CHROME: u16 = 3;

/// Height needed to show `rows` rows, or the "no data" line when empty.
pub fn table_height(rows: usize) -> u16 {
    TABLE_CHROME + rows.max(1) as u16
}

fn bordered<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {title} "), theme.table_header))
}

fn row_style(i: usize, theme: &Theme) -> Style {
    if i % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

fn render_empty(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("no data", theme.dim)))
            .block(bordered(title, theme)),
        area,
    );
}

// ── Top tables ────────────────────────────────────────────────────────────────

/// Render one catalog ranking table into `area`.
pub fn render_top_table(frame: &mut Frame, area: Rect, table: &TopTable, theme: &Theme) {
    if table.rows.is_empty() {
        render_empty(frame, area, &table.title, theme);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(table.value_label.clone()),
    ])
    .style(theme.table_header);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(Line::from(formatting::format_stat(row.value)).right_aligned()),
            ])
            .style(row_style(i, theme))
        })
        .collect();

    let widths = [Constraint::Min(8), Constraint::Length(9)];
    let widget = Table::new(rows, widths)
        .header(header)
        .block(bordered(&table.title, theme))
        .style(theme.text);

    frame.render_widget(widget, area);
}

// ── Overall statistics ────────────────────────────────────────────────────────

/// Render the cross-session "Top 10 DPS" table with its session column.
pub fn render_global_top(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[RankedRow],
    theme: &Theme,
) {
    if rows.is_empty() {
        render_empty(frame, area, title, theme);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("DPS"),
        Cell::from("Session"),
    ])
    .style(theme.table_header);

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(Line::from(formatting::format_number(row.value, 1)).right_aligned()),
                Cell::from(row.session.clone().unwrap_or_default()),
            ])
            .style(row_style(i, theme))
        })
        .collect();

    let widths = [
        Constraint::Min(8),
        Constraint::Length(11),
        Constraint::Min(10),
    ];
    let widget = Table::new(body, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Render the "Average DPS by Player" table.
pub fn render_averages(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[PlayerAverage],
    theme: &Theme,
) {
    if rows.is_empty() {
        render_empty(frame, area, title, theme);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Avg DPS"),
        Cell::from("Raids"),
    ])
    .style(theme.table_header);

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(Line::from(formatting::format_number(row.mean, 1)).right_aligned()),
                Cell::from(Line::from(row.samples.to_string()).right_aligned()),
            ])
            .style(row_style(i, theme))
        })
        .collect();

    let widths = [
        Constraint::Min(8),
        Constraint::Length(11),
        Constraint::Length(6),
    ];
    let widget = Table::new(body, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);

    frame.render_widget(widget, area);
}

/// Render a placeholder when the reports directory holds no sessions.
pub fn render_no_data(frame: &mut Frame, area: Rect, reports_dir: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No raid reports found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Expected {reports_dir}/<session>/report.json"),
            theme.dim,
        )),
        Line::from(Span::styled("Press 'r' to reload, 'q' to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(bordered("Raid Dashboard", theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn purge_table() -> TopTable {
        TopTable {
            title: "PURGE".into(),
            column: "spell_purge".into(),
            value_label: "used".into(),
            rows: vec![
                RankedRow {
                    name: "Thrall".into(),
                    value: 14.0,
                    session: None,
                },
                RankedRow {
                    name: "Drektar".into(),
                    value: 1250.0,
                    session: None,
                },
            ],
        }
    }

    #[test]
    fn test_table_height() {
        assert_eq!(table_height(0), 4);
        assert_eq!(table_height(1), 4);
        assert_eq!(table_height(20), 23);
    }

    #[test]
    fn test_render_top_table() {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_top_table(frame, frame.area(), &purge_table(), &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("PURGE"));
        assert!(text.contains("used"));
        assert!(text.contains("Thrall"));
        assert!(text.contains("1,250"));
    }

    #[test]
    fn test_render_top_table_empty_shows_no_data() {
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        let theme = Theme::dark();
        let mut table = purge_table();
        table.rows.clear();
        terminal
            .draw(|frame| render_top_table(frame, frame.area(), &table, &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("PURGE"));
        assert!(text.contains("no data"));
    }

    #[test]
    fn test_render_global_top_shows_sessions() {
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        let theme = Theme::light();
        let rows = vec![RankedRow {
            name: "Jaina".into(),
            value: 1520.25,
            session: Some("kara-01".into()),
        }];
        terminal
            .draw(|frame| render_global_top(frame, frame.area(), "Top 10 DPS", &rows, &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Top 10 DPS"));
        assert!(text.contains("1,520.3"));
        assert!(text.contains("kara-01"));
    }

    #[test]
    fn test_render_averages() {
        let mut terminal = Terminal::new(TestBackend::new(50, 6)).unwrap();
        let theme = Theme::classic();
        let rows = vec![PlayerAverage {
            name: "Thrall".into(),
            mean: 1200.0,
            samples: 2,
        }];
        terminal
            .draw(|frame| render_averages(frame, frame.area(), "Average DPS", &rows, &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Avg DPS"));
        assert!(text.contains("1,200.0"));
    }

    #[test]
    fn test_render_overall_empty() {
        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_global_top(frame, area, "Top 10 DPS", &[], &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("no data"));
    }

    #[test]
    fn test_render_no_data() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_no_data(frame, frame.area(), "reports", &theme))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No raid reports found"));
        assert!(text.contains("reports/<session>/report.json"));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(5, 2)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| render_top_table(frame, frame.area(), &purge_table(), &theme))
            .unwrap();
    }
}
