use crate::components::fit_width;
use crate::themes::Theme;
use raid_core::formatting::{format_compact, format_stat};
use raid_data::ranking::ChartPayload;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Configuration controlling visual appearance of a bar.
pub struct BarConfig {
    /// Width in terminal columns of the bar portion (excluding labels).
    pub width: u16,
    /// Character used to fill the completed portion of the bar.
    pub filled_char: char,
    /// Character used to fill the empty portion of the bar.
    pub empty_char: char,
    /// Print values as `1.2k` instead of `1,234`.
    pub compact: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            compact: false,
        }
    }
}

// ── ValueBar ──────────────────────────────────────────────────────────────────

/// One labeled horizontal bar scaled against the largest value of its chart.
pub struct ValueBar<'a> {
    pub label: &'a str,
    pub value: f64,
    /// Value that fills the whole bar.
    pub max: f64,
    /// Display columns reserved for the label.
    pub label_width: usize,
    pub fill: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ValueBar<'a> {
    pub fn new(label: &'a str, value: f64, max: f64, fill: Style, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            max,
            label_width: 14,
            fill,
            theme,
            config: BarConfig::default(),
        }
    }

    /// Number of filled cells; at least one for any positive value.
    pub fn filled_cells(&self) -> u16 {
        if self.max <= 0.0 || self.value <= 0.0 {
            return 0;
        }
        let ratio = (self.value / self.max).min(1.0);
        let cells = (ratio * self.config.width as f64).round() as u16;
        cells.max(1)
    }

    pub fn value_text(&self) -> String {
        if self.config.compact {
            format_compact(self.value)
        } else {
            format_stat(self.value)
        }
    }

    /// Render as `label █████░░░ value`.
    pub fn to_line(&self) -> Line<'a> {
        let filled = self.filled_cells();
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        Line::from(vec![
            Span::styled(
                format!("{} ", fit_width(self.label, self.label_width)),
                self.theme.text,
            ),
            Span::styled(filled_str, self.fill),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(format!(" {}", self.value_text()), self.theme.bar_label),
        ])
    }
}

// ── Chart ─────────────────────────────────────────────────────────────────────

/// Panel width under which chart values switch to compact notation.
pub const COMPACT_BELOW: u16 = 40;

/// Lines of a whole chart for a panel `inner_width` columns wide.
///
/// Bars keep the payload order, so the top value is drawn first. Panels
/// narrower than [`COMPACT_BELOW`] print compact values. An empty payload
/// yields a single dimmed "no data" line.
pub fn chart_lines<'a>(
    chart: &'a ChartPayload,
    inner_width: u16,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    if chart.bars.is_empty() {
        return vec![Line::from(Span::styled("no data", theme.dim))];
    }

    let compact = inner_width < COMPACT_BELOW;
    let render_value = |v: f64| if compact { format_compact(v) } else { format_stat(v) };

    let max = chart.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let value_width = chart
        .bars
        .iter()
        .map(|b| render_value(b.value).len())
        .max()
        .unwrap_or(0);
    let label_width = (inner_width as usize / 3).clamp(4, 18);
    // label + space + bar + space + value
    let bar_width = (inner_width as usize)
        .saturating_sub(label_width + value_width + 2)
        .max(1) as u16;

    let fill = theme.bar_style(&chart.column);
    chart
        .bars
        .iter()
        .map(|bar| {
            let mut value_bar = ValueBar::new(&bar.label, bar.value, max, fill, theme);
            value_bar.label_width = label_width;
            value_bar.config.width = bar_width;
            value_bar.config.compact = compact;
            value_bar.to_line()
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
