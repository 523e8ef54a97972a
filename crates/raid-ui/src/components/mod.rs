//! Reusable line-level building blocks.

pub mod bar_chart;
pub mod header;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad or cut `text` to exactly `width` terminal columns.
///
/// Cut text ends in `…`. Wide characters that would straddle the limit are
/// dropped and replaced by padding.
pub fn fit_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        return format!("{text}{}", " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width - used));
    out
}
