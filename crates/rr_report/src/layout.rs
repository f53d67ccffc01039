// --------------------------------------------------------------------------------
// FILE: crates/rr_report/src/layout.rs
// --------------------------------------------------------------------------------
//! Sequential page layout over a `Surface`.
//!
//! Inputs:
//! - a drawing surface (measurement + paint)
//! - fixed page geometry (A4 portrait in mm unless a caller supplies another)
//!
//! Rules in this layer:
//! - One vertical cursor `y`, owned by the engine; sections move it forward only.
//! - `ensure_space(h)`: when `y + h` would pass `page_height - margin` a new page
//!   starts and `y` resets to the top margin.
//! - Wrapped text advances `font_size × LINE_HEIGHT_FACTOR` mm per line.
//! - Tables and bars are drawn at caller-given coordinates; they never paginate.
//! - `finish` stamps the footer on every page and consumes the engine, so no
//!   content can be added afterwards.

use tracing::{debug, warn};

use crate::surface::{Align, FontStyle, Rgb, Surface};
use crate::LayoutError;

/// mm of vertical advance per point of font size.
pub const LINE_HEIGHT_FACTOR: f64 = 0.35;

pub const CONFIDENTIAL_NOTICE: &str =
    "Confidential - prepared for the named submitter. Illustrative projections only.";

const TABLE_HEADER_FILL: Rgb = Rgb(207, 250, 254);
const TABLE_CELL_INSET: f64 = 3.0;
const FOOTER_INK: Rgb = Rgb(100, 116, 139);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    pub const fn a4() -> Self {
        Self { width: 210.0, height: 297.0, margin: 20.0 }
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y any block may reach.
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    /// Tallest block that fits on a fresh page.
    pub fn usable_height(&self) -> f64 {
        self.bottom() - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// A table column: header title and its share of the table width.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub title: &'a str,
    pub share: f64,
}

/// Greedy word wrap. A word wider than `max_width` sits alone on its line.
/// Whitespace-only input yields no lines.
pub fn wrap_lines(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }
    lines
}

/// Shorten `text` with a trailing ellipsis until it fits `max_width`.
fn fit_to_width(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
    if measure(text) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if measure(&candidate) <= max_width {
            return candidate;
        }
    }
    String::new()
}

pub struct LayoutEngine<S: Surface> {
    surface: S,
    geometry: PageGeometry,
    y: f64,
}

impl<S: Surface> LayoutEngine<S> {
    /// Start on the first page with the cursor at the top margin.
    pub fn new(mut surface: S, geometry: PageGeometry) -> Self {
        if surface.page_count() == 0 {
            surface.add_page();
        }
        Self { surface, geometry, y: geometry.margin }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// 1-based number of the page being laid out.
    pub fn page_number(&self) -> usize {
        self.surface.page_count()
    }

    pub fn new_page(&mut self) {
        self.surface.add_page();
        self.y = self.geometry.margin;
        debug!(page = self.surface.page_count(), "page break");
    }

    /// Break the page if a block of `height` mm would cross the bottom margin.
    /// Returns whether a break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if height > self.geometry.usable_height() {
            warn!(height, usable = self.geometry.usable_height(), "block taller than a page");
        }
        if self.y + height > self.geometry.bottom() {
            self.new_page();
            true
        } else {
            false
        }
    }

    // ----- paint pass-throughs -----

    pub fn font(&mut self, size: f64, style: FontStyle) {
        self.surface.set_font(size, style);
    }

    pub fn fill(&mut self, color: Rgb) {
        self.surface.set_fill_color(color);
    }

    pub fn ink(&mut self, color: Rgb) {
        self.surface.set_text_color(color);
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.surface.rect(x, y, w, h);
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str) {
        self.surface.text(x, y, Align::Left, text);
    }

    pub fn text_centered(&mut self, y: f64, text: &str) {
        let cx = self.geometry.width / 2.0;
        self.surface.text(cx, y, Align::Center, text);
    }

    pub fn text_width(&self, text: &str) -> f64 {
        self.surface.text_width(text)
    }

    // ----- composite primitives -----

    /// Lines `text` would occupy at `font_size` (current style) within
    /// `max_width`. Records nothing on the surface.
    pub fn measure_wrapped(&self, text: &str, max_width: f64, font_size: f64) -> usize {
        let style = self.surface.font_style();
        wrap_lines(text, max_width, |s| self.surface.text_width_at(s, font_size, style)).len()
    }

    /// Draw `text` wrapped to `max_width` starting at the cursor. The cursor
    /// does not move; the returned height is `lines × font_size × LINE_HEIGHT_FACTOR`.
    pub fn draw_wrapped_text(&mut self, text: &str, x: f64, max_width: f64, font_size: f64) -> f64 {
        let style = self.surface.font_style();
        self.surface.set_font(font_size, style);
        let lines = wrap_lines(text, max_width, |s| self.surface.text_width(s));
        let step = font_size * LINE_HEIGHT_FACTOR;
        for (i, line) in lines.iter().enumerate() {
            self.surface.text(x, self.y + i as f64 * step, Align::Left, line);
        }
        lines.len() as f64 * step
    }

    /// Shaded header band followed by body rows every `row_height` mm.
    /// Returns the total height drawn.
    pub fn draw_table(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        columns: &[Column<'_>],
        rows: &[Vec<String>],
        row_height: f64,
    ) -> Result<f64, LayoutError> {
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(LayoutError::TableShape {
                    row,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
        }

        let size = self.surface.font_size();
        let cell_widths: Vec<f64> = columns.iter().map(|c| c.share * width).collect();
        let baseline = row_height * 2.0 / 3.0;

        self.surface.set_fill_color(TABLE_HEADER_FILL);
        self.surface.rect(x, y, width, row_height);
        self.surface.set_font(size, FontStyle::Bold);
        let titles: Vec<&str> = columns.iter().map(|c| c.title).collect();
        self.draw_row(x, y + baseline, &cell_widths, &titles);

        self.surface.set_font(size, FontStyle::Normal);
        for (i, cells) in rows.iter().enumerate() {
            let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
            let row_y = y + (i + 1) as f64 * row_height + baseline;
            self.draw_row(x, row_y, &cell_widths, &cells);
        }

        Ok((rows.len() + 1) as f64 * row_height)
    }

    fn draw_row(&mut self, x: f64, y: f64, widths: &[f64], cells: &[&str]) {
        let mut cx = x + TABLE_CELL_INSET;
        for (cell, w) in cells.iter().zip(widths) {
            let fitted = fit_to_width(cell, w - TABLE_CELL_INSET, |s| self.surface.text_width(s));
            self.surface.text(cx, y, Align::Left, &fitted);
            cx += w;
        }
    }

    /// Filled bar of length `|value| × scale` using the current fill colour.
    /// The sign only matters to the caller's label. Returns the bar length.
    pub fn draw_proportional_bar(
        &mut self,
        x: f64,
        y: f64,
        value: f64,
        scale: f64,
        height: f64,
    ) -> Result<f64, LayoutError> {
        if !value.is_finite() {
            return Err(LayoutError::NonFinite("bar value"));
        }
        if !scale.is_finite() || scale < 0.0 {
            return Err(LayoutError::NonFinite("bar scale"));
        }
        let len = value.abs() * scale;
        if len > 0.0 {
            self.surface.rect(x, y, len, height);
        }
        Ok(len)
    }

    /// Stamp `Page i of n` and the confidentiality line on every page, then
    /// hand back the surface output.
    pub fn finish(mut self) -> Result<S::Output, LayoutError> {
        let total = self.surface.page_count();
        let footer_y = self.geometry.height - self.geometry.margin / 2.0;
        for index in 0..total {
            self.surface.select_page(index)?;
            self.surface.set_font(8.0, FontStyle::Normal);
            self.surface.set_text_color(FOOTER_INK);
            let cx = self.geometry.width / 2.0;
            self.surface
                .text(cx, footer_y - 4.0, Align::Center, &format!("Page {} of {}", index + 1, total));
            self.surface.text(cx, footer_y, Align::Center, CONFIDENTIAL_NOTICE);
        }
        debug!(pages = total, "document finalized");
        Ok(self.surface.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn engine() -> LayoutEngine<RecordingSurface> {
        let g = PageGeometry::a4();
        LayoutEngine::new(RecordingSurface::new(g.width, g.height), g)
    }

    /// One unit per character makes wrap arithmetic obvious.
    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn a4_geometry() {
        let g = PageGeometry::a4();
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.bottom(), 277.0);
    }

    #[test]
    fn wrap_is_greedy() {
        let lines = wrap_lines("aa bb cc dd", 5.0, chars);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
        let lines = wrap_lines("aa bb cc", 4.0, chars);
        assert_eq!(lines, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_lines("a extraordinarily b", 5.0, chars);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
        assert!(wrap_lines("   ", 5.0, chars).is_empty());
    }

    #[test]
    fn wrapped_height_is_lines_times_factor() {
        let mut e = engine();
        let text = "word ".repeat(200);
        let n = e.measure_wrapped(&text, 160.0, 10.0);
        let h = e.draw_wrapped_text(&text, 25.0, 160.0, 10.0);
        assert!(n > 1);
        assert!((h - n as f64 * 10.0 * LINE_HEIGHT_FACTOR).abs() < 1e-4);
        // Cursor is left where it was.
        assert_eq!(e.y(), 20.0);
    }

    #[test]
    fn measuring_leaves_no_ops_behind() {
        let mut e = engine();
        e.font(20.0, FontStyle::Normal);
        let text = "word ".repeat(60);
        let n = e.measure_wrapped(&text, 160.0, 10.0);
        e.font(10.0, FontStyle::Normal);
        assert_eq!(n, e.measure_wrapped(&text, 160.0, 10.0));

        // Measure near the bottom, then break: the abandoned page must only
        // carry the 20pt font set above and the footer.
        e.set_y(275.0);
        let h = e.measure_wrapped(&text, 160.0, 12.0) as f64 * 12.0 * LINE_HEIGHT_FACTOR;
        assert!(e.ensure_space(h));
        let doc = e.finish().unwrap();
        let fonts: Vec<f64> = doc.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Font { size, .. } => Some(*size),
                _ => None,
            })
            .collect();
        assert_eq!(fonts, vec![20.0, 10.0, 8.0]);
    }

    #[test]
    fn ensure_space_breaks_exactly_past_bottom() {
        let mut e = engine();
        e.set_y(187.0);
        assert!(!e.ensure_space(90.0));
        assert_eq!(e.page_number(), 1);
        e.set_y(187.5);
        assert!(e.ensure_space(90.0));
        assert_eq!(e.page_number(), 2);
        assert_eq!(e.y(), 20.0);
    }

    #[test]
    fn ensure_space_keeps_block_above_bottom() {
        let mut e = engine();
        for h in [10.0, 55.0, 90.0, 120.0, 200.0, 237.0] {
            e.set_y(150.0);
            e.ensure_space(h);
            assert!(e.y() + h <= e.geometry().bottom(), "height {h}");
        }
    }

    #[test]
    fn table_rejects_ragged_rows() {
        let mut e = engine();
        let cols = [Column { title: "A", share: 0.5 }, Column { title: "B", share: 0.5 }];
        let rows = vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string()]];
        assert_eq!(
            e.draw_table(23.0, 100.0, 164.0, &cols, &rows, 6.0),
            Err(LayoutError::TableShape { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn table_height_counts_header() {
        let mut e = engine();
        let cols = [Column { title: "A", share: 0.5 }, Column { title: "B", share: 0.5 }];
        let rows = vec![vec!["1".to_string(), "2".to_string()]; 9];
        let h = e.draw_table(23.0, 100.0, 164.0, &cols, &rows, 6.0).unwrap();
        assert_eq!(h, 60.0);
    }

    #[test]
    fn bar_length_uses_magnitude() {
        let mut e = engine();
        assert_eq!(e.draw_proportional_bar(45.0, 10.0, -5.76, 2.0, 4.0).unwrap(), 11.52);
        assert_eq!(e.draw_proportional_bar(45.0, 10.0, 0.0, 2.0, 4.0).unwrap(), 0.0);
        assert!(e.draw_proportional_bar(45.0, 10.0, f64::NAN, 2.0, 4.0).is_err());
    }

    #[test]
    fn finish_stamps_every_page() {
        let mut e = engine();
        e.new_page();
        e.new_page();
        let doc = e.finish().unwrap();
        assert_eq!(doc.page_count(), 3);
        for (i, page) in doc.pages.iter().enumerate() {
            assert!(page.contains_text(&format!("Page {} of 3", i + 1)));
            assert!(page.contains_text(CONFIDENTIAL_NOTICE));
        }
        assert!(doc.pages[0]
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Font { size, .. } if *size == 8.0)));
    }
}
