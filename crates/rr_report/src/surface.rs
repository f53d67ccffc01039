//! Drawing surface abstraction and the in-memory recording surface.
//!
//! The layout engine only ever talks to a `Surface`: it asks for text
//! measurements and issues paint operations in page coordinates (mm, origin
//! top-left). `RecordingSurface` keeps those operations as a serializable
//! `Document`, which is what the rest of the workspace persists.

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Points to millimetres.
const PT_TO_MM: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// One paint operation, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Font { size: f64, style: FontStyle },
    FillColor { color: Rgb },
    TextColor { color: Rgb },
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Text { x: f64, y: f64, align: Align, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// A finished, paginated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_width: f64,
    pub page_height: f64,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based page number of the first page containing `needle`.
    pub fn find_page(&self, needle: &str) -> Option<usize> {
        self.pages.iter().find(|p| p.contains_text(needle)).map(|p| p.number)
    }
}

/// What the layout engine requires of a 2D drawing backend.
pub trait Surface {
    type Output;

    fn add_page(&mut self);
    fn page_count(&self) -> usize;
    /// Make an existing page (0-based) current for subsequent operations.
    fn select_page(&mut self, index: usize) -> Result<(), LayoutError>;

    fn set_font(&mut self, size: f64, style: FontStyle);
    fn font_size(&self) -> f64;
    fn font_style(&self) -> FontStyle;
    fn set_fill_color(&mut self, color: Rgb);
    fn set_text_color(&mut self, color: Rgb);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn text(&mut self, x: f64, y: f64, align: Align, text: &str);

    /// Width of `text` in mm at an explicit size and style. Never changes
    /// the current font.
    fn text_width_at(&self, text: &str, size: f64, style: FontStyle) -> f64;

    /// Width of `text` in mm at the current font.
    fn text_width(&self, text: &str) -> f64 {
        self.text_width_at(text, self.font_size(), self.font_style())
    }

    fn finish(self) -> Self::Output;
}

/// Surface that records every operation into a `Document`.
#[derive(Debug)]
pub struct RecordingSurface {
    page_width: f64,
    page_height: f64,
    pages: Vec<Page>,
    current: usize,
    font_size: f64,
    font_style: FontStyle,
}

impl RecordingSurface {
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            pages: Vec::new(),
            current: 0,
            font_size: 10.0,
            font_style: FontStyle::Normal,
        }
    }

    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.add_page();
        }
        self.pages[self.current].ops.push(op);
    }
}

impl Surface for RecordingSurface {
    type Output = Document;

    fn add_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page { number, ops: Vec::new() });
        self.current = self.pages.len() - 1;
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, index: usize) -> Result<(), LayoutError> {
        if index >= self.pages.len() {
            return Err(LayoutError::NoSuchPage { index, pages: self.pages.len() });
        }
        self.current = index;
        Ok(())
    }

    fn set_font(&mut self, size: f64, style: FontStyle) {
        self.font_size = size;
        self.font_style = style;
        self.push(DrawOp::Font { size, style });
    }

    fn font_size(&self) -> f64 {
        self.font_size
    }

    fn font_style(&self) -> FontStyle {
        self.font_style
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.push(DrawOp::FillColor { color });
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.push(DrawOp::TextColor { color });
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawOp::Rect { x, y, w, h });
    }

    fn text(&mut self, x: f64, y: f64, align: Align, text: &str) {
        self.push(DrawOp::Text { x, y, align, text: text.to_string() });
    }

    fn text_width_at(&self, text: &str, size: f64, style: FontStyle) -> f64 {
        helvetica_width(text, size, style)
    }

    fn finish(self) -> Document {
        Document {
            page_width: self.page_width,
            page_height: self.page_height,
            pages: self.pages,
        }
    }
}

/// Approximate Helvetica advance width in 1/1000 em.
fn glyph_units(ch: char) -> u32 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' | 'i' | 'j' | 'l' | 'I' => 278,
        'f' | 't' | 'r' | '/' | '(' | ')' | '[' | ']' | '-' => 333,
        'm' => 833,
        'w' => 722,
        'M' => 833,
        'W' => 944,
        'A'..='Z' => 667,
        '0'..='9' | '$' | '%' => 556,
        _ => 556,
    }
}

/// Width in mm of `text` set in Helvetica at `size_pt`.
pub fn helvetica_width(text: &str, size_pt: f64, style: FontStyle) -> f64 {
    let units: u32 = text.chars().map(glyph_units).sum();
    let bold = if style == FontStyle::Bold { 1.05 } else { 1.0 };
    units as f64 / 1000.0 * size_pt * PT_TO_MM * bold
}
