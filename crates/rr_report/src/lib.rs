//! rr_report: paginated layout engine and report generator.
//!
//! Determinism rules:
//! - No filesystem or network I/O here. Callers persist the `Document`.
//! - Fixed section order and fixed page geometry.
//! - Identical `ReportData` + `ReportOptions` produce an identical `Document`.
//!
//! Layers:
//! - `surface`: what the engine needs from a 2D drawing backend, plus the
//!   recording backend that yields a serializable `Document`.
//! - `layout`: the cursor/page state machine (breaks, wrapping, tables, bars).
//! - `structure`: inputs and the derived report model.
//! - `generator`: the section sequence.
//! - `render_text`: plain-text fallback (feature `render_text`).

#![deny(unsafe_code)]

pub mod surface;
pub mod layout;
pub mod structure;
pub mod generator;
#[cfg(feature = "render_text")]
pub mod render_text;

// ===== Errors =====

/// Failures while building or laying out a report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid report input: {0}")]
    InvalidInput(&'static str),
    #[error("non-finite or negative {0}")]
    NonFinite(&'static str),
    #[error("table row {row} has {found} cells, expected {expected}")]
    TableShape { row: usize, expected: usize, found: usize },
    #[error("page index {index} out of range ({pages} pages)")]
    NoSuchPage { index: usize, pages: usize },
}

pub use generator::{generate_report, render_document};
pub use layout::{Column, LayoutEngine, PageGeometry, CONFIDENTIAL_NOTICE, LINE_HEIGHT_FACTOR};
pub use structure::{build_report_model, ReportData, ReportModel, ReportOptions, DEFAULT_PORTFOLIO_VALUE};
pub use surface::{Document, DrawOp, FontStyle, Page, RecordingSurface, Rgb, Surface};

#[cfg(feature = "render_text")]
pub use render_text::render_text;

/// Text fallback straight from inputs.
#[cfg(feature = "render_text")]
pub fn generate_text_report(data: &ReportData, options: &ReportOptions) -> Result<String, LayoutError> {
    let model = build_report_model(data, options)?;
    Ok(render_text(&model))
}
