//! # latent-grid
//!
//! Span-aware table model for table-extraction service responses.
//!
//! The extraction service returns each detected table as a flat list of
//! cells plus a grid of indices into that list. This library links that
//! response into a table whose cells know every grid slot they cover, and
//! offers spatial navigation over it: rows, columns, edge neighbors, spans
//! and content search.
//!
//! ## Quick Start
//!
//! ```
//! use latent_grid::parse_image_json;
//!
//! fn main() -> latent_grid::Result<()> {
//!     let json = r#"[{
//!         "box": {"x1": 0, "y1": 0, "x2": 100, "y2": 100},
//!         "title": "Test Table",
//!         "grid": [[0, 0], [1, 2]],
//!         "cells": [{"content": "Header"}, {"content": "A"}, {"content": "B"}]
//!     }]"#;
//!
//!     let tables = parse_image_json(json)?;
//!     let header = tables[0].get_cell(0, 1).unwrap();
//!     assert_eq!(header.colspan(), 2);
//!     assert_eq!(header.bottom().len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Shared spans**: a merged cell is one cell reachable from every slot
//! - **Neighbor queries**: `top`, `bottom`, `left`, `right` over whole spans
//! - **Validated linking**: malformed grids fail with the offending slot
//! - **Batch linking**: Rayon-backed, order preserving, strict or lenient
//! - **Service client**: blocking HTTP client behind the `client` feature

pub mod client;
pub mod error;
pub mod model;
pub mod parser;
pub mod response;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Cell, CellPosition, ContentPattern, Direction, ExtractedTable, Matching,
    PdfExtractedTable, TableAccess, TableCell,
};
pub use parser::{ErrorMode, IndexPolicy, LinkOptions, TableLinker};
pub use response::{CellContent, PdfTableResponse, TableResponse};

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Link image table responses with default options.
///
/// # Example
///
/// ```
/// use latent_grid::{parse_image_tables, BoundingBox, CellContent, TableResponse};
///
/// let response = TableResponse::new(
///     BoundingBox::new(0, 0, 10, 10),
///     vec![vec![0, 1]],
///     vec![CellContent::text("a"), CellContent::text("b")],
/// );
/// let tables = parse_image_tables(&[response]).unwrap();
/// assert_eq!(tables[0].cell_count(), 2);
/// ```
pub fn parse_image_tables(responses: &[TableResponse]) -> Result<Vec<ExtractedTable>> {
    parse_image_tables_with_options(responses, LinkOptions::default())
}

/// Link image table responses with custom options.
pub fn parse_image_tables_with_options(
    responses: &[TableResponse],
    options: LinkOptions,
) -> Result<Vec<ExtractedTable>> {
    TableLinker::with_options(options).link_all(responses)
}

/// Link PDF table responses with default options.
pub fn parse_pdf_tables(responses: &[PdfTableResponse]) -> Result<Vec<PdfExtractedTable>> {
    parse_pdf_tables_with_options(responses, LinkOptions::default())
}

/// Link PDF table responses with custom options.
pub fn parse_pdf_tables_with_options(
    responses: &[PdfTableResponse],
    options: LinkOptions,
) -> Result<Vec<PdfExtractedTable>> {
    TableLinker::with_options(options).link_all_pdf(responses)
}

/// Parse and link the JSON body of an `/image` response.
pub fn parse_image_json(json: &str) -> Result<Vec<ExtractedTable>> {
    parse_image_json_with_options(json, LinkOptions::default())
}

/// Parse and link the JSON body of an `/image` response with custom options.
pub fn parse_image_json_with_options(
    json: &str,
    options: LinkOptions,
) -> Result<Vec<ExtractedTable>> {
    let responses: Vec<TableResponse> = serde_json::from_str(json)?;
    parse_image_tables_with_options(&responses, options)
}

/// Parse and link the JSON body of a `/pdf` response.
pub fn parse_pdf_json(json: &str) -> Result<Vec<PdfExtractedTable>> {
    parse_pdf_json_with_options(json, LinkOptions::default())
}

/// Parse and link the JSON body of a `/pdf` response with custom options.
pub fn parse_pdf_json_with_options(
    json: &str,
    options: LinkOptions,
) -> Result<Vec<PdfExtractedTable>> {
    let responses: Vec<PdfTableResponse> = serde_json::from_str(json)?;
    parse_pdf_tables_with_options(&responses, options)
}

/// Parse and link an `/image` response read from any reader.
pub fn parse_image_reader<R: Read>(reader: R, options: LinkOptions) -> Result<Vec<ExtractedTable>> {
    let responses: Vec<TableResponse> = read_json(reader)?;
    parse_image_tables_with_options(&responses, options)
}

/// Parse and link a `/pdf` response read from any reader.
pub fn parse_pdf_reader<R: Read>(reader: R, options: LinkOptions) -> Result<Vec<PdfExtractedTable>> {
    let responses: Vec<PdfTableResponse> = read_json(reader)?;
    parse_pdf_tables_with_options(&responses, options)
}

/// Parse and link a saved `/image` response file.
///
/// # Example
///
/// ```no_run
/// use latent_grid::parse_image_file;
///
/// let tables = parse_image_file("response.json").unwrap();
/// println!("Tables: {}", tables.len());
/// ```
pub fn parse_image_file<P: AsRef<Path>>(path: P) -> Result<Vec<ExtractedTable>> {
    parse_image_reader(BufReader::new(File::open(path)?), LinkOptions::default())
}

/// Parse and link a saved `/pdf` response file.
pub fn parse_pdf_file<P: AsRef<Path>>(path: P) -> Result<Vec<PdfExtractedTable>> {
    parse_pdf_reader(BufReader::new(File::open(path)?), LinkOptions::default())
}

fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}
