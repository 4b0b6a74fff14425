//! Wire types for the extraction service's table responses.
//!
//! These mirror the JSON returned by the `/image` and `/pdf` endpoints and
//! are consumed by [`TableLinker`](crate::parser::TableLinker).

use crate::model::BoundingBox;
use serde::Deserialize;

/// Raw cell record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CellContent {
    /// Text content (omitted by the service for empty cells)
    #[serde(default)]
    pub content: Option<String>,
}

impl CellContent {
    /// Create a cell record with text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Create an empty cell record.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One table as returned by the `/image` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableResponse {
    /// Bounding box of the table
    #[serde(rename = "box")]
    pub bbox: BoundingBox,

    /// Detected title
    #[serde(default)]
    pub title: Option<String>,

    /// Grid of indices into `cells`, one inner list per row
    pub grid: Vec<Vec<i64>>,

    /// Flat list of distinct cells
    pub cells: Vec<CellContent>,
}

impl TableResponse {
    /// Create a response without a title.
    pub fn new(bbox: BoundingBox, grid: Vec<Vec<i64>>, cells: Vec<CellContent>) -> Self {
        Self {
            bbox,
            title: None,
            grid,
            cells,
        }
    }

    /// Set the title and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a page number, producing a PDF response.
    pub fn on_page(self, page: u32) -> PdfTableResponse {
        PdfTableResponse { table: self, page }
    }
}

/// One table as returned by the `/pdf` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PdfTableResponse {
    /// Table fields shared with image responses
    #[serde(flatten)]
    pub table: TableResponse,

    /// Page number the table was found on
    pub page: u32,
}
