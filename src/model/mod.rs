//! Table model types for extracted table content.
//!
//! A linked table owns its cells in one flat arena; the grid stores arena
//! indices, and every navigation query hands out borrowed [`Cell`] views
//! that resolve back through the owning table.

mod cell;
mod pattern;
mod table;

pub use cell::{Cell, CellPosition, Direction, TableCell};
pub use pattern::{ContentPattern, Matching};
pub use table::{BoundingBox, ExtractedTable, PdfExtractedTable, TableAccess};
