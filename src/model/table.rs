//! Table types.

use super::{Cell, ContentPattern, TableCell};
use serde::{Deserialize, Serialize};

/// Bounding rectangle of a table in source image/page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x1: i64,
    /// Top edge
    pub y1: i64,
    /// Right edge
    pub x2: i64,
    /// Bottom edge
    pub y2: i64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal extent.
    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    /// Vertical extent.
    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }
}

/// A linked table: the flat cell list plus the grid of cell indices.
///
/// Tables are only produced by [`TableLinker`](crate::parser::TableLinker),
/// so every cell is wired and positioned and the grid agrees with the
/// cells' positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    /// Table title, if the service detected one
    pub title: Option<String>,

    /// Bounding box in source coordinates
    pub bbox: BoundingBox,

    cells: Vec<TableCell>,
    grid: Vec<Vec<usize>>,
}

impl ExtractedTable {
    pub(crate) fn from_parts(
        title: Option<String>,
        bbox: BoundingBox,
        cells: Vec<TableCell>,
        grid: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            title,
            bbox,
            cells,
            grid,
        }
    }

    pub(crate) fn cell_data(&self) -> &[TableCell] {
        &self.cells
    }

    /// Get a cell by its index in the flat cell list.
    pub fn cell(&self, index: usize) -> Option<Cell<'_>> {
        (index < self.cells.len()).then(|| Cell::new(self, index))
    }

    /// Iterate over the distinct cells in server order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell<'_>> + '_ {
        (0..self.cells.len()).map(move |index| Cell::new(self, index))
    }

    /// Mutable access to a cell's content, by index in the flat cell list.
    ///
    /// Content is the only editable part of a linked table; positions and
    /// the grid stay fixed. An edit is visible through every slot the cell
    /// covers.
    ///
    /// ```
    /// # use latent_grid::{parse_image_tables, BoundingBox, CellContent, TableResponse};
    /// let response = TableResponse::new(
    ///     BoundingBox::default(),
    ///     vec![vec![0, 0]],
    ///     vec![CellContent::text("Header")],
    /// );
    /// let mut tables = parse_image_tables(&[response]).unwrap();
    /// *tables[0].content_mut(0).unwrap() = Some("Title".to_string());
    /// assert_eq!(tables[0].get_cell(0, 1).unwrap().content(), Some("Title"));
    /// ```
    ///
    /// Cell records themselves cannot be reached mutably:
    ///
    /// ```compile_fail
    /// # use latent_grid::ExtractedTable;
    /// fn reorder(table: &mut ExtractedTable) {
    ///     table.cells_mut().swap(0, 1);
    /// }
    /// ```
    pub fn content_mut(&mut self, index: usize) -> Option<&mut Option<String>> {
        self.cells.get_mut(index).map(|cell| &mut cell.content)
    }

    /// Mutable access to the content of the cell occupying a grid slot.
    pub fn content_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Option<String>> {
        let index = *self.grid.get(row)?.get(col)?;
        self.content_mut(index)
    }

    /// Number of distinct cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The grid as indices into the flat cell list.
    pub fn index_grid(&self) -> &[Vec<usize>] {
        &self.grid
    }

    /// Get the cell at a grid slot.
    ///
    /// Rows may be ragged, so the column is checked against that row's own
    /// width.
    pub fn get_cell(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        let index = *self.grid.get(row)?.get(col)?;
        Some(Cell::new(self, index))
    }

    /// All slots of a grid row (empty if the row does not exist).
    pub fn row(&self, row: usize) -> Vec<Cell<'_>> {
        self.grid
            .get(row)
            .map(|slots| slots.iter().map(|&i| Cell::new(self, i)).collect())
            .unwrap_or_default()
    }

    /// All slots of a grid column, skipping rows that do not reach it.
    pub fn column(&self, col: usize) -> Vec<Cell<'_>> {
        self.grid
            .iter()
            .filter_map(|slots| slots.get(col))
            .map(|&i| Cell::new(self, i))
            .collect()
    }

    /// Iterate over grid rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Cell<'_>>> + '_ {
        (0..self.grid.len()).map(move |row| self.row(row))
    }

    /// Number of grid rows.
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    /// Width of a single grid row.
    pub fn row_len(&self, row: usize) -> usize {
        self.grid.get(row).map(Vec::len).unwrap_or(0)
    }

    /// Number of columns (width of the widest row).
    pub fn column_count(&self) -> usize {
        self.grid.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if any cell spans more than one slot.
    pub fn has_merged_cells(&self) -> bool {
        self.cells.iter().any(|c| c.positions().len() > 1)
    }

    /// Find cells whose content matches, in cell-list order.
    ///
    /// Cells without content never match.
    pub fn find_cells_by_content<P: ContentPattern>(&self, pattern: P) -> Vec<Cell<'_>> {
        self.cells()
            .filter(|cell| cell.content().is_some_and(|text| pattern.matches(text)))
            .collect()
    }

    /// Get plain text representation of the grid.
    ///
    /// Slots are separated by tabs and rows by newlines; a spanning cell's
    /// text is repeated in every slot it covers.
    pub fn plain_text(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| c.content().unwrap_or(""))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table extracted from a PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExtractedTable {
    /// Page number (1-indexed)
    pub page: u32,

    table: ExtractedTable,
}

impl PdfExtractedTable {
    /// Attach a page number to a linked table.
    pub fn new(table: ExtractedTable, page: u32) -> Self {
        Self { page, table }
    }

    /// Mutable access to the underlying table, for editing content.
    pub fn table_mut(&mut self) -> &mut ExtractedTable {
        &mut self.table
    }

    /// Unwrap into the underlying table.
    pub fn into_table(self) -> ExtractedTable {
        self.table
    }
}

/// Read and query capabilities shared by image and PDF tables.
pub trait TableAccess {
    /// The underlying linked table.
    fn table(&self) -> &ExtractedTable;

    /// Source page, for tables extracted from paginated documents.
    fn page(&self) -> Option<u32> {
        None
    }

    /// Table title.
    fn title(&self) -> Option<&str> {
        self.table().title.as_deref()
    }

    /// Bounding box in source coordinates.
    fn bbox(&self) -> BoundingBox {
        self.table().bbox
    }

    /// Get the cell at a grid slot.
    fn get_cell(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        self.table().get_cell(row, col)
    }

    /// Find cells whose content matches, in cell-list order.
    fn find_cells_by_content<P: ContentPattern>(&self, pattern: P) -> Vec<Cell<'_>>
    where
        Self: Sized,
    {
        self.table().find_cells_by_content(pattern)
    }
}

impl TableAccess for ExtractedTable {
    fn table(&self) -> &ExtractedTable {
        self
    }
}

impl TableAccess for PdfExtractedTable {
    fn table(&self) -> &ExtractedTable {
        &self.table
    }

    fn page(&self) -> Option<u32> {
        Some(self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TableLinker;
    use crate::response::{CellContent, TableResponse};
    use regex::Regex;

    fn header_table() -> ExtractedTable {
        let response = TableResponse::new(
            BoundingBox::new(0, 0, 100, 100),
            vec![vec![0, 0], vec![1, 2]],
            vec![
                CellContent::text("Header"),
                CellContent::text("A"),
                CellContent::text("B"),
            ],
        )
        .with_title("Test Table");
        TableLinker::new().link(&response).unwrap()
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::new(10, 20, 110, 70);
        assert_eq!(bbox.width(), 100);
        assert_eq!(bbox.height(), 50);
    }

    #[test]
    fn test_get_cell_bounds() {
        let table = header_table();
        assert_eq!(table.get_cell(0, 0), table.cell(0));
        assert_eq!(table.get_cell(0, 1), table.cell(0));
        assert!(table.get_cell(10, 10).is_none());
        assert!(table.get_cell(0, 2).is_none());
        assert!(table.get_cell(2, 0).is_none());
    }

    #[test]
    fn test_find_cells_by_content() {
        let table = header_table();
        let re = Regex::new("(?i)header").unwrap();
        assert_eq!(table.find_cells_by_content(&re), vec![table.cell(0).unwrap()]);
        assert_eq!(table.find_cells_by_content("A").len(), 1);
        assert!(table.find_cells_by_content("header").is_empty());
    }

    #[test]
    fn test_shape() {
        let table = header_table();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_len(1), 2);
        assert_eq!(table.row_len(7), 0);
        assert_eq!(table.cell_count(), 3);
        assert!(table.has_merged_cells());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_plain_text() {
        let table = header_table();
        assert_eq!(table.plain_text(), "Header\tHeader\nA\tB");
    }

    #[test]
    fn test_pdf_table_shares_queries() {
        let pdf = PdfExtractedTable::new(header_table(), 2);
        assert_eq!(pdf.page(), Some(2));
        assert_eq!(pdf.title(), Some("Test Table"));
        assert_eq!(pdf.bbox(), BoundingBox::new(0, 0, 100, 100));
        assert_eq!(pdf.get_cell(1, 1).and_then(|c| c.content()), Some("B"));
        assert_eq!(pdf.find_cells_by_content("Head").len(), 1);
        assert_eq!(header_table().page(), None);
    }

    #[test]
    fn test_content_edit_visible_through_every_slot() {
        let mut table = header_table();
        *table.content_at_mut(0, 1).unwrap() = Some("test".to_string());
        assert_eq!(table.cell(0).unwrap().content(), Some("test"));
        assert_eq!(table.get_cell(0, 0).unwrap().content(), Some("test"));
    }

    #[test]
    fn test_content_edits_keep_grid_and_positions() {
        let mut table = header_table();
        let grid = table.index_grid().to_vec();
        let positions: Vec<_> = table.cells().map(|c| c.positions().to_vec()).collect();

        for row in 0..table.row_count() {
            for col in 0..table.row_len(row) {
                *table.content_at_mut(row, col).unwrap() = Some(format!("{}{}", row, col));
            }
        }
        *table.content_mut(2).unwrap() = None;

        assert_eq!(table.index_grid(), grid.as_slice());
        for (cell, expected) in table.cells().zip(&positions) {
            assert_eq!(cell.positions(), expected.as_slice());
            assert_eq!(cell.data().slot(), Some(cell.index()));
            for pos in cell.positions() {
                assert_eq!(table.get_cell(pos.row, pos.col), Some(cell));
            }
        }
        assert_eq!(table.get_cell(0, 0).unwrap().content(), Some("01"));
        assert!(table.get_cell(1, 1).unwrap().content().is_none());
        assert_eq!(table.cell(0).unwrap().bottom().len(), 2);
    }

    #[test]
    fn test_content_mut_out_of_range() {
        let mut table = header_table();
        assert!(table.content_mut(3).is_none());
        assert!(table.content_at_mut(0, 2).is_none());
        assert!(table.content_at_mut(5, 0).is_none());
    }
}
