//! Linking of flat service responses into navigable tables.
//!
//! The service sends each table as a flat list of cells plus a grid of
//! indices into that list. Linking resolves every grid slot to its cell,
//! records each slot on the cell it resolves to, wires every cell to its
//! owning table and checks that the two views agree.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{CellPosition, ExtractedTable, PdfExtractedTable, TableCell};
use crate::response::{PdfTableResponse, TableResponse};

use super::options::{ErrorMode, LinkOptions};

/// Builds linked tables from service responses.
#[derive(Debug, Clone, Default)]
pub struct TableLinker {
    options: LinkOptions,
}

impl TableLinker {
    /// Create a linker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a linker with custom options.
    pub fn with_options(options: LinkOptions) -> Self {
        Self { options }
    }

    /// Get the linker options.
    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    /// Link a single image table response.
    ///
    /// Either returns a fully wired table or fails; no partial table is
    /// ever handed out.
    pub fn link(&self, response: &TableResponse) -> Result<ExtractedTable> {
        log::debug!(
            "TableLinker: linking {} cells over {} grid rows",
            response.cells.len(),
            response.grid.len()
        );

        let mut cells: Vec<TableCell> = response
            .cells
            .iter()
            .map(|c| TableCell::detached(non_empty(c.content.as_deref())))
            .collect();

        let grid = self.attach_grid(&mut cells, &response.grid)?;

        for (slot, cell) in cells.iter_mut().enumerate() {
            cell.attach(slot);
        }

        check_cells(&cells)?;

        Ok(ExtractedTable::from_parts(
            non_empty(response.title.as_deref()),
            response.bbox,
            cells,
            grid,
        ))
    }

    /// Link a single PDF table response.
    pub fn link_pdf(&self, response: &PdfTableResponse) -> Result<PdfExtractedTable> {
        let table = self.link(&response.table)?;
        Ok(PdfExtractedTable::new(table, response.page))
    }

    /// Link a batch of image table responses, keeping input order.
    pub fn link_all(&self, responses: &[TableResponse]) -> Result<Vec<ExtractedTable>> {
        self.link_batch(responses, |r| self.link(r))
    }

    /// Link a batch of PDF table responses, keeping input order.
    pub fn link_all_pdf(&self, responses: &[PdfTableResponse]) -> Result<Vec<PdfExtractedTable>> {
        self.link_batch(responses, |r| self.link_pdf(r))
    }

    fn link_batch<R, T, F>(&self, responses: &[R], link: F) -> Result<Vec<T>>
    where
        R: Sync,
        T: Send,
        F: Fn(&R) -> Result<T> + Sync,
    {
        log::debug!(
            "TableLinker: linking batch of {} tables (parallel: {})",
            responses.len(),
            self.options.parallel
        );

        let results: Vec<Result<T>> = if self.options.parallel {
            responses.par_iter().map(&link).collect()
        } else {
            responses.iter().map(&link).collect()
        };

        let mut tables = Vec::with_capacity(results.len());
        for (position, result) in results.into_iter().enumerate() {
            match result {
                Ok(table) => tables.push(table),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping table {}: {}", position, e);
                }
            }
        }

        Ok(tables)
    }

    /// Resolve the raw index grid, recording every slot on its cell.
    fn attach_grid(
        &self,
        cells: &mut [TableCell],
        index_grid: &[Vec<i64>],
    ) -> Result<Vec<Vec<usize>>> {
        let mut grid = Vec::with_capacity(index_grid.len());

        for (row, raw_row) in index_grid.iter().enumerate() {
            let mut slots = Vec::with_capacity(raw_row.len());
            for (col, &raw) in raw_row.iter().enumerate() {
                let index = self
                    .options
                    .index_policy
                    .resolve(raw, cells.len())
                    .ok_or(Error::InvalidCellIndex {
                        row,
                        col,
                        index: raw,
                    })?;
                cells[index].add_position(CellPosition::new(row, col));
                slots.push(index);
            }
            grid.push(slots);
        }

        Ok(grid)
    }
}

/// Every cell must be wired to its own slot and cover at least one position.
fn check_cells(cells: &[TableCell]) -> Result<()> {
    for (index, cell) in cells.iter().enumerate() {
        if cell.slot() != Some(index) {
            return Err(Error::DisconnectedCell(index));
        }
        if cell.positions().is_empty() {
            return Err(Error::UnpositionedCell(index));
        }
    }
    Ok(())
}

/// The service sends empty strings for blank cells and titles.
fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|s| !s.is_empty()).map(str::to_string)
}
