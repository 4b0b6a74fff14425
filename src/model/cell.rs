//! Table cell types and grid navigation.

use super::ExtractedTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A grid slot coordinate (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
}

impl CellPosition {
    /// Create a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta; `None` if either component would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for CellPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side of a cell used for neighbor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row above
    Top,
    /// Row below
    Bottom,
    /// Column to the left
    Left,
    /// Column to the right
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid offset as `(row, col)` delta.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The direction pointing back.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Cell record stored in a table's cell arena.
///
/// Only `content` is editable; positions and the owning slot are fixed when
/// the table is linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Text content (`None` for empty or placeholder cells)
    pub content: Option<String>,

    positions: Vec<CellPosition>,
    slot: Option<usize>,
}

impl TableCell {
    /// Create a cell that is not yet part of any table.
    pub(crate) fn detached(content: Option<String>) -> Self {
        Self {
            content,
            positions: Vec::new(),
            slot: None,
        }
    }

    /// Grid slots covered by this cell, in row-major order.
    pub fn positions(&self) -> &[CellPosition] {
        &self.positions
    }

    /// Index of this cell in its owning table's cell list.
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Check if the cell has been wired to a table.
    pub fn is_linked(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn add_position(&mut self, position: CellPosition) {
        self.positions.push(position);
    }

    pub(crate) fn attach(&mut self, slot: usize) {
        self.slot = Some(slot);
    }
}

/// A borrowed view of one cell inside its owning table.
///
/// Two views are equal when they refer to the same cell of the same table,
/// so a spanning cell compares equal to itself at every slot it occupies.
#[derive(Clone, Copy)]
pub struct Cell<'t> {
    table: &'t ExtractedTable,
    index: usize,
}

impl<'t> Cell<'t> {
    pub(crate) fn new(table: &'t ExtractedTable, index: usize) -> Self {
        Self { table, index }
    }

    /// Index of the cell in the table's flat cell list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The owning table.
    pub fn table(&self) -> &'t ExtractedTable {
        self.table
    }

    /// The stored cell record.
    pub fn data(&self) -> &'t TableCell {
        &self.table.cell_data()[self.index]
    }

    /// Text content, if any.
    pub fn content(&self) -> Option<&'t str> {
        self.data().content.as_deref()
    }

    /// All grid slots covered by the cell.
    pub fn positions(&self) -> &'t [CellPosition] {
        self.data().positions()
    }

    /// The `index`-th covered slot, or `None` past the last one.
    pub fn coordinates(&self, index: usize) -> Option<CellPosition> {
        self.positions().get(index).copied()
    }

    /// First covered slot (top-left of the span).
    pub fn anchor(&self) -> Option<CellPosition> {
        self.coordinates(0)
    }

    /// Number of rows the cell spans.
    pub fn rowspan(&self) -> usize {
        extent(self.positions().iter().map(|p| p.row))
    }

    /// Number of columns the cell spans.
    pub fn colspan(&self) -> usize {
        extent(self.positions().iter().map(|p| p.col))
    }

    /// Check if the cell covers more than one slot.
    pub fn is_merged(&self) -> bool {
        self.positions().len() > 1
    }

    /// Every slot of the grid row holding the `index`-th position.
    ///
    /// A spanning cell appears once per slot it covers in that row.
    pub fn row(&self, index: usize) -> Vec<Cell<'t>> {
        match self.coordinates(index) {
            Some(pos) => self.table.row(pos.row),
            None => Vec::new(),
        }
    }

    /// Every slot of the grid column holding the `index`-th position.
    ///
    /// Rows too short to reach the column are skipped.
    pub fn column(&self, index: usize) -> Vec<Cell<'t>> {
        match self.coordinates(index) {
            Some(pos) => self.table.column(pos.col),
            None => Vec::new(),
        }
    }

    /// Cells directly above this cell's span.
    pub fn top(&self) -> Vec<Cell<'t>> {
        self.neighbors(Direction::Top)
    }

    /// Cells directly below this cell's span.
    pub fn bottom(&self) -> Vec<Cell<'t>> {
        self.neighbors(Direction::Bottom)
    }

    /// Cells directly left of this cell's span.
    pub fn left(&self) -> Vec<Cell<'t>> {
        self.neighbors(Direction::Left)
    }

    /// Cells directly right of this cell's span.
    pub fn right(&self) -> Vec<Cell<'t>> {
        self.neighbors(Direction::Right)
    }

    /// Distinct cells sharing an edge with this cell on the given side.
    ///
    /// Every covered slot is shifted one step; shifts leaving the grid or
    /// landing inside this cell's own span are dropped. Results keep the
    /// order in which they are first reached.
    pub fn neighbors(&self, direction: Direction) -> Vec<Cell<'t>> {
        let (d_row, d_col) = direction.offset();
        let own = self.positions();
        let mut found: Vec<Cell<'t>> = Vec::new();

        for pos in own {
            let Some(target) = pos.offset(d_row, d_col) else {
                continue;
            };
            if own.contains(&target) {
                continue;
            }
            if let Some(cell) = self.table.get_cell(target.row, target.col) {
                if !found.contains(&cell) {
                    found.push(cell);
                }
            }
        }

        found
    }
}

fn extent(values: impl Iterator<Item = usize>) -> usize {
    let (min, max) = values.fold((usize::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min > max {
        0
    } else {
        max - min + 1
    }
}

impl PartialEq for Cell<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.index == other.index
    }
}

impl Eq for Cell<'_> {}

impl Hash for Cell<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.table, state);
        self.index.hash(state);
    }
}

impl fmt::Debug for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("index", &self.index)
            .field("content", &self.content())
            .field("positions", &self.positions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TableLinker;
    use crate::response::{CellContent, TableResponse};
    use crate::BoundingBox;

    fn link(contents: &[&str], grid: Vec<Vec<i64>>) -> ExtractedTable {
        let cells = contents.iter().map(|c| CellContent::text(*c)).collect();
        let response = TableResponse::new(BoundingBox::default(), grid, cells);
        TableLinker::new().link(&response).unwrap()
    }

    #[test]
    fn test_position_offset() {
        let pos = CellPosition::new(0, 2);
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, -1), Some(CellPosition::new(0, 1)));
        assert_eq!(pos.offset(1, 1), Some(CellPosition::new(1, 3)));
        assert_eq!(pos.to_string(), "(0, 2)");
    }

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            let (r, c) = dir.offset();
            let (or, oc) = dir.opposite().offset();
            assert_eq!((r + or, c + oc), (0, 0));
        }
    }

    #[test]
    fn test_spans_and_coordinates() {
        // A tall cell in column 0 next to a wide cell over two rows
        let table = link(
            &["Tall", "Wide", "X", "Y"],
            vec![vec![0, 1, 1], vec![0, 1, 1], vec![0, 2, 3]],
        );

        let tall = table.cell(0).unwrap();
        assert_eq!(tall.rowspan(), 3);
        assert_eq!(tall.colspan(), 1);
        assert_eq!(tall.coordinates(2), Some(CellPosition::new(2, 0)));
        assert_eq!(tall.coordinates(3), None);

        let wide = table.cell(1).unwrap();
        assert_eq!(wide.rowspan(), 2);
        assert_eq!(wide.colspan(), 2);
        assert_eq!(wide.anchor(), Some(CellPosition::new(0, 1)));
        assert_eq!(
            wide.positions(),
            &[
                CellPosition::new(0, 1),
                CellPosition::new(0, 2),
                CellPosition::new(1, 1),
                CellPosition::new(1, 2),
            ]
        );
        assert!(wide.is_merged());
        assert!(!table.cell(2).unwrap().is_merged());
    }

    #[test]
    fn test_tall_cell_has_one_neighbor_per_row() {
        let table = link(&["Tall", "A", "B", "C"], vec![vec![0, 1], vec![0, 2], vec![0, 3]]);
        let tall = table.cell(0).unwrap();

        let right: Vec<usize> = tall.right().iter().map(|c| c.index()).collect();
        assert_eq!(right, vec![1, 2, 3]);
        assert!(tall.top().is_empty());
        assert!(tall.bottom().is_empty());
        assert!(tall.left().is_empty());
    }

    #[test]
    fn test_wide_neighbor_reported_once() {
        let table = link(&["Top", "Bottom"], vec![vec![0, 0], vec![1, 1]]);
        let top = table.cell(0).unwrap();
        assert_eq!(top.bottom(), vec![table.cell(1).unwrap()]);
        assert_eq!(table.cell(1).unwrap().top(), vec![top]);
    }

    #[test]
    fn test_row_and_column_with_bad_index() {
        let table = link(&["A", "B"], vec![vec![0, 1]]);
        let a = table.cell(0).unwrap();
        assert_eq!(a.row(0).len(), 2);
        assert!(a.row(1).is_empty());
        assert!(a.column(5).is_empty());
    }

    #[test]
    fn test_ragged_column_skips_short_rows() {
        let table = link(&["A", "B", "C", "D"], vec![vec![0, 1], vec![2], vec![3, 1]]);
        let b = table.cell(1).unwrap();
        let column: Vec<usize> = b.column(0).iter().map(|c| c.index()).collect();
        assert_eq!(column, vec![1, 1]);
        // (1, 1) lies past the end of the short row
        assert!(table.cell(2).unwrap().right().is_empty());
    }

    #[test]
    fn test_cell_equality_is_identity() {
        let table = link(&["Same", "Same"], vec![vec![0, 1]]);
        let other = table.clone();
        assert_ne!(table.cell(0).unwrap(), table.cell(1).unwrap());
        assert_ne!(table.cell(0).unwrap(), other.cell(0).unwrap());
        assert_eq!(table.get_cell(0, 0), table.cell(0));
    }

    #[test]
    fn test_extent_of_nothing_is_zero() {
        assert_eq!(extent(std::iter::empty()), 0);
        assert_eq!(extent([4].into_iter()), 1);
    }
}
