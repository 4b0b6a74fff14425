//! Integration tests for linking service responses into tables.

use latent_grid::{
    parse_image_tables, parse_pdf_tables, BoundingBox, CellContent, CellPosition, Error,
    ExtractedTable, LinkOptions, TableAccess, TableLinker, TableResponse,
};

fn base_response() -> TableResponse {
    TableResponse::new(
        BoundingBox::new(0, 0, 100, 100),
        vec![vec![0, 0], vec![1, 2]],
        vec![
            CellContent::text("Header"),
            CellContent::text("A"),
            CellContent::text("B"),
        ],
    )
    .with_title("Test Table")
}

/// Layout with row and column spans:
///
/// ```text
/// +-------+---+
/// |   0   | 1 |
/// +---+---+   |
/// | 2 | 3 |   |
/// |   +---+---+
/// |   |   4   |
/// +---+---+---+
/// | 5 | 6 | 7 |
/// +---+---+---+
/// ```
fn spanning_response() -> TableResponse {
    TableResponse::new(
        BoundingBox::new(5, 5, 305, 205),
        vec![
            vec![0, 0, 1],
            vec![2, 3, 1],
            vec![2, 4, 4],
            vec![5, 6, 7],
        ],
        (0..8).map(|i| CellContent::text(format!("cell {}", i))).collect(),
    )
}

fn link(response: &TableResponse) -> ExtractedTable {
    TableLinker::new().link(response).unwrap()
}

#[test]
fn test_linked_table_from_response() {
    let tables = parse_image_tables(&[base_response()]).unwrap();
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    assert_eq!(table.title.as_deref(), Some("Test Table"));
    assert_eq!(table.bbox, BoundingBox::new(0, 0, 100, 100));
    assert_eq!(table.cell_count(), 3);
    assert_eq!(table.rows().flatten().count(), 4);
}

#[test]
fn test_pdf_table_from_response() {
    let tables = parse_pdf_tables(&[base_response().on_page(2)]).unwrap();
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    assert_eq!(table.page, 2);
    assert_eq!(table.page(), Some(2));
    assert_eq!(table.title(), Some("Test Table"));
    assert_eq!(table.table().cell_count(), 3);
    assert_eq!(table.table().rows().flatten().count(), 4);
}

#[test]
fn test_grid_slots_resolve_to_listed_cells() {
    for response in [base_response(), spanning_response()] {
        let table = link(&response);
        for (r, row) in response.grid.iter().enumerate() {
            for (c, &index) in row.iter().enumerate() {
                let cell = table.get_cell(r, c).unwrap();
                assert_eq!(Some(cell), table.cell(index as usize));
                assert!(cell.positions().contains(&CellPosition::new(r, c)));
            }
        }
    }
}

#[test]
fn test_every_position_is_reachable_from_grid() {
    let table = link(&spanning_response());
    for cell in table.cells() {
        assert!(!cell.positions().is_empty());
        for pos in cell.positions() {
            assert_eq!(table.get_cell(pos.row, pos.col), Some(cell));
        }
    }
}

#[test]
fn test_every_cell_points_back_to_its_table() {
    let table = link(&spanning_response());
    for (index, cell) in table.cells().enumerate() {
        assert!(std::ptr::eq(cell.table(), &table));
        assert_eq!(cell.data().slot(), Some(index));
        assert!(cell.data().is_linked());
    }
}

#[test]
fn test_spans_match_positions() {
    let table = link(&spanning_response());
    for cell in table.cells() {
        let rows: Vec<usize> = cell.positions().iter().map(|p| p.row).collect();
        let cols: Vec<usize> = cell.positions().iter().map(|p| p.col).collect();
        let rowspan = rows.iter().max().unwrap() - rows.iter().min().unwrap() + 1;
        let colspan = cols.iter().max().unwrap() - cols.iter().min().unwrap() + 1;
        assert_eq!(cell.rowspan(), rowspan);
        assert_eq!(cell.colspan(), colspan);
    }

    assert_eq!(table.cell(1).unwrap().rowspan(), 2);
    assert_eq!(table.cell(2).unwrap().rowspan(), 2);
    assert_eq!(table.cell(4).unwrap().colspan(), 2);
}

#[test]
fn test_content_edit_is_shared_across_slots() {
    let mut tables = parse_image_tables(&[base_response()]).unwrap();
    let table = &mut tables[0];

    *table.content_at_mut(0, 0).unwrap() = Some("test".to_string());
    assert_eq!(table.cell(0).unwrap().content(), Some("test"));
    assert_eq!(table.get_cell(0, 1).unwrap().content(), Some("test"));
}

#[test]
fn test_pdf_content_edit_through_table_mut() {
    let mut tables = parse_pdf_tables(&[base_response().on_page(4)]).unwrap();
    *tables[0].table_mut().content_mut(2).unwrap() = None;
    assert!(tables[0].get_cell(1, 1).unwrap().content().is_none());
}

#[test]
fn test_content_edits_leave_structure_linked() {
    let mut tables = parse_image_tables(&[base_response()]).unwrap();
    let table = &mut tables[0];

    *table.content_at_mut(1, 0).unwrap() = Some("Header".to_string());
    *table.content_mut(0).unwrap() = Some("A".to_string());

    let header = table.get_cell(0, 0).unwrap();
    assert_eq!(header.index(), 0);
    assert_eq!(header.content(), Some("A"));
    assert_eq!(
        header.positions(),
        &[CellPosition::new(0, 0), CellPosition::new(0, 1)]
    );
    assert_eq!(header.data().slot(), Some(0));
    assert_eq!(header.bottom().len(), 2);
    assert_eq!(table.get_cell(1, 0).unwrap().content(), Some("Header"));
}

#[test]
fn test_out_of_range_index_fails_whole_table() {
    let mut response = base_response();
    response.grid[1][1] = 5;

    let err = TableLinker::new().link(&response).unwrap_err();
    match err {
        Error::InvalidCellIndex { row, col, index } => {
            assert_eq!((row, col, index), (1, 1, 5));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = parse_image_tables(&[response]).unwrap_err();
    assert!(err.is_link_error());
    assert_eq!(
        err.to_string(),
        "Invalid cell index 5 at grid position (1, 1)"
    );
}

#[test]
fn test_unreferenced_cell_fails() {
    let mut response = base_response();
    response.cells.push(CellContent::text("orphan"));
    assert!(matches!(
        TableLinker::new().link(&response),
        Err(Error::UnpositionedCell(3))
    ));
}

#[test]
fn test_first_cell_is_a_valid_reference() {
    // Index 0 must resolve like any other index by default
    let table = link(&base_response());
    assert_eq!(table.get_cell(0, 0).unwrap().content(), Some("Header"));

    let legacy = TableLinker::with_options(LinkOptions::new().reserve_zero_index());
    assert!(matches!(
        legacy.link(&base_response()),
        Err(Error::InvalidCellIndex { row: 0, col: 0, index: 0 })
    ));
}

#[test]
fn test_sequential_and_parallel_batches_agree() {
    let batch: Vec<TableResponse> = (0..16)
        .map(|i| {
            if i % 2 == 0 {
                base_response()
            } else {
                spanning_response()
            }
        })
        .collect();

    let parallel = TableLinker::new().link_all(&batch).unwrap();
    let sequential = TableLinker::with_options(LinkOptions::new().sequential())
        .link_all(&batch)
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_linked_tables_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ExtractedTable>();
    assert_send_sync::<latent_grid::PdfExtractedTable>();

    let table = link(&spanning_response());
    std::thread::scope(|scope| {
        for row in 0..table.row_count() {
            let table = &table;
            scope.spawn(move || {
                assert_eq!(table.row(row).len(), 3);
            });
        }
    });
}
