//! The facade wires layout and grid errors into one `Result`.

use weft::prelude::*;

fn lay_out_and_select() -> Result<usize> {
    let mut panel = WrapPanel::new().item_width(30.0)?;
    for _ in 0..5 {
        panel.add_child(Leaf::new().height(10.0));
    }
    panel.measure(Size::new(100.0, 100.0))?;
    panel.arrange(Rect::new(0.0, 0.0, 100.0, 100.0))?;

    let grid = weft::GridModel::new([ColumnId(0), ColumnId(1), ColumnId(2)], [0u32, 1]);
    let mut selection = SelectedCells::new();
    for index in 0..panel.child_count() {
        let rect = panel.child(index).and_then(|c| c.layout_rect()).unwrap_or_default();
        let row = (rect.y / 10.0) as u32;
        let column = ColumnId((rect.x / 30.0) as u64);
        selection.add_cell(&CellInfo::new(row, column), &grid)?;
    }
    Ok(selection.len())
}

#[test]
fn layout_drives_selection() {
    assert_eq!(lay_out_and_select(), Ok(5));
}

#[test]
fn errors_convert_into_facade_error() {
    let layout: Error = weft::LayoutError::SingleChildOnly.into();
    assert!(matches!(layout, Error::Layout(_)));
    assert_eq!(layout.to_string(), "layout: only one child allowed");

    let grid: Error = weft::GridError::UnknownItem.into();
    assert!(std::error::Error::source(&grid).is_some());
}

#[test]
fn unknown_cells_surface_as_grid_errors() {
    let grid = weft::GridModel::new([ColumnId(0)], ["only"]);
    let mut selection = SelectedCells::new();
    let err = selection
        .add_cell(&CellInfo::new("missing", ColumnId(0)), &grid)
        .map_err(Error::from);
    assert_eq!(err, Err(Error::Grid(weft::GridError::UnknownItem)));
}
