//! Sweeper placement and proximity scan.

use tilewire_core::{CellCoord, CellRect, Occupant};

use crate::grid::Grid;

/// Offset of the interaction window's lower-left cell relative to the player.
const INTERACTION_OFFSET: (i32, i32) = (-2, -1);
/// Columns and rows covered by the interaction window.
const INTERACTION_SPAN: (i32, i32) = (6, 4);

#[derive(Clone, Copy, Debug)]
pub(crate) struct Hazard {
    region: CellRect,
}

impl Hazard {
    pub(crate) fn new(region: CellRect) -> Self {
        Self { region }
    }

    pub(crate) fn region(&self) -> CellRect {
        self.region
    }

    /// Stamps the footprint into the grid. Called once during setup.
    pub(crate) fn place(&self, grid: &mut Grid) {
        for cell in self.region.cells() {
            grid.set_occupant(cell, Occupant::Hazard);
        }
    }
}

/// Cells around `center` that count as being within talking distance.
pub(crate) fn interaction_window(center: CellCoord) -> impl Iterator<Item = CellCoord> {
    let (column_offset, row_offset) = INTERACTION_OFFSET;
    let (columns, rows) = INTERACTION_SPAN;
    (row_offset..row_offset + rows).flat_map(move |row| {
        (column_offset..column_offset + columns).filter_map(move |column| center.offset(column, row))
    })
}

/// Reports whether any in-bounds cell of the window holds the sweeper.
pub(crate) fn sweeper_in_reach(grid: &Grid, center: CellCoord) -> bool {
    interaction_window(center)
        .filter(|cell| grid.contains(*cell))
        .any(|cell| grid.occupant(cell) == Some(Occupant::Hazard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewire_core::CellRectSize;

    #[test]
    fn window_spans_six_columns_and_four_rows() {
        let cells: Vec<CellCoord> = interaction_window(CellCoord::new(10, 10)).collect();
        assert_eq!(cells.len(), 24);
        assert_eq!(cells.first(), Some(&CellCoord::new(8, 9)));
        assert_eq!(cells.last(), Some(&CellCoord::new(13, 12)));
    }

    #[test]
    fn window_is_clipped_at_the_origin() {
        let cells: Vec<CellCoord> = interaction_window(CellCoord::new(0, 0)).collect();
        assert_eq!(cells.len(), 12);
        assert!(cells.iter().all(|cell| cell.column() <= 3 && cell.row() <= 2));
    }

    #[test]
    fn reach_detects_the_footprint_corner() {
        let band = CellRect::from_origin_and_size(CellCoord::new(1, 1), CellRectSize::new(18, 18));
        let mut grid = Grid::new(20, 20, band);
        let hazard = Hazard::new(CellRect::from_origin_and_size(
            CellCoord::new(10, 10),
            CellRectSize::new(2, 2),
        ));
        hazard.place(&mut grid);

        assert!(sweeper_in_reach(&grid, CellCoord::new(7, 9)));
        assert!(sweeper_in_reach(&grid, CellCoord::new(13, 12)));
        assert!(!sweeper_in_reach(&grid, CellCoord::new(6, 9)));
        assert!(!sweeper_in_reach(&grid, CellCoord::new(10, 7)));
        assert!(!sweeper_in_reach(&grid, CellCoord::new(11, 14)));
    }
}
