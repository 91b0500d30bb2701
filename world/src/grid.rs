//! Dense occupancy grid that acts as the authoritative collision source.

use tilewire_core::{CellCoord, CellRect, Occupant, StaticTile};

/// Single grid cell: an immutable visual category plus an optional dynamic occupant.
///
/// A tile counts as occupied exactly when it holds an occupant; the static
/// layer never blocks movement on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    static_tile: StaticTile,
    occupant: Option<Occupant>,
}

impl Tile {
    const fn new(static_tile: StaticTile) -> Self {
        Self {
            static_tile,
            occupant: None,
        }
    }

    /// Visual category painted at setup.
    #[must_use]
    pub const fn static_tile(&self) -> StaticTile {
        self.static_tile
    }

    /// Dynamic object currently standing on the tile.
    #[must_use]
    pub const fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// Reports whether a dynamic object stands on the tile.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u16,
    rows: u16,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds the grid and paints the static layer around the movement band.
    pub(crate) fn new(columns: u16, rows: u16, band: CellRect) -> Self {
        let mut tiles = Vec::with_capacity(usize::from(columns) * usize::from(rows));
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                let edge = column == 0 || row == 0 || column + 1 == columns || row + 1 == rows;
                let static_tile = if edge {
                    StaticTile::WallDark
                } else if band.contains(cell) {
                    StaticTile::Floor
                } else {
                    StaticTile::Wall
                };
                tiles.push(Tile::new(static_tile));
            }
        }

        Self {
            columns,
            rows,
            tiles,
        }
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    pub(crate) fn is_occupied(&self, cell: CellCoord) -> bool {
        self.tile(cell).map_or(true, Tile::is_occupied)
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
        self.tile(cell).and_then(Tile::occupant)
    }

    pub(crate) fn static_tile(&self, cell: CellCoord) -> StaticTile {
        self.tile(cell)
            .map_or(StaticTile::WallDark, Tile::static_tile)
    }

    /// Places `occupant` on the tile. Only trail and hazard lifecycles call this.
    pub(crate) fn set_occupant(&mut self, cell: CellCoord, occupant: Occupant) {
        if let Some(tile) = self.tile_mut(cell) {
            debug_assert!(
                tile.occupant.is_none(),
                "tile {cell:?} already holds {:?}",
                tile.occupant
            );
            tile.occupant = Some(occupant);
        }
    }

    pub(crate) fn clear_occupant(&mut self, cell: CellCoord) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.occupant = None;
        }
    }

    pub(crate) fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn dimensions(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Coordinate of the tile stored at `index` in row-major order.
    pub(crate) fn cell_at(&self, index: usize) -> Option<CellCoord> {
        let columns = usize::from(self.columns);
        if columns == 0 || index >= self.tiles.len() {
            return None;
        }
        let column = u16::try_from(index % columns).ok()?;
        let row = u16::try_from(index / columns).ok()?;
        Some(CellCoord::new(column, row))
    }

    fn tile(&self, cell: CellCoord) -> Option<&Tile> {
        debug_assert!(self.contains(cell), "grid query outside bounds: {cell:?}");
        self.index(cell).and_then(|index| self.tiles.get(index))
    }

    fn tile_mut(&mut self, cell: CellCoord) -> Option<&mut Tile> {
        debug_assert!(self.contains(cell), "grid write outside bounds: {cell:?}");
        self.index(cell).and_then(|index| self.tiles.get_mut(index))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            Some(usize::from(cell.row()) * usize::from(self.columns) + usize::from(cell.column()))
        } else {
            None
        }
    }
}
