//! Validated game configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, CellRect, CellRectSize, Direction};

/// Extent of the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSize {
    /// Number of tile columns.
    pub columns: u16,
    /// Number of tile rows.
    pub rows: u16,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            columns: 100,
            rows: 100,
        }
    }
}

/// Tiles kept free between the grid edge and the movement band, per side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    /// Columns reserved along the low-column edge.
    pub left: u16,
    /// Columns reserved along the high-column edge.
    pub right: u16,
    /// Rows reserved along the low-row edge.
    pub bottom: u16,
    /// Rows reserved along the high-row edge.
    pub top: u16,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 2,
            right: 3,
            bottom: 2,
            top: 4,
        }
    }
}

/// Straight run of wire laid before the first input, ending under the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedTrail {
    /// Number of segments in the run.
    pub length: u16,
    /// Direction the run was laid in.
    pub direction: Direction,
}

impl Default for SeedTrail {
    fn default() -> Self {
        Self {
            length: 5,
            direction: Direction::Up,
        }
    }
}

/// Placement of the sweeper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HazardConfig {
    /// Lower-left cell of the footprint.
    pub origin: CellCoord,
    /// Footprint size in tiles.
    pub size: CellRectSize,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            origin: CellCoord::new(20, 20),
            size: CellRectSize::new(12, 10),
        }
    }
}

/// Complete set of tunable values the world is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Grid extent.
    pub grid: GridSize,
    /// Margins that carve the movement band out of the grid.
    pub margins: Margins,
    /// Maximum number of live trail segments.
    pub max_steps: u32,
    /// Cell the player starts on.
    pub player_start: CellCoord,
    /// Wire laid before the first input.
    pub seed: SeedTrail,
    /// Sweeper placement.
    pub hazard: HazardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            margins: Margins::default(),
            max_steps: 48,
            player_start: CellCoord::new(5, 5),
            seed: SeedTrail::default(),
            hazard: HazardConfig::default(),
        }
    }
}

impl GameConfig {
    /// Checks every structural requirement the world relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { columns, rows } = self.grid;
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }

        let band = self.movement_band();
        if band.is_empty() {
            return Err(ConfigError::EmptyMovementBand {
                margins: self.margins,
            });
        }
        if !band.contains(self.player_start) {
            return Err(ConfigError::PlayerOutsideBand {
                start: self.player_start,
            });
        }

        if self.seed.length == 0 {
            return Err(ConfigError::EmptySeedTrail);
        }
        if u32::from(self.seed.length) > self.max_steps {
            return Err(ConfigError::SeedExceedsMaxSteps {
                length: self.seed.length,
                max_steps: self.max_steps,
            });
        }
        let seed = self.seed_cells().ok_or(ConfigError::SeedOutsideGrid)?;

        let hazard = self.hazard_region();
        let grid = CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(columns, rows));
        let far_corner = hazard.origin().offset(
            i32::from(hazard.size().width()) - 1,
            i32::from(hazard.size().height()) - 1,
        );
        let inside = !hazard.is_empty()
            && grid.contains(hazard.origin())
            && far_corner.is_some_and(|corner| grid.contains(corner));
        if !inside {
            return Err(ConfigError::HazardOutsideGrid { region: hazard });
        }
        if let Some(cell) = seed.iter().copied().find(|cell| hazard.contains(*cell)) {
            return Err(ConfigError::HazardOverlapsTrail { cell });
        }

        Ok(())
    }

    /// Cells the player may step into.
    #[must_use]
    pub fn movement_band(&self) -> CellRect {
        let Margins {
            left,
            right,
            bottom,
            top,
        } = self.margins;
        let width = self.grid.columns.saturating_sub(left.saturating_add(right));
        let height = self.grid.rows.saturating_sub(bottom.saturating_add(top));
        CellRect::from_origin_and_size(CellCoord::new(left, bottom), CellRectSize::new(width, height))
    }

    /// Footprint occupied by the sweeper.
    #[must_use]
    pub fn hazard_region(&self) -> CellRect {
        CellRect::from_origin_and_size(self.hazard.origin, self.hazard.size)
    }

    /// Seed trail cells ordered from tail to head, or `None` if any falls off the grid.
    #[must_use]
    pub fn seed_cells(&self) -> Option<Vec<CellCoord>> {
        let (column_delta, row_delta) = self.seed.direction.delta();
        let length = i32::from(self.seed.length);
        let mut cells = Vec::with_capacity(usize::from(self.seed.length));
        for back in (0..length).rev() {
            let cell = self
                .player_start
                .offset(-column_delta * back, -row_delta * back)?;
            if cell.column() >= self.grid.columns || cell.row() >= self.grid.rows {
                return None;
            }
            cells.push(cell);
        }
        Some(cells)
    }
}

/// Reasons a configuration cannot be turned into a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid has no tiles.
    #[error("grid must have at least one column and one row (got {columns}x{rows})")]
    EmptyGrid {
        /// Configured column count.
        columns: u16,
        /// Configured row count.
        rows: u16,
    },
    /// The trail cap does not allow a single segment.
    #[error("max_steps must be positive")]
    ZeroMaxSteps,
    /// The margins consume the whole grid.
    #[error("margins {margins:?} leave no room to move")]
    EmptyMovementBand {
        /// Offending margins.
        margins: Margins,
    },
    /// The player would start outside the movement band.
    #[error("player start {start:?} lies outside the movement band")]
    PlayerOutsideBand {
        /// Offending start cell.
        start: CellCoord,
    },
    /// The seed trail has no segments.
    #[error("seed trail must contain at least one segment")]
    EmptySeedTrail,
    /// The seed trail is longer than the cap allows.
    #[error("seed trail of {length} segments exceeds max_steps {max_steps}")]
    SeedExceedsMaxSteps {
        /// Configured seed length.
        length: u16,
        /// Configured cap.
        max_steps: u32,
    },
    /// Part of the seed trail falls off the grid.
    #[error("seed trail extends beyond the grid")]
    SeedOutsideGrid,
    /// The sweeper footprint is empty or not fully on the grid.
    #[error("sweeper footprint {region:?} must be non-empty and inside the grid")]
    HazardOutsideGrid {
        /// Offending footprint.
        region: CellRect,
    },
    /// The sweeper footprint covers part of the seed trail.
    #[error("sweeper footprint covers seed trail cell {cell:?}")]
    HazardOverlapsTrail {
        /// First shared cell.
        cell: CellCoord,
    },
}
