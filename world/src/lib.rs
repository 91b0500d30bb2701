#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tilewire.
//!
//! The world owns the occupancy grid, the wire trail, the player and the
//! sweeper. It changes only through [`apply`] and is observed through the
//! read-only [`query`] functions.

mod grid;
mod hazard;
mod movement;
mod trail;

use std::collections::HashMap;

use log::info;
use thiserror::Error;
use tilewire_core::{
    CellCoord, CellRect, Command, ConfigError, Direction, Event, GameConfig, Occupant, SegmentId,
    WELCOME_BANNER,
};

pub use grid::Tile;
pub use trail::TrailSegment;

use grid::Grid;
use hazard::Hazard;
use trail::Trail;

#[derive(Clone, Copy, Debug)]
struct Player {
    cell: CellCoord,
    facing: Direction,
}

/// Represents the authoritative Tilewire world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    band: CellRect,
    grid: Grid,
    trail: Trail,
    player: Player,
    hazard: Hazard,
    in_conversation: bool,
    quit_requested: bool,
}

impl World {
    /// Builds a world from a validated configuration, laying the seed trail and sweeper.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let band = config.movement_band();
        let mut grid = Grid::new(config.grid.columns, config.grid.rows, band);

        let hazard = Hazard::new(config.hazard_region());
        hazard.place(&mut grid);

        let mut trail = Trail::new();
        for cell in config.seed_cells().ok_or(ConfigError::SeedOutsideGrid)? {
            let _ = trail.grow(&mut grid, cell, config.seed.direction);
        }

        info!(
            target: "tilewire::world",
            "world ready: {}x{} grid, band {:?}, trail {} of {}",
            config.grid.columns,
            config.grid.rows,
            band,
            trail.len(),
            config.max_steps
        );

        Ok(Self {
            banner: WELCOME_BANNER,
            player: Player {
                cell: config.player_start,
                facing: Direction::Down,
            },
            config,
            band,
            grid,
            trail,
            hazard,
            in_conversation: false,
            quit_requested: false,
        })
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Step { direction } => movement::step(world, direction, out_events),
        Command::Interact => movement::interact(world, out_events),
        Command::Quit => {
            if !world.quit_requested {
                world.quit_requested = true;
                out_events.push(Event::QuitRequested);
            }
        }
    }

    debug_assert_eq!(verify_coherence(world), Ok(()));
}

/// Broken link between the trail and the occupancy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CoherenceError {
    /// A live segment's tile does not reference it.
    #[error("segment {segment:?} at {cell:?} is not marked on the grid")]
    SegmentNotOnGrid {
        /// Segment missing from the grid.
        segment: SegmentId,
        /// Cell the segment claims to cover.
        cell: CellCoord,
    },
    /// A tile references a segment that is not part of the trail there.
    #[error("tile {cell:?} references segment {segment:?} which is not live there")]
    OrphanedTrailTile {
        /// Referenced segment.
        segment: SegmentId,
        /// Offending tile.
        cell: CellCoord,
    },
    /// A sweeper tile is missing or a tile outside the footprint claims the sweeper.
    #[error("sweeper occupancy mismatch at {cell:?}")]
    HazardMismatch {
        /// Offending tile.
        cell: CellCoord,
    },
    /// The trail grew beyond the cap.
    #[error("trail length {length} exceeds max_steps {max_steps}")]
    LengthExceedsCap {
        /// Observed trail length.
        length: u32,
        /// Configured cap.
        max_steps: u32,
    },
}

/// Cross-checks the trail, the sweeper footprint and the occupancy grid.
pub fn verify_coherence(world: &World) -> Result<(), CoherenceError> {
    let length = world.trail.len();
    if length > world.config.max_steps {
        return Err(CoherenceError::LengthExceedsCap {
            length,
            max_steps: world.config.max_steps,
        });
    }

    let mut live: HashMap<SegmentId, CellCoord> = HashMap::new();
    for segment in world.trail.iter() {
        if world.grid.occupant(segment.cell()) != Some(Occupant::Trail(segment.id())) {
            return Err(CoherenceError::SegmentNotOnGrid {
                segment: segment.id(),
                cell: segment.cell(),
            });
        }
        let _ = live.insert(segment.id(), segment.cell());
    }

    let region = world.hazard.region();
    for (index, tile) in world.grid.tiles().iter().enumerate() {
        let Some(cell) = world.grid.cell_at(index) else {
            continue;
        };
        match tile.occupant() {
            Some(Occupant::Trail(segment)) => {
                if live.get(&segment) != Some(&cell) {
                    return Err(CoherenceError::OrphanedTrailTile { segment, cell });
                }
            }
            Some(Occupant::Hazard) => {
                if !region.contains(cell) {
                    return Err(CoherenceError::HazardMismatch { cell });
                }
            }
            None => {
                if region.contains(cell) {
                    return Err(CoherenceError::HazardMismatch { cell });
                }
            }
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tilewire_core::{
        CellCoord, CellRect, Direction, GameConfig, Occupant, StaticTile, CONVERSATION_MESSAGE,
    };

    use super::{Grid, Tile, TrailSegment, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Cells the player may step into.
    #[must_use]
    pub fn movement_band(world: &World) -> CellRect {
        world.band
    }

    /// Captures the player's position and facing.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            facing: world.player.facing,
        }
    }

    /// Number of live trail segments.
    #[must_use]
    pub fn trail_length(world: &World) -> u32 {
        world.trail.len()
    }

    /// Captures the live trail ordered from head to tail.
    #[must_use]
    pub fn trail_view(world: &World) -> TrailView {
        TrailView {
            segments: world.trail.iter().copied().collect(),
        }
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView { grid: &world.grid }
    }

    /// Footprint occupied by the sweeper.
    #[must_use]
    pub fn hazard_region(world: &World) -> CellRect {
        world.hazard.region()
    }

    /// Reports whether a conversation with the sweeper is showing.
    #[must_use]
    pub fn in_conversation(world: &World) -> bool {
        world.in_conversation
    }

    /// Message to display in the text box, if any.
    #[must_use]
    pub fn message(world: &World) -> Option<&'static str> {
        world.in_conversation.then_some(CONVERSATION_MESSAGE)
    }

    /// Reports whether the session has been asked to end.
    #[must_use]
    pub fn quit_requested(world: &World) -> bool {
        world.quit_requested
    }

    /// Player position and facing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PlayerSnapshot {
        /// Cell the player stands on.
        pub cell: CellCoord,
        /// Direction of the most recent step request.
        pub facing: Direction,
    }

    /// Read-only snapshot of the trail ordered from head to tail.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TrailView {
        segments: Vec<TrailSegment>,
    }

    impl TrailView {
        /// Iterator over the segments, head first.
        pub fn iter(&self) -> impl Iterator<Item = &TrailSegment> {
            self.segments.iter()
        }

        /// Most recently laid segment.
        #[must_use]
        pub fn head(&self) -> Option<&TrailSegment> {
            self.segments.first()
        }

        /// Number of segments captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.segments.len()
        }

        /// Reports whether the trail was empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.segments.is_empty()
        }

        /// Consumes the view, yielding the owned segments.
        #[must_use]
        pub fn into_vec(self) -> Vec<TrailSegment> {
            self.segments
        }
    }

    /// Read-only view into the occupancy grid.
    #[derive(Clone, Copy, Debug)]
    pub struct GridView<'a> {
        grid: &'a Grid,
    }

    impl<'a> GridView<'a> {
        /// Grid extent as `(columns, rows)`.
        #[must_use]
        pub fn dimensions(&self) -> (u16, u16) {
            self.grid.dimensions()
        }

        /// Reports whether the cell lies on the grid.
        #[must_use]
        pub fn contains(&self, cell: CellCoord) -> bool {
            self.grid.contains(cell)
        }

        /// Reports whether a dynamic object stands on the cell. Off-grid cells count as blocked.
        #[must_use]
        pub fn is_occupied(&self, cell: CellCoord) -> bool {
            if !self.grid.contains(cell) {
                return true;
            }
            self.grid.is_occupied(cell)
        }

        /// Dynamic object standing on the cell.
        #[must_use]
        pub fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
            if !self.grid.contains(cell) {
                return None;
            }
            self.grid.occupant(cell)
        }

        /// Visual category of the cell. Off-grid cells read as dark wall.
        #[must_use]
        pub fn static_tile(&self, cell: CellCoord) -> StaticTile {
            if !self.grid.contains(cell) {
                return StaticTile::WallDark;
            }
            self.grid.static_tile(cell)
        }

        /// Iterates every tile with its coordinate in row-major order.
        pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + 'a {
            let grid = self.grid;
            grid.tiles()
                .iter()
                .enumerate()
                .filter_map(move |(index, tile)| grid.cell_at(index).map(|cell| (cell, *tile)))
        }
    }
}
