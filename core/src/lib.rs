#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilewire engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw input into
//! [`ControlInput`] values, systems turn those into [`Command`] values, the
//! world executes each command via its `apply` entry point and broadcasts
//! [`Event`] values describing what changed. Presentation code only ever
//! reads immutable snapshots between commands.

mod config;

pub use config::{ConfigError, GameConfig, GridSize, HazardConfig, Margins, SeedTrail};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Game1: Text/Tiles";

/// Message displayed while the player is talking to the sweeper.
pub const CONVERSATION_MESSAGE: &str = "THE SWEEPER SAYS MIND THE WIRE";

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Direction pointing the opposite way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether `other` points the opposite way along the same axis.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Reports whether the direction moves along the row axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Unit offset expressed as `(column, row)` deltas.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Location of a single grid tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u16,
    row: u16,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u16 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u16 {
        self.row
    }

    /// Offsets the coordinate, returning `None` when it would leave the `u16` range.
    #[must_use]
    pub fn offset(self, column_delta: i32, row_delta: i32) -> Option<CellCoord> {
        let column = i32::from(self.column).checked_add(column_delta)?;
        let row = i32::from(self.row).checked_add(row_delta)?;
        Some(CellCoord::new(
            u16::try_from(column).ok()?,
            u16::try_from(row).ok()?,
        ))
    }

    /// Neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.delta();
        self.offset(column_delta, row_delta)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        u32::from(self.column.abs_diff(other.column)) + u32::from(self.row.abs_diff(other.row))
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from its lower-left cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Lower-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Reports whether the cell lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let column = u32::from(cell.column());
        let row = u32::from(cell.row());
        let min_column = u32::from(self.origin.column());
        let min_row = u32::from(self.origin.row());
        column >= min_column
            && row >= min_row
            && column < min_column + u32::from(self.size.width)
            && row < min_row + u32::from(self.size.height)
    }

    /// Reports whether the two rectangles share at least one cell.
    #[must_use]
    pub fn intersects(&self, other: &CellRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a_min_c, a_min_r, a_max_c, a_max_r) = self.bounds();
        let (b_min_c, b_min_r, b_max_c, b_max_r) = other.bounds();
        a_min_c < b_max_c && b_min_c < a_max_c && a_min_r < b_max_r && b_min_r < a_max_r
    }

    /// Iterates every cell covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let (min_column, min_row, max_column, max_row) = self.bounds();
        (min_row..max_row).flat_map(move |row| {
            (min_column..max_column).filter_map(move |column| {
                Some(CellCoord::new(
                    u16::try_from(column).ok()?,
                    u16::try_from(row).ok()?,
                ))
            })
        })
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        let min_column = u32::from(self.origin.column());
        let min_row = u32::from(self.origin.row());
        (
            min_column,
            min_row,
            min_column + u32::from(self.size.width),
            min_row + u32::from(self.size.height),
        )
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u16,
    height: u16,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }
}

/// Unique identifier assigned to a trail segment when it is laid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Creates a new segment identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Dynamic object standing on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// A live wire segment.
    Trail(SegmentId),
    /// Part of the sweeper's footprint.
    Hazard,
}

/// Immutable visual category painted on a tile at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticTile {
    /// Walkable floor inside the movement band.
    Floor,
    /// Margin wall surrounding the movement band.
    Wall,
    /// Outermost wall ring along the grid edge.
    WallDark,
}

/// Visual variant of a wire segment.
///
/// Corner names follow the turn that produces them: `UpRight` is laid when a
/// wire heading up turns right (and, sharing the same bend, when a wire
/// heading left turns down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireSprite {
    /// Straight segment along the row axis.
    Vertical,
    /// Straight segment along the column axis.
    Horizontal,
    /// Bend produced by `Up → Left` or `Right → Down`.
    UpLeft,
    /// Bend produced by `Up → Right` or `Left → Down`.
    UpRight,
    /// Bend produced by `Down → Left` or `Right → Up`.
    DownLeft,
    /// Bend produced by `Down → Right` or `Left → Up`.
    DownRight,
}

impl WireSprite {
    /// Straight sprite for a segment laid while moving in `direction`.
    #[must_use]
    pub const fn straight(direction: Direction) -> Self {
        if direction.is_vertical() {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Sprite for a segment laid heading `from` once the wire continues `to`.
    #[must_use]
    pub const fn for_turn(from: Direction, to: Direction) -> Self {
        match (from, to) {
            (Direction::Up, Direction::Right) | (Direction::Left, Direction::Down) => {
                Self::UpRight
            }
            (Direction::Up, Direction::Left) | (Direction::Right, Direction::Down) => Self::UpLeft,
            (Direction::Down, Direction::Right) | (Direction::Left, Direction::Up) => {
                Self::DownRight
            }
            (Direction::Down, Direction::Left) | (Direction::Right, Direction::Up) => {
                Self::DownLeft
            }
            _ => Self::straight(from),
        }
    }
}

/// Discrete events delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlInput {
    /// Step up.
    Up,
    /// Step down.
    Down,
    /// Step left.
    Left,
    /// Step right.
    Right,
    /// Leave the game.
    Quit,
    /// Talk to anything nearby.
    Interact,
}

impl ControlInput {
    /// Movement direction carried by the input, if it is directional.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Quit | Self::Interact => None,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the player step one tile in the specified direction.
    Step {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests an interaction scan around the player.
    Interact,
    /// Requests that the session end.
    Quit,
}

/// Reasons a step request may be turned down by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The target lies outside the interior movement band.
    OutsideBand,
    /// The target holds the hazard or a trail segment other than the one being retracted.
    Occupied,
    /// The trail already holds the configured maximum number of segments.
    TrailCapReached,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The player turned to face a direction, whether or not the step succeeds.
    PlayerFaced {
        /// New facing direction.
        facing: Direction,
    },
    /// The player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// A step request was turned down; the player and trail are unchanged.
    MoveRejected {
        /// Direction of the rejected step.
        direction: Direction,
        /// Specific reason the step failed.
        reason: MoveRejection,
    },
    /// A new head segment was laid.
    TrailGrew {
        /// Identifier of the new head.
        segment: SegmentId,
        /// Cell the new head occupies.
        cell: CellCoord,
        /// Trail length after growing.
        length: u32,
    },
    /// The head segment was removed.
    TrailRetracted {
        /// Identifier of the removed segment.
        segment: SegmentId,
        /// Cell the removed segment occupied.
        cell: CellCoord,
        /// Trail length after retracting.
        length: u32,
    },
    /// The player started talking to the sweeper.
    ConversationStarted,
    /// The conversation was dismissed by a directional input.
    ConversationEnded,
    /// The session was asked to end.
    QuitRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_along_axes() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn step_moves_one_tile_in_world_space() {
        let origin = CellCoord::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Some(CellCoord::new(5, 6)));
        assert_eq!(origin.step(Direction::Down), Some(CellCoord::new(5, 4)));
        assert_eq!(origin.step(Direction::Left), Some(CellCoord::new(4, 5)));
        assert_eq!(origin.step(Direction::Right), Some(CellCoord::new(6, 5)));
    }

    #[test]
    fn step_off_the_coordinate_range_yields_none() {
        assert_eq!(CellCoord::new(0, 3).step(Direction::Left), None);
        assert_eq!(CellCoord::new(3, 0).step(Direction::Down), None);
        assert_eq!(CellCoord::new(u16::MAX, 0).step(Direction::Right), None);
    }

    #[test]
    fn turn_table_matches_wire_bends() {
        use Direction::{Down, Left, Right, Up};

        assert_eq!(WireSprite::for_turn(Up, Up), WireSprite::Vertical);
        assert_eq!(WireSprite::for_turn(Down, Down), WireSprite::Vertical);
        assert_eq!(WireSprite::for_turn(Left, Left), WireSprite::Horizontal);
        assert_eq!(WireSprite::for_turn(Right, Right), WireSprite::Horizontal);

        assert_eq!(WireSprite::for_turn(Up, Right), WireSprite::UpRight);
        assert_eq!(WireSprite::for_turn(Left, Down), WireSprite::UpRight);
        assert_eq!(WireSprite::for_turn(Up, Left), WireSprite::UpLeft);
        assert_eq!(WireSprite::for_turn(Right, Down), WireSprite::UpLeft);
        assert_eq!(WireSprite::for_turn(Down, Right), WireSprite::DownRight);
        assert_eq!(WireSprite::for_turn(Left, Up), WireSprite::DownRight);
        assert_eq!(WireSprite::for_turn(Down, Left), WireSprite::DownLeft);
        assert_eq!(WireSprite::for_turn(Right, Up), WireSprite::DownLeft);
    }

    #[test]
    fn rect_contains_and_iterates_its_cells() {
        let rect = CellRect::from_origin_and_size(CellCoord::new(2, 3), CellRectSize::new(3, 2));
        assert!(rect.contains(CellCoord::new(2, 3)));
        assert!(rect.contains(CellCoord::new(4, 4)));
        assert!(!rect.contains(CellCoord::new(5, 4)));
        assert!(!rect.contains(CellCoord::new(4, 5)));

        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells.first(), Some(&CellCoord::new(2, 3)));
        assert_eq!(cells.last(), Some(&CellCoord::new(4, 4)));
    }

    #[test]
    fn rect_intersection_requires_shared_cells() {
        let a = CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(2, 2));
        let touching = CellRect::from_origin_and_size(CellCoord::new(2, 0), CellRectSize::new(2, 2));
        let overlapping =
            CellRect::from_origin_and_size(CellCoord::new(1, 1), CellRectSize::new(2, 2));
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
    }

    #[test]
    fn recorded_commands_survive_bincode() {
        let script = vec![
            Command::Step {
                direction: Direction::Right,
            },
            Command::Interact,
            Command::Quit,
        ];
        let bytes = bincode::serialize(&script).expect("serialize");
        let restored: Vec<Command> = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, script);
    }
}
