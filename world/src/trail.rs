//! Ordered wire segments laid behind the player.

use std::collections::VecDeque;

use tilewire_core::{CellCoord, Direction, Occupant, SegmentId, WireSprite};

use crate::grid::Grid;

/// Snapshot of one live wire segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailSegment {
    id: SegmentId,
    cell: CellCoord,
    direction: Direction,
    sprite: WireSprite,
}

impl TrailSegment {
    /// Identifier stamped into the occupancy grid.
    #[must_use]
    pub const fn id(&self) -> SegmentId {
        self.id
    }

    /// Cell covered by the segment.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Direction of the step that laid the segment.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Wire shape drawn for the segment.
    #[must_use]
    pub const fn sprite(&self) -> WireSprite {
        self.sprite
    }
}

/// Segments ordered tail (front) to head (back).
#[derive(Clone, Debug, Default)]
pub(crate) struct Trail {
    segments: VecDeque<TrailSegment>,
    next_id: u32,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> u32 {
        u32::try_from(self.segments.len()).unwrap_or(u32::MAX)
    }

    pub(crate) fn head(&self) -> Option<&TrailSegment> {
        self.segments.back()
    }

    pub(crate) fn head_direction(&self) -> Option<Direction> {
        self.head().map(TrailSegment::direction)
    }

    /// Occupant of the segment directly behind the head, if the trail has one.
    ///
    /// Stepping back onto this tile is the retraction path, so movement treats
    /// it as passable even though the grid marks it occupied.
    pub(crate) fn head_predecessor_occupant(&self) -> Option<Occupant> {
        let index = self.segments.len().checked_sub(2)?;
        self.segments
            .get(index)
            .map(|segment| Occupant::Trail(segment.id))
    }

    /// Lays a new head on `cell` and bends the previous head into the turn.
    pub(crate) fn grow(&mut self, grid: &mut Grid, cell: CellCoord, direction: Direction) -> SegmentId {
        if let Some(previous) = self.segments.back_mut() {
            previous.sprite = WireSprite::for_turn(previous.direction, direction);
        }

        let id = SegmentId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        grid.set_occupant(cell, Occupant::Trail(id));
        self.segments.push_back(TrailSegment {
            id,
            cell,
            direction,
            sprite: WireSprite::straight(direction),
        });
        id
    }

    /// Removes the head, frees its tile and straightens the exposed head.
    pub(crate) fn shrink(&mut self, grid: &mut Grid) -> Option<TrailSegment> {
        let removed = self.segments.pop_back()?;
        grid.clear_occupant(removed.cell);
        if let Some(exposed) = self.segments.back_mut() {
            exposed.sprite = WireSprite::straight(exposed.direction);
        }
        Some(removed)
    }

    /// Segments from head to tail.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TrailSegment> + '_ {
        self.segments.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewire_core::{CellRect, CellRectSize};

    fn grid() -> Grid {
        Grid::new(
            12,
            12,
            CellRect::from_origin_and_size(CellCoord::new(1, 1), CellRectSize::new(10, 10)),
        )
    }

    #[test]
    fn grow_marks_the_grid_and_bends_the_previous_head() {
        let mut grid = grid();
        let mut trail = Trail::new();

        let first = trail.grow(&mut grid, CellCoord::new(3, 3), Direction::Up);
        let second = trail.grow(&mut grid, CellCoord::new(4, 3), Direction::Right);

        assert_ne!(first, second);
        assert_eq!(trail.len(), 2);
        assert_eq!(grid.occupant(CellCoord::new(3, 3)), Some(Occupant::Trail(first)));
        assert_eq!(grid.occupant(CellCoord::new(4, 3)), Some(Occupant::Trail(second)));

        let sprites: Vec<WireSprite> = trail.iter().map(TrailSegment::sprite).collect();
        assert_eq!(sprites, vec![WireSprite::Horizontal, WireSprite::UpRight]);
    }

    #[test]
    fn shrink_frees_the_head_tile_and_straightens_the_new_head() {
        let mut grid = grid();
        let mut trail = Trail::new();
        let _ = trail.grow(&mut grid, CellCoord::new(3, 3), Direction::Up);
        let _ = trail.grow(&mut grid, CellCoord::new(4, 3), Direction::Right);

        let removed = trail.shrink(&mut grid).expect("head removed");

        assert_eq!(removed.cell(), CellCoord::new(4, 3));
        assert!(!grid.is_occupied(CellCoord::new(4, 3)));
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.head().map(TrailSegment::sprite), Some(WireSprite::Vertical));
    }

    #[test]
    fn shrinking_an_empty_trail_is_a_no_op() {
        let mut grid = grid();
        let mut trail = Trail::new();
        assert!(trail.shrink(&mut grid).is_none());
        assert_eq!(trail.len(), 0);
        assert_eq!(trail.head_direction(), None);
    }

    #[test]
    fn predecessor_is_the_segment_behind_the_head() {
        let mut grid = grid();
        let mut trail = Trail::new();
        let tail = trail.grow(&mut grid, CellCoord::new(3, 3), Direction::Up);
        assert_eq!(trail.head_predecessor_occupant(), None);

        let _ = trail.grow(&mut grid, CellCoord::new(3, 4), Direction::Up);
        assert_eq!(trail.head_predecessor_occupant(), Some(Occupant::Trail(tail)));
    }

    #[test]
    fn identifiers_are_not_reused_after_retraction() {
        let mut grid = grid();
        let mut trail = Trail::new();
        let first = trail.grow(&mut grid, CellCoord::new(3, 3), Direction::Up);
        let _ = trail.shrink(&mut grid);
        let second = trail.grow(&mut grid, CellCoord::new(3, 3), Direction::Up);
        assert_ne!(first, second);
    }
}
