#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tilewire adapters.

mod sprites;
mod text;

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use tilewire_core::{CellCoord, CellRect, CellRectSize, ControlInput, Direction, StaticTile, WireSprite};

pub use sprites::{SpriteCatalog, SpriteKey, SpriteRect, PIXELS_PER_TILE};
pub use text::{layout_line, wrap_words, GlyphPlacement};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Control events observed this frame, in arrival order.
    pub controls: Vec<ControlInput>,
}

/// Static visual layer of the grid in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileLayer {
    columns: u16,
    rows: u16,
    tiles: Vec<StaticTile>,
}

impl TileLayer {
    /// Creates a tile layer, checking that `tiles` covers the grid exactly.
    pub fn new(columns: u16, rows: u16, tiles: Vec<StaticTile>) -> Result<Self, RenderingError> {
        let expected = usize::from(columns) * usize::from(rows);
        if tiles.len() != expected {
            return Err(RenderingError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            columns,
            rows,
            tiles,
        })
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Visual category of the cell, if it lies on the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<StaticTile> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = usize::from(cell.row()) * usize::from(self.columns) + usize::from(cell.column());
        self.tiles.get(index).copied()
    }
}

/// Wire segment drawn over the static layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WirePresentation {
    /// Cell covered by the segment.
    pub cell: CellCoord,
    /// Shape of the wire on that cell.
    pub sprite: WireSprite,
}

/// Player avatar placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerPresentation {
    /// Cell the player stands on.
    pub cell: CellCoord,
    /// Direction the avatar faces.
    pub facing: Direction,
}

/// Overlay values drawn in screen-anchored positions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct HudPresentation {
    /// Decimal digits of the trail length, most significant first.
    pub length_digits: Vec<u8>,
    /// Segments that can still be laid.
    pub remaining: u32,
    /// Text box contents, if any.
    pub message: Option<String>,
}

/// Scene description combining the grid, the wire, the sweeper and the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Static tile categories.
    pub tiles: TileLayer,
    /// Sweeper footprint.
    pub hazard: CellRect,
    /// Wire segments ordered head to tail.
    pub wires: Vec<WirePresentation>,
    /// Player avatar.
    pub player: PlayerPresentation,
    /// Overlay values.
    pub hud: HudPresentation,
    /// Vertical half-extent of the view in tiles.
    pub camera_radius: f32,
    /// Set once the session should end; backends stop after the current frame.
    pub exit_requested: bool,
}

impl Scene {
    /// Vertical half-extent used when none is configured.
    pub const DEFAULT_CAMERA_RADIUS: f32 = 15.0;

    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tiles: TileLayer,
        hazard: CellRect,
        wires: Vec<WirePresentation>,
        player: PlayerPresentation,
        hud: HudPresentation,
    ) -> Self {
        Self {
            tiles,
            hazard,
            wires,
            player,
            hud,
            camera_radius: Self::DEFAULT_CAMERA_RADIUS,
            exit_requested: false,
        }
    }

    /// Camera centred on the player for a screen of the given size.
    #[must_use]
    pub fn camera(&self, screen: Vec2) -> Camera {
        Camera::follow(self.player.cell, self.camera_radius, screen)
    }
}

/// Orthographic view centred on a world point, measured in tiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World point shown at the centre of the screen.
    pub at: Vec2,
    /// Half-extent of the view along each axis.
    pub radius: Vec2,
}

impl Camera {
    /// Centres the view on `cell`, widening the horizontal radius to the screen's aspect ratio.
    #[must_use]
    pub fn follow(cell: CellCoord, vertical_radius: f32, screen: Vec2) -> Self {
        let aspect = if screen.y <= f32::EPSILON {
            1.0
        } else {
            screen.x / screen.y
        };
        Self {
            at: cell_center(cell),
            radius: Vec2::new(vertical_radius * aspect, vertical_radius),
        }
    }

    /// Maps a world point (y up) to screen pixels (y down).
    #[must_use]
    pub fn world_to_screen(&self, point: Vec2, screen: Vec2) -> Vec2 {
        let ndc = (point - self.at) / self.radius;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen.x,
            (1.0 - ndc.y) * 0.5 * screen.y,
        )
    }

    /// Screen rectangle `(top_left, size)` covering the world quad between two corners.
    #[must_use]
    pub fn screen_rect(&self, bottom_left: Vec2, top_right: Vec2, screen: Vec2) -> (Vec2, Vec2) {
        let top_left = self.world_to_screen(Vec2::new(bottom_left.x, top_right.y), screen);
        let bottom_right = self.world_to_screen(Vec2::new(top_right.x, bottom_left.y), screen);
        (top_left, bottom_right - top_left)
    }

    /// Screen pixels covered by one tile.
    #[must_use]
    pub fn pixels_per_tile(&self, screen: Vec2) -> f32 {
        if self.radius.y <= f32::EPSILON {
            return 0.0;
        }
        screen.y / (2.0 * self.radius.y)
    }

    /// Cells that may be visible, padded by one tile and clipped to the grid.
    #[must_use]
    pub fn visible_cells(&self, columns: u16, rows: u16) -> CellRect {
        let clip = |value: f32, limit: u16| value.clamp(0.0, f32::from(limit)) as u16;
        let min_column = clip((self.at.x - self.radius.x - 1.0).floor(), columns);
        let max_column = clip((self.at.x + self.radius.x + 2.0).ceil(), columns);
        let min_row = clip((self.at.y - self.radius.y - 1.0).floor(), rows);
        let max_row = clip((self.at.y + self.radius.y + 2.0).ceil(), rows);
        CellRect::from_origin_and_size(
            CellCoord::new(min_column, min_row),
            CellRectSize::new(max_column - min_column, max_row - min_row),
        )
    }
}

/// World-space point at which a cell's sprite is anchored.
#[must_use]
pub fn cell_center(cell: CellCoord) -> Vec2 {
    Vec2::new(f32::from(cell.column()), f32::from(cell.row()))
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Tilewire scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// control events captured by the adapter, and refreshes the scene from
    /// world snapshots before it is drawn. The backend stops after a frame
    /// whose scene has `exit_requested` set.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The tile layer does not cover the grid exactly.
    TileCountMismatch {
        /// Tiles required by the grid dimensions.
        expected: usize,
        /// Tiles supplied.
        actual: usize,
    },
    /// A sprite rectangle has its minimum corner past its maximum.
    InvalidSpriteBounds {
        /// Offending sprite.
        key: SpriteKey,
    },
    /// A sprite rectangle reaches outside the atlas texture.
    SpriteOutsideTexture {
        /// Offending sprite.
        key: SpriteKey,
    },
    /// A required sprite is absent from the catalog.
    MissingSprite {
        /// Sprite that was not provided.
        key: SpriteKey,
    },
    /// A sprite key names no drawable category.
    UnknownSprite {
        /// Offending sprite.
        key: SpriteKey,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileCountMismatch { expected, actual } => {
                write!(f, "tile layer needs {expected} tiles (received {actual})")
            }
            Self::InvalidSpriteBounds { key } => {
                write!(f, "sprite `{}` has min corner past max corner", key.name())
            }
            Self::SpriteOutsideTexture { key } => {
                write!(f, "sprite `{}` extends beyond the atlas texture", key.name())
            }
            Self::MissingSprite { key } => {
                write!(f, "sprite `{}` missing from atlas", key.name())
            }
            Self::UnknownSprite { key } => write!(f, "unknown sprite {key:?}"),
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> TileLayer {
        TileLayer::new(3, 2, vec![StaticTile::Floor; 6]).expect("exact tile count")
    }

    #[test]
    fn tile_layer_rejects_wrong_tile_count() {
        let error = TileLayer::new(3, 2, vec![StaticTile::Floor; 5])
            .expect_err("short tile layer must be rejected");

        assert_eq!(
            error,
            RenderingError::TileCountMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn tile_layer_reads_row_major() {
        let mut tiles = vec![StaticTile::Floor; 6];
        tiles[4] = StaticTile::Wall;
        let layer = TileLayer::new(3, 2, tiles).expect("exact tile count");

        assert_eq!(layer.tile(CellCoord::new(1, 1)), Some(StaticTile::Wall));
        assert_eq!(layer.tile(CellCoord::new(3, 0)), None);
    }

    #[test]
    fn camera_radius_follows_aspect_ratio() {
        let camera = Camera::follow(CellCoord::new(5, 5), 15.0, Vec2::new(1600.0, 900.0));

        assert_eq!(camera.at, Vec2::new(5.0, 5.0));
        assert!((camera.radius.x - 15.0 * 16.0 / 9.0).abs() < 1e-4);
        assert_eq!(camera.radius.y, 15.0);
    }

    #[test]
    fn world_to_screen_flips_the_vertical_axis() {
        let screen = Vec2::new(800.0, 600.0);
        let camera = Camera::follow(CellCoord::new(10, 10), 15.0, screen);

        assert_eq!(camera.world_to_screen(camera.at, screen), Vec2::new(400.0, 300.0));
        let above = camera.world_to_screen(Vec2::new(10.0, 25.0), screen);
        assert!(above.y.abs() < 1e-3);
        assert_eq!(camera.pixels_per_tile(screen), 20.0);
    }

    #[test]
    fn screen_rect_spans_the_quad_top_down() {
        let screen = Vec2::new(800.0, 600.0);
        let camera = Camera::follow(CellCoord::new(10, 10), 15.0, screen);

        let (top_left, size) =
            camera.screen_rect(Vec2::new(9.5, 9.5), Vec2::new(10.5, 10.5), screen);

        assert!(top_left.abs_diff_eq(Vec2::new(390.0, 290.0), 1e-3));
        assert!(size.abs_diff_eq(Vec2::new(20.0, 20.0), 1e-3));
    }

    #[test]
    fn visible_cells_are_clipped_to_the_grid() {
        let camera = Camera::follow(CellCoord::new(2, 2), 5.0, Vec2::new(100.0, 100.0));
        let visible = camera.visible_cells(100, 100);

        assert_eq!(visible.origin(), CellCoord::new(0, 0));
        assert_eq!(visible.size(), CellRectSize::new(9, 9));
    }

    #[test]
    fn scene_camera_tracks_the_player() {
        let scene = Scene::new(
            layer(),
            CellRect::from_origin_and_size(CellCoord::new(0, 0), CellRectSize::new(1, 1)),
            Vec::new(),
            PlayerPresentation {
                cell: CellCoord::new(2, 1),
                facing: Direction::Down,
            },
            HudPresentation::default(),
        );

        let camera = scene.camera(Vec2::new(300.0, 300.0));
        assert_eq!(camera.at, Vec2::new(2.0, 1.0));
        assert_eq!(camera.radius, Vec2::splat(Scene::DEFAULT_CAMERA_RADIUS));
        assert!(!scene.exit_requested);
    }
}
