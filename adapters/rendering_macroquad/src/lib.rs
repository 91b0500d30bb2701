#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Tilewire.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Without an atlas manifest every sprite is drawn as a solid rectangle in
//! its fallback colour and text uses macroquad's built-in font.

mod sprites;

pub use self::sprites::SpriteAtlas;

use anyhow::{Context, Result};
use glam::Vec2;
use log::{info, warn};
use macroquad::{
    input::{is_key_pressed, KeyCode},
    shapes::draw_rectangle,
    text::draw_text,
};
use std::{
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};
use tilewire_core::ControlInput;
use tilewire_rendering::{
    cell_center, layout_line, wrap_words, Camera, Color, FrameInput, GlyphPlacement, Presentation,
    RenderingBackend, Scene, SpriteKey,
};

const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
/// Glyph columns that fit inside the text box.
const TEXT_BOX_COLUMNS: usize = 11;
/// Half-extent of the text box in tiles.
const TEXT_BOX_HALF_EXTENT: Vec2 = Vec2::new(6.0, 2.0);

/// Keys observed as pressed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyObservation {
    /// Up arrow or `W`.
    pub up: bool,
    /// Down arrow or `S`.
    pub down: bool,
    /// Left arrow or `A`.
    pub left: bool,
    /// Right arrow or `D`.
    pub right: bool,
    /// `Space` or `E`.
    pub interact: bool,
    /// `Escape`.
    pub quit: bool,
}

impl KeyObservation {
    fn poll() -> Self {
        Self {
            up: is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            down: is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            left: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            right: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            interact: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::E),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }
}

/// Converts one frame of key presses into control events.
///
/// Macroquad reports presses per key rather than as a queue, so presses that
/// land on the same frame are reported in a fixed order with quit last.
#[doc(hidden)]
#[must_use]
pub fn controls_from_keys(keys: KeyObservation) -> Vec<ControlInput> {
    [
        (keys.up, ControlInput::Up),
        (keys.down, ControlInput::Down),
        (keys.left, ControlInput::Left),
        (keys.right, ControlInput::Right),
        (keys.interact, ControlInput::Interact),
        (keys.quit, ControlInput::Quit),
    ]
    .into_iter()
    .filter_map(|(pressed, input)| pressed.then_some(input))
    .collect()
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    atlas_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Draws sprites from the atlas described by the manifest instead of solid colours.
    #[must_use]
    pub fn with_atlas(mut self, manifest: Option<PathBuf>) -> Self {
        self.atlas_manifest = manifest;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            atlas_manifest,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = match atlas_manifest {
                Some(path) => match SpriteAtlas::from_manifest_path(&path)
                    .with_context(|| format!("failed to initialise sprite atlas from {}", path.display()))
                {
                    Ok(atlas) => {
                        info!(target: "tilewire::render", "loaded {} sprites", atlas.len());
                        Some(atlas)
                    }
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                },
                None => None,
            };
            let _ = atlas_init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let frame_input = FrameInput {
                    controls: controls_from_keys(KeyObservation::poll()),
                };
                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);
                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let painter = Painter {
                    atlas: sprite_atlas.as_ref(),
                    camera: scene.camera(screen),
                    screen,
                };
                draw_scene(&scene, &painter);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        info!(target: "tilewire::render", "FPS: {per_second:.2}");
                    }
                }

                if scene.exit_requested {
                    break;
                }
                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

struct Painter<'a> {
    atlas: Option<&'a SpriteAtlas>,
    camera: Camera,
    screen: Vec2,
}

impl Painter<'_> {
    /// Draws a sprite anchored at `at`, or a solid block of `extent` tiles without an atlas.
    fn sprite(&self, key: SpriteKey, at: Vec2, extent: Vec2) {
        if let Some(atlas) = self.atlas {
            if let Err(error) = atlas.draw(key, at, &self.camera, self.screen, WHITE) {
                warn!(target: "tilewire::render", "{error:#}");
            }
            return;
        }
        self.block(key.fallback_color(), at - extent * 0.5, at + extent * 0.5);
    }

    fn block(&self, color: Color, bottom_left: Vec2, top_right: Vec2) {
        let (top_left, size) = self.camera.screen_rect(bottom_left, top_right, self.screen);
        draw_rectangle(top_left.x, top_left.y, size.x, size.y, to_macroquad_color(color));
    }

    fn glyph(&self, glyph: &GlyphPlacement) {
        if self.atlas.is_some() {
            self.sprite(glyph.key, glyph.at, Vec2::ONE);
            return;
        }
        let tile = self.camera.pixels_per_tile(self.screen);
        let baseline = self
            .camera
            .world_to_screen(glyph.at + Vec2::new(-0.4, -0.4), self.screen);
        let mut buffer = [0_u8; 4];
        draw_text(
            glyph.symbol.encode_utf8(&mut buffer),
            baseline.x,
            baseline.y,
            tile * 1.2,
            to_macroquad_color(glyph.key.fallback_color()),
        );
    }
}

fn draw_scene(scene: &Scene, painter: &Painter<'_>) {
    let visible = painter
        .camera
        .visible_cells(scene.tiles.columns(), scene.tiles.rows());
    for cell in visible.cells() {
        if let Some(tile) = scene.tiles.tile(cell) {
            painter.sprite(SpriteKey::for_static(tile), cell_center(cell), Vec2::ONE);
        }
    }

    draw_hazard(scene, painter);

    for wire in &scene.wires {
        if visible.contains(wire.cell) {
            painter.sprite(SpriteKey::Wire(wire.sprite), cell_center(wire.cell), Vec2::splat(0.5));
        }
    }

    painter.sprite(
        SpriteKey::Player(scene.player.facing),
        cell_center(scene.player.cell),
        Vec2::splat(0.8),
    );

    draw_hud(scene, painter);
}

fn draw_hazard(scene: &Scene, painter: &Painter<'_>) {
    let region = scene.hazard;
    if region.is_empty() {
        return;
    }
    let origin = cell_center(region.origin());
    let size = Vec2::new(
        f32::from(region.size().width()),
        f32::from(region.size().height()),
    );
    if painter.atlas.is_some() {
        painter.sprite(SpriteKey::Sweeper, origin + (size - Vec2::ONE) * 0.5, size);
    } else {
        painter.block(
            SpriteKey::Sweeper.fallback_color(),
            origin - Vec2::splat(0.5),
            origin + size - Vec2::splat(0.5),
        );
    }
}

/// World anchor of the first HUD digit: one tile in from the top-left of the view.
fn hud_anchor(camera: &Camera) -> Vec2 {
    camera.at + Vec2::new(-camera.radius.x + 1.5, camera.radius.y - 1.5)
}

/// World anchor of the text box centre: just above the bottom edge of the view.
fn text_box_anchor(camera: &Camera) -> Vec2 {
    camera.at + Vec2::new(0.0, -camera.radius.y + TEXT_BOX_HALF_EXTENT.y + 1.0)
}

/// Glyphs of a message laid out inside a text box centred at `anchor`.
fn text_box_glyphs(message: &str, anchor: Vec2) -> Vec<GlyphPlacement> {
    let half_columns = (TEXT_BOX_COLUMNS as f32 - 1.0) * 0.5;
    wrap_words(message, TEXT_BOX_COLUMNS)
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            let start = anchor + Vec2::new(-half_columns, 1.0 - row as f32);
            layout_line(line, start, 1.0)
        })
        .collect()
}

fn draw_hud(scene: &Scene, painter: &Painter<'_>) {
    let digits: String = scene
        .hud
        .length_digits
        .iter()
        .filter_map(|digit| char::from_digit(u32::from(*digit), 10))
        .collect();
    for glyph in layout_line(&digits, hud_anchor(&painter.camera), 1.0) {
        painter.glyph(&glyph);
    }

    if let Some(message) = &scene.hud.message {
        let anchor = text_box_anchor(&painter.camera);
        painter.sprite(SpriteKey::TextBox, anchor, TEXT_BOX_HALF_EXTENT * 2.0);
        for glyph in text_box_glyphs(message, anchor) {
            painter.glyph(&glyph);
        }
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewire_core::CellCoord;

    #[test]
    fn same_frame_presses_follow_a_fixed_order() {
        let controls = controls_from_keys(KeyObservation {
            quit: true,
            left: true,
            interact: true,
            ..KeyObservation::default()
        });

        assert_eq!(
            controls,
            vec![ControlInput::Left, ControlInput::Interact, ControlInput::Quit]
        );
    }

    #[test]
    fn idle_frame_has_no_controls() {
        assert!(controls_from_keys(KeyObservation::default()).is_empty());
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        for _ in 0..9 {
            assert!(counter.record_frame(Duration::from_millis(100)).is_none());
        }
        let per_second = counter
            .record_frame(Duration::from_millis(100))
            .expect("one second elapsed");
        assert!((per_second - 10.0).abs() < 1e-3);
    }

    #[test]
    fn hud_sits_inside_the_top_left_corner() {
        let camera = Camera::follow(CellCoord::new(50, 50), 15.0, Vec2::new(400.0, 300.0));
        let anchor = hud_anchor(&camera);

        assert!(anchor.abs_diff_eq(Vec2::new(31.5, 63.5), 1e-3));
    }

    #[test]
    fn conversation_text_fits_inside_the_box() {
        let anchor = Vec2::new(10.0, 10.0);
        let glyphs = text_box_glyphs("THE SWEEPER SAYS MIND THE WIRE", anchor);

        assert_eq!(glyphs.len(), 25);
        for glyph in &glyphs {
            let offset = glyph.at - anchor;
            assert!(offset.x.abs() + 0.5 <= TEXT_BOX_HALF_EXTENT.x);
            assert!(offset.y.abs() + 0.5 <= TEXT_BOX_HALF_EXTENT.y);
        }
    }
}
