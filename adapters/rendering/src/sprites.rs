//! Named visual categories and their atlas rectangles.

use std::collections::HashMap;

use glam::Vec2;
use tilewire_core::{Direction, StaticTile, WireSprite};

use crate::{Color, RenderingError};

/// Atlas pixels that span one world tile.
pub const PIXELS_PER_TILE: f32 = 8.0;

/// Visual category that can be drawn from the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Player avatar facing a direction.
    Player(Direction),
    /// Walkable floor.
    Floor,
    /// Wall inside the margins.
    Wall,
    /// Outermost wall ring.
    WallDark,
    /// Wire segment shape.
    Wire(WireSprite),
    /// The sweeper.
    Sweeper,
    /// Decimal digit `0..=9`.
    Digit(u8),
    /// Upper-case ASCII letter.
    Letter(char),
    /// Background of the conversation text box.
    TextBox,
}

const WIRE_SPRITES: [WireSprite; 6] = [
    WireSprite::Vertical,
    WireSprite::Horizontal,
    WireSprite::UpLeft,
    WireSprite::UpRight,
    WireSprite::DownLeft,
    WireSprite::DownRight,
];

impl SpriteKey {
    /// Every category a complete atlas must provide, in manifest order.
    #[must_use]
    pub fn all() -> Vec<SpriteKey> {
        let mut keys = Vec::with_capacity(51);
        keys.extend(Direction::ALL.into_iter().map(SpriteKey::Player));
        keys.extend([SpriteKey::Floor, SpriteKey::Wall, SpriteKey::WallDark]);
        keys.extend(WIRE_SPRITES.into_iter().map(SpriteKey::Wire));
        keys.push(SpriteKey::Sweeper);
        keys.extend((0..10).map(SpriteKey::Digit));
        keys.extend(('A'..='Z').map(SpriteKey::Letter));
        keys.push(SpriteKey::TextBox);
        keys
    }

    /// Sprite for a static tile category.
    #[must_use]
    pub const fn for_static(tile: StaticTile) -> Self {
        match tile {
            StaticTile::Floor => Self::Floor,
            StaticTile::Wall => Self::Wall,
            StaticTile::WallDark => Self::WallDark,
        }
    }

    /// Sprite for a printable character, or `None` for blanks and unsupported symbols.
    #[must_use]
    pub fn glyph(symbol: char) -> Option<Self> {
        if let Some(digit) = symbol.to_digit(10) {
            return u8::try_from(digit).ok().map(Self::Digit);
        }
        if symbol.is_ascii_alphabetic() {
            return Some(Self::Letter(symbol.to_ascii_uppercase()));
        }
        None
    }

    /// Reports whether the key names a drawable category.
    #[must_use]
    pub fn is_canonical(self) -> bool {
        match self {
            Self::Digit(digit) => digit < 10,
            Self::Letter(letter) => letter.is_ascii_uppercase(),
            _ => true,
        }
    }

    /// Manifest name of the key.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Player(direction) => format!("player_{}", direction_name(direction)),
            Self::Floor => "floor".to_owned(),
            Self::Wall => "wall".to_owned(),
            Self::WallDark => "wall_dark".to_owned(),
            Self::Wire(sprite) => format!("wire_{}", wire_name(sprite)),
            Self::Sweeper => "sweeper".to_owned(),
            Self::Digit(digit) => format!("digit_{digit}"),
            Self::Letter(letter) => format!("letter_{}", letter.to_ascii_lowercase()),
            Self::TextBox => "text_box".to_owned(),
        }
    }

    /// Parses a manifest name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|key| key.name() == name)
    }

    /// Solid colour used when no atlas is loaded.
    #[must_use]
    pub const fn fallback_color(self) -> Color {
        match self {
            Self::Player(_) => Color::from_rgb_u8(0x3a, 0x7b, 0xd5),
            Self::Floor => Color::from_rgb_u8(0x9e, 0x9e, 0x9e),
            Self::Wall => Color::from_rgb_u8(0x5c, 0x5c, 0x5c),
            Self::WallDark => Color::from_rgb_u8(0x26, 0x26, 0x26),
            Self::Wire(_) => Color::from_rgb_u8(0xd0, 0x7a, 0x2a),
            Self::Sweeper => Color::from_rgb_u8(0x4c, 0xaf, 0x50),
            Self::Digit(_) | Self::Letter(_) => Color::from_rgb_u8(0x10, 0x10, 0x10),
            Self::TextBox => Color::from_rgb_u8(0xf5, 0xf0, 0xe1),
        }
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}

fn wire_name(sprite: WireSprite) -> &'static str {
    match sprite {
        WireSprite::Vertical => "vertical",
        WireSprite::Horizontal => "horizontal",
        WireSprite::UpLeft => "up_left",
        WireSprite::UpRight => "up_right",
        WireSprite::DownLeft => "down_left",
        WireSprite::DownRight => "down_right",
    }
}

/// Region of the atlas texture holding one sprite, in texture pixels (y down).
///
/// `origin` is the pixel that lands on the anchor point when drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRect {
    origin: Vec2,
    min: Vec2,
    max: Vec2,
}

impl SpriteRect {
    /// Creates a sprite rectangle, rejecting inverted corners.
    pub fn new(key: SpriteKey, origin: Vec2, min: Vec2, max: Vec2) -> Result<Self, RenderingError> {
        if min.x > max.x || min.y > max.y {
            return Err(RenderingError::InvalidSpriteBounds { key });
        }
        Ok(Self { origin, min, max })
    }

    /// Anchor pixel.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Top-left texture pixel.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Bottom-right texture pixel (exclusive).
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Size in texture pixels.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// World-space quad covered when the sprite is anchored at `at`.
    ///
    /// Returns the bottom-left and top-right corners, y up.
    #[must_use]
    pub fn world_bounds(&self, at: Vec2) -> (Vec2, Vec2) {
        let bottom_left = Vec2::new(
            at.x - (self.origin.x - self.min.x) / PIXELS_PER_TILE,
            at.y - (self.max.y - self.origin.y) / PIXELS_PER_TILE,
        );
        let top_right = Vec2::new(
            at.x + (self.max.x - self.origin.x) / PIXELS_PER_TILE,
            at.y + (self.origin.y - self.min.y) / PIXELS_PER_TILE,
        );
        (bottom_left, top_right)
    }

    fn fits(&self, texture_size: Vec2) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.max.x <= texture_size.x
            && self.max.y <= texture_size.y
    }
}

/// Complete, validated mapping from every [`SpriteKey`] to its atlas rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteCatalog {
    texture_size: Vec2,
    rects: HashMap<SpriteKey, SpriteRect>,
}

impl SpriteCatalog {
    /// Builds the catalog, failing on unknown keys, missing keys or rectangles outside the texture.
    pub fn new(
        texture_size: Vec2,
        rects: HashMap<SpriteKey, SpriteRect>,
    ) -> Result<Self, RenderingError> {
        let mut keys: Vec<SpriteKey> = rects.keys().copied().collect();
        keys.sort();
        for key in keys {
            if !key.is_canonical() {
                return Err(RenderingError::UnknownSprite { key });
            }
            if rects.get(&key).is_some_and(|rect| !rect.fits(texture_size)) {
                return Err(RenderingError::SpriteOutsideTexture { key });
            }
        }
        for key in SpriteKey::all() {
            if !rects.contains_key(&key) {
                return Err(RenderingError::MissingSprite { key });
            }
        }
        Ok(Self {
            texture_size,
            rects,
        })
    }

    /// Size of the atlas texture in pixels.
    #[must_use]
    pub const fn texture_size(&self) -> Vec2 {
        self.texture_size
    }

    /// Rectangle for the key.
    #[must_use]
    pub fn get(&self, key: SpriteKey) -> Option<SpriteRect> {
        self.rects.get(&key).copied()
    }

    /// Number of sprites in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
