use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use macroquad::{
    math::{Rect, Vec2 as MacroquadVec2},
    texture::{self, DrawTextureParams, FilterMode, Texture2D},
};
use tilewire_rendering::{Camera, Color, SpriteCatalog, SpriteKey, SpriteRect};

use crate::to_macroquad_color;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Atlas texture paired with the validated rectangle of every sprite.
#[derive(Debug)]
pub struct SpriteAtlas {
    texture: Texture2D,
    catalog: SpriteCatalog,
}

impl SpriteAtlas {
    /// Loads the atlas described by the manifest at the provided path.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manifest_with_loader(path, default_loader)
    }

    /// Draws the sprite anchored at the world point `at`.
    pub fn draw(&self, key: SpriteKey, at: Vec2, camera: &Camera, screen: Vec2, tint: Color) -> Result<()> {
        let rect = self
            .catalog
            .get(key)
            .with_context(|| format!("sprite `{}` missing from atlas", key.name()))?;
        let (bottom_left, top_right) = rect.world_bounds(at);
        let (top_left, size) = camera.screen_rect(bottom_left, top_right, screen);
        let source = rect.size();

        texture::draw_texture_ex(
            self.texture,
            top_left.x,
            top_left.y,
            to_macroquad_color(tint),
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(size.x, size.y)),
                source: Some(Rect::new(rect.min().x, rect.min().y, source.x, source.y)),
                ..DrawTextureParams::default()
            },
        );

        Ok(())
    }

    /// Returns the number of sprites stored in the atlas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    fn from_manifest_with_loader(
        path: impl AsRef<Path>,
        mut loader: impl FnMut(&Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let manifest_path = path.as_ref();
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let (texture_path, catalog) = parse_manifest(&contents, &base)?;
        let texture = loader(&texture_path).with_context(|| {
            format!("failed to load atlas texture from {}", texture_path.display())
        })?;
        Ok(Self { texture, catalog })
    }
}

fn default_loader(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read atlas texture at {}", path.display()))?;
    let texture = Texture2D::from_file_with_format(&bytes, None);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    texture: String,
    texture_size: [u16; 2],
    sprites: HashMap<String, ManifestRect>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestRect {
    origin: [u16; 2],
    min: [u16; 2],
    max: [u16; 2],
}

fn pixel(point: [u16; 2]) -> Vec2 {
    Vec2::new(f32::from(point[0]), f32::from(point[1]))
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<(PathBuf, SpriteCatalog)> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut rects = HashMap::with_capacity(manifest.sprites.len());
    for (name, rect) in manifest.sprites {
        let Some(key) = SpriteKey::from_name(&name) else {
            bail!("unknown sprite key `{name}` in manifest");
        };
        let rect = SpriteRect::new(key, pixel(rect.origin), pixel(rect.min), pixel(rect.max))?;
        if rects.insert(key, rect).is_some() {
            bail!("sprite manifest contains duplicate entry for `{name}`");
        }
    }

    let catalog = SpriteCatalog::new(pixel(manifest.texture_size), rects)
        .context("sprite manifest is incomplete")?;
    Ok((base_path.join(manifest.texture), catalog))
}
