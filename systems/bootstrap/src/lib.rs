#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Tilewire experience.

use tilewire_core::{CellRect, GameConfig};
use tilewire_world::{
    query::{self, GridView},
    World,
};

/// Produces data required to greet the player and lay out the first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the configuration the world was built from.
    #[must_use]
    pub fn config<'world>(&self, world: &'world World) -> &'world GameConfig {
        query::config(world)
    }

    /// Exposes the static and dynamic tile layers required for rendering.
    #[must_use]
    pub fn grid<'world>(&self, world: &'world World) -> GridView<'world> {
        query::grid_view(world)
    }

    /// Exposes the sweeper footprint for presentation purposes.
    #[must_use]
    pub fn hazard_region(&self, world: &World) -> CellRect {
        query::hazard_region(world)
    }
}
