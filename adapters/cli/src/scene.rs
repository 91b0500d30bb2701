use anyhow::{Context, Result};
use tilewire_rendering::{
    HudPresentation, PlayerPresentation, Scene, TileLayer, WirePresentation,
};
use tilewire_system_bootstrap::Bootstrap;
use tilewire_system_hud::HudView;
use tilewire_world::{query, World};

/// Builds the first frame; the tile layer never changes afterwards.
pub(crate) fn build_scene(bootstrap: &Bootstrap, world: &World, hud: &HudView) -> Result<Scene> {
    let grid = bootstrap.grid(world);
    let (columns, rows) = grid.dimensions();
    let tiles = grid.iter().map(|(_, tile)| tile.static_tile()).collect();
    let layer = TileLayer::new(columns, rows, tiles).context("failed to build tile layer")?;

    let mut scene = Scene::new(
        layer,
        bootstrap.hazard_region(world),
        Vec::new(),
        player_presentation(world),
        HudPresentation::default(),
    );
    refresh(&mut scene, world, hud);
    Ok(scene)
}

/// Copies the dynamic parts of the world into the scene.
pub(crate) fn refresh(scene: &mut Scene, world: &World, hud: &HudView) {
    scene.wires = query::trail_view(world)
        .iter()
        .map(|segment| WirePresentation {
            cell: segment.cell(),
            sprite: segment.sprite(),
        })
        .collect();
    scene.player = player_presentation(world);
    scene.hud = HudPresentation {
        length_digits: hud.length_digits(),
        remaining: hud.remaining(),
        message: hud.message().map(str::to_owned),
    };
    scene.exit_requested = query::quit_requested(world);
}

fn player_presentation(world: &World) -> PlayerPresentation {
    let player = query::player(world);
    PlayerPresentation {
        cell: player.cell,
        facing: player.facing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use tilewire_core::{CellCoord, ControlInput, Direction, GameConfig, StaticTile, WireSprite};

    fn session_and_scene() -> (Session, Scene) {
        let session = Session::new(GameConfig::default()).expect("default config is valid");
        let scene = build_scene(&Bootstrap, session.world(), &session.hud()).expect("scene builds");
        (session, scene)
    }

    #[test]
    fn first_frame_mirrors_the_world() {
        let (_, scene) = session_and_scene();

        assert_eq!((scene.tiles.columns(), scene.tiles.rows()), (100, 100));
        assert_eq!(scene.tiles.tile(CellCoord::new(0, 0)), Some(StaticTile::WallDark));
        assert_eq!(scene.tiles.tile(CellCoord::new(5, 5)), Some(StaticTile::Floor));
        assert_eq!(scene.wires.len(), 5);
        assert_eq!(scene.wires[0].cell, CellCoord::new(5, 5));
        assert_eq!(scene.player.cell, CellCoord::new(5, 5));
        assert_eq!(scene.player.facing, Direction::Down);
        assert_eq!(scene.hud.length_digits, vec![5]);
        assert_eq!(scene.hud.remaining, 43);
        assert!(!scene.exit_requested);
    }

    #[test]
    fn refresh_tracks_turns_and_quit() {
        let (mut session, mut scene) = session_and_scene();

        session.advance(&[ControlInput::Right]);
        refresh(&mut scene, session.world(), &session.hud());
        assert_eq!(scene.wires.len(), 6);
        assert_eq!(scene.wires[0].sprite, WireSprite::Horizontal);
        assert_eq!(scene.wires[1].sprite, WireSprite::for_turn(Direction::Up, Direction::Right));
        assert_eq!(scene.player.facing, Direction::Right);

        session.advance(&[ControlInput::Quit]);
        refresh(&mut scene, session.world(), &session.hud());
        assert!(scene.exit_requested);
    }
}
