use tilewire_core::{GameConfig, Occupant, StaticTile, WELCOME_BANNER};
use tilewire_system_bootstrap::Bootstrap;
use tilewire_world::{query, World};

#[test]
fn bootstrap_exposes_start_up_data() {
    let world = World::new(GameConfig::default()).expect("reference config is valid");
    let bootstrap = Bootstrap;

    assert_eq!(bootstrap.welcome_banner(&world), WELCOME_BANNER);
    assert_eq!(bootstrap.config(&world), &GameConfig::default());
    assert_eq!(bootstrap.grid(&world).dimensions(), (100, 100));

    let region = bootstrap.hazard_region(&world);
    let grid = bootstrap.grid(&world);
    assert!(region
        .cells()
        .all(|cell| grid.occupant(cell) == Some(Occupant::Hazard)));

    let band = query::movement_band(&world);
    assert!(grid
        .iter()
        .filter(|(_, tile)| tile.static_tile() == StaticTile::Floor)
        .all(|(cell, _)| band.contains(cell)));
}
