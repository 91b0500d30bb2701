use tilewire_core::{CellCoord, Command, Direction, GameConfig, HazardConfig, CONVERSATION_MESSAGE};
use tilewire_system_hud::Hud;
use tilewire_world::{self as world, query, World};

#[test]
fn hud_tracks_the_world_through_a_session() {
    let config = GameConfig {
        max_steps: 7,
        hazard: HazardConfig {
            origin: CellCoord::new(9, 5),
            ..HazardConfig::default()
        },
        ..GameConfig::default()
    };
    let mut world = World::new(config).expect("config is valid");
    let mut hud = Hud::new(query::trail_length(&world), config.max_steps);

    let commands = [
        Command::Step {
            direction: Direction::Right,
        },
        Command::Step {
            direction: Direction::Right,
        },
        Command::Step {
            direction: Direction::Right,
        },
        Command::Interact,
    ];
    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        hud.handle(&events);
    }

    let view = hud.view();
    assert_eq!(view.trail_length(), query::trail_length(&world));
    assert_eq!(view.trail_length(), 7);
    assert_eq!(view.remaining(), 0);
    assert_eq!(view.rejected_moves(), 1);
    assert_eq!(view.message(), Some(CONVERSATION_MESSAGE));
    assert_eq!(view.message(), query::message(&world));
}
