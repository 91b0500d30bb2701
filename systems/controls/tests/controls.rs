use tilewire_core::{CellCoord, Command, ControlInput, Event, GameConfig};
use tilewire_system_controls::{parse_script, Controls};
use tilewire_world::{self as world, query, World};

fn drive(world: &mut World, controls: &mut Controls, inputs: &[ControlInput]) -> Vec<Event> {
    let mut commands = Vec::new();
    controls.handle(&[], inputs, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn scripted_inputs_drive_the_world_in_order() {
    let mut world = World::new(GameConfig::default()).expect("reference config is valid");
    let mut controls = Controls::default();
    let inputs = parse_script("RRU").expect("script parses");

    let _ = drive(&mut world, &mut controls, &inputs);

    assert_eq!(query::player(&world).cell, CellCoord::new(7, 6));
    assert_eq!(query::trail_length(&world), 8);
}

#[test]
fn quit_mid_batch_stops_the_remaining_moves() {
    let mut world = World::new(GameConfig::default()).expect("reference config is valid");
    let mut controls = Controls::default();
    let inputs = parse_script("RQRR").expect("script parses");

    let events = drive(&mut world, &mut controls, &inputs);

    assert_eq!(query::player(&world).cell, CellCoord::new(6, 5));
    assert!(query::quit_requested(&world));
    assert_eq!(events.last(), Some(&Event::QuitRequested));

    let mut commands: Vec<Command> = Vec::new();
    controls.handle(&events, &[ControlInput::Left], &mut commands);
    assert!(commands.is_empty());
}
