use tilewire_core::ControlInput;
use tilewire_rendering_macroquad::{controls_from_keys, KeyObservation};

#[test]
fn each_key_maps_to_its_control() {
    let cases = [
        (KeyObservation { up: true, ..KeyObservation::default() }, ControlInput::Up),
        (KeyObservation { down: true, ..KeyObservation::default() }, ControlInput::Down),
        (KeyObservation { left: true, ..KeyObservation::default() }, ControlInput::Left),
        (KeyObservation { right: true, ..KeyObservation::default() }, ControlInput::Right),
        (
            KeyObservation { interact: true, ..KeyObservation::default() },
            ControlInput::Interact,
        ),
        (KeyObservation { quit: true, ..KeyObservation::default() }, ControlInput::Quit),
    ];

    for (keys, expected) in cases {
        assert_eq!(controls_from_keys(keys), vec![expected], "{keys:?}");
    }
}

#[test]
fn every_key_at_once_yields_movement_before_quit() {
    let keys = KeyObservation {
        up: true,
        down: true,
        left: true,
        right: true,
        interact: true,
        quit: true,
    };

    assert_eq!(
        controls_from_keys(keys),
        vec![
            ControlInput::Up,
            ControlInput::Down,
            ControlInput::Left,
            ControlInput::Right,
            ControlInput::Interact,
            ControlInput::Quit,
        ]
    );
}
