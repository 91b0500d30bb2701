#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns player input into world commands.

use log::debug;
use thiserror::Error;
use tilewire_core::{Command, ControlInput, Direction, Event};

/// Pure system that maps input events to commands in arrival order.
#[derive(Debug, Default)]
pub struct Controls {
    quit_issued: bool,
}

impl Controls {
    /// Consumes world events and the inputs gathered this tick, emitting one command per input.
    ///
    /// Once a quit has been issued or observed every later input is dropped.
    pub fn handle(&mut self, events: &[Event], inputs: &[ControlInput], out: &mut Vec<Command>) {
        if events
            .iter()
            .any(|event| matches!(event, Event::QuitRequested))
        {
            self.quit_issued = true;
        }

        for (index, input) in inputs.iter().enumerate() {
            if self.quit_issued {
                debug!(
                    target: "tilewire::controls",
                    "dropping {} inputs after quit",
                    inputs.len() - index
                );
                break;
            }
            let command = command_for(*input);
            if command == Command::Quit {
                self.quit_issued = true;
            }
            out.push(command);
        }
    }

    /// Reports whether a quit has already been issued.
    #[must_use]
    pub fn quit_issued(&self) -> bool {
        self.quit_issued
    }
}

/// Command produced by a single input.
#[must_use]
pub fn command_for(input: ControlInput) -> Command {
    match input {
        ControlInput::Up => Command::Step {
            direction: Direction::Up,
        },
        ControlInput::Down => Command::Step {
            direction: Direction::Down,
        },
        ControlInput::Left => Command::Step {
            direction: Direction::Left,
        },
        ControlInput::Right => Command::Step {
            direction: Direction::Right,
        },
        ControlInput::Interact => Command::Interact,
        ControlInput::Quit => Command::Quit,
    }
}

/// Failure to parse a move script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script contains a character that names no input.
    #[error("unknown move '{symbol}' at offset {offset}; expected one of U D L R I Q")]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Byte offset of the character in the script.
        offset: usize,
    },
}

/// Parses a move script such as `"RRU, UI"` into inputs.
///
/// Symbols are case-insensitive; whitespace and commas are ignored.
pub fn parse_script(script: &str) -> Result<Vec<ControlInput>, ScriptError> {
    let mut inputs = Vec::with_capacity(script.len());
    for (offset, symbol) in script.char_indices() {
        if symbol.is_whitespace() || symbol == ',' {
            continue;
        }
        let input = match symbol.to_ascii_uppercase() {
            'U' => ControlInput::Up,
            'D' => ControlInput::Down,
            'L' => ControlInput::Left,
            'R' => ControlInput::Right,
            'I' => ControlInput::Interact,
            'Q' => ControlInput::Quit,
            _ => return Err(ScriptError::UnknownSymbol { symbol, offset }),
        };
        inputs.push(input);
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_map_to_commands_in_arrival_order() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        controls.handle(
            &[],
            &[ControlInput::Left, ControlInput::Interact, ControlInput::Up],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![
                Command::Step {
                    direction: Direction::Left
                },
                Command::Interact,
                Command::Step {
                    direction: Direction::Up
                },
            ]
        );
    }

    #[test]
    fn inputs_after_quit_are_dropped() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        controls.handle(
            &[],
            &[ControlInput::Right, ControlInput::Quit, ControlInput::Down],
            &mut commands,
        );
        controls.handle(&[], &[ControlInput::Up], &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::Step {
                    direction: Direction::Right
                },
                Command::Quit,
            ]
        );
        assert!(controls.quit_issued());
    }

    #[test]
    fn observed_quit_event_silences_controls() {
        let mut controls = Controls::default();
        let mut commands = Vec::new();

        controls.handle(&[Event::QuitRequested], &[ControlInput::Up], &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn script_ignores_case_whitespace_and_commas() {
        let inputs = parse_script(" r, U d\tl,i q ").expect("script parses");
        assert_eq!(
            inputs,
            vec![
                ControlInput::Right,
                ControlInput::Up,
                ControlInput::Down,
                ControlInput::Left,
                ControlInput::Interact,
                ControlInput::Quit,
            ]
        );
    }

    #[test]
    fn script_reports_unknown_symbols_with_offset() {
        assert_eq!(
            parse_script("RRx"),
            Err(ScriptError::UnknownSymbol {
                symbol: 'x',
                offset: 2
            })
        );
    }

    #[test]
    fn empty_script_yields_no_inputs() {
        assert_eq!(parse_script(""), Ok(Vec::new()));
    }
}
