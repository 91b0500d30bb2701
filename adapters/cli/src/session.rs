use anyhow::{Context, Result};
use tilewire_core::{Command, ControlInput, Event, GameConfig};
use tilewire_system_controls::Controls;
use tilewire_system_hud::{Hud, HudView};
use tilewire_world::{self as world, query, World};

/// Authoritative world together with the pure systems that drive it.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    controls: Controls,
    hud: Hud,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Session {
    pub(crate) fn new(config: GameConfig) -> Result<Self> {
        let world = World::new(config).context("invalid game configuration")?;
        let hud = Hud::new(query::trail_length(&world), config.max_steps);
        Ok(Self {
            world,
            controls: Controls::default(),
            hud,
            events: Vec::new(),
            commands: Vec::new(),
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn hud(&self) -> HudView {
        self.hud.view()
    }

    /// Runs one tick: inputs become commands, commands are applied in order
    /// and the HUD folds the resulting events.
    pub(crate) fn advance(&mut self, inputs: &[ControlInput]) {
        self.controls
            .handle(&self.events, inputs, &mut self.commands);
        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
        self.hud.handle(&self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewire_core::{CellCoord, CONVERSATION_MESSAGE};

    #[test]
    fn inputs_move_the_player_and_update_the_hud() {
        let mut session = Session::new(GameConfig::default()).expect("default config is valid");

        session.advance(&[ControlInput::Right, ControlInput::Right]);

        assert_eq!(query::player(session.world()).cell, CellCoord::new(7, 5));
        assert_eq!(session.hud().trail_length(), 7);
    }

    #[test]
    fn inputs_after_quit_are_ignored() {
        let mut session = Session::new(GameConfig::default()).expect("default config is valid");

        session.advance(&[ControlInput::Quit, ControlInput::Right]);
        session.advance(&[ControlInput::Right]);

        assert!(query::quit_requested(session.world()));
        assert_eq!(query::player(session.world()).cell, CellCoord::new(5, 5));
    }

    #[test]
    fn conversation_reaches_the_hud() {
        let mut config = GameConfig::default();
        config.hazard.origin = CellCoord::new(8, 5);
        config.hazard.size = tilewire_core::CellRectSize::new(2, 2);
        let mut session = Session::new(config).expect("config is valid");

        session.advance(&[ControlInput::Interact]);
        assert_eq!(session.hud().message(), Some(CONVERSATION_MESSAGE));

        session.advance(&[ControlInput::Down]);
        assert_eq!(session.hud().message(), None);
    }
}
