use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use serde::Serialize;
use tilewire_core::{CellCoord, Direction, GameConfig};
use tilewire_system_controls::parse_script;
use tilewire_world::query;

use crate::session::Session;

/// Output encoding for the replay summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SummaryFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Final state of a replayed script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ReplaySummary {
    pub(crate) player: CellCoord,
    pub(crate) facing: Direction,
    pub(crate) trail_length: u32,
    pub(crate) max_steps: u32,
    pub(crate) in_conversation: bool,
    pub(crate) rejected_moves: u32,
    pub(crate) quit_requested: bool,
}

impl ReplaySummary {
    pub(crate) fn render(&self, format: SummaryFormat) -> Result<String> {
        match format {
            SummaryFormat::Text => Ok(self.to_string()),
            SummaryFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to encode replay summary")
            }
        }
    }
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "player: ({}, {}) facing {:?}",
            self.player.column(),
            self.player.row(),
            self.facing
        )?;
        writeln!(f, "trail: {}/{}", self.trail_length, self.max_steps)?;
        writeln!(
            f,
            "conversation: {}",
            if self.in_conversation { "yes" } else { "no" }
        )?;
        writeln!(f, "rejected moves: {}", self.rejected_moves)?;
        write!(f, "quit: {}", if self.quit_requested { "yes" } else { "no" })
    }
}

/// Applies a move script to a fresh world, one input per tick.
pub(crate) fn replay(config: GameConfig, script: &str) -> Result<ReplaySummary> {
    let inputs = parse_script(script).context("invalid move script")?;
    let mut session = Session::new(config)?;
    info!(target: "tilewire::cli", "replaying {} inputs", inputs.len());

    for input in inputs {
        session.advance(&[input]);
    }

    let world = session.world();
    let player = query::player(world);
    let hud = session.hud();
    Ok(ReplaySummary {
        player: player.cell,
        facing: player.facing,
        trail_length: query::trail_length(world),
        max_steps: query::config(world).max_steps,
        in_conversation: query::in_conversation(world),
        rejected_moves: hud.rejected_moves(),
        quit_requested: query::quit_requested(world),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewire_core::CellRectSize;

    #[test]
    fn script_replays_growth_retraction_and_turns() {
        let summary = replay(GameConfig::default(), "R R R U U D I L").expect("replay succeeds");

        assert_eq!(summary.player, CellCoord::new(7, 6));
        assert_eq!(summary.facing, Direction::Left);
        assert_eq!(summary.trail_length, 10);
        assert_eq!(summary.rejected_moves, 0);
        assert!(!summary.in_conversation);
        assert!(!summary.quit_requested);
    }

    #[test]
    fn rejected_moves_are_counted() {
        let mut config = GameConfig::default();
        config.max_steps = 6;

        let summary = replay(config, "rrr").expect("replay succeeds");

        assert_eq!(summary.player, CellCoord::new(6, 5));
        assert_eq!(summary.trail_length, 6);
        assert_eq!(summary.rejected_moves, 2);
    }

    #[test]
    fn quit_stops_the_replay() {
        let summary = replay(GameConfig::default(), "q,r,r").expect("replay succeeds");

        assert!(summary.quit_requested);
        assert_eq!(summary.player, CellCoord::new(5, 5));
    }

    #[test]
    fn interaction_next_to_the_sweeper_opens_a_conversation() {
        let mut config = GameConfig::default();
        config.hazard.origin = CellCoord::new(8, 5);
        config.hazard.size = CellRectSize::new(2, 2);

        let summary = replay(config, "I").expect("replay succeeds");

        assert!(summary.in_conversation);
    }

    #[test]
    fn unknown_symbols_are_reported() {
        let error = replay(GameConfig::default(), "RX").expect_err("X is not a move");
        assert!(format!("{error:#}").contains("invalid move script"));
    }

    #[test]
    fn summary_renders_as_text_and_json() {
        let summary = replay(GameConfig::default(), "R").expect("replay succeeds");

        let text = summary.render(SummaryFormat::Text).expect("text renders");
        assert!(text.contains("player: (6, 5) facing Right"));
        assert!(text.contains("trail: 6/48"));

        let json = summary.render(SummaryFormat::Json).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["trail_length"], 6);
        assert_eq!(value["player"]["column"], 6);
        assert_eq!(value["facing"], "Right");
    }
}
