#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure HUD system that folds world events into display-ready values.

use serde::Serialize;
use tilewire_core::{Event, CONVERSATION_MESSAGE};

/// Values the presentation layer shows on top of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HudView {
    trail_length: u32,
    max_steps: u32,
    message: Option<&'static str>,
    rejected_moves: u32,
}

impl HudView {
    /// Number of live trail segments.
    #[must_use]
    pub const fn trail_length(&self) -> u32 {
        self.trail_length
    }

    /// Segments that can still be laid before the cap is reached.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.max_steps.saturating_sub(self.trail_length)
    }

    /// Text box contents, if a conversation is showing.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Step requests turned down so far.
    #[must_use]
    pub const fn rejected_moves(&self) -> u32 {
        self.rejected_moves
    }

    /// Decimal digits of the trail length, most significant first.
    #[must_use]
    pub fn length_digits(&self) -> Vec<u8> {
        let mut digits = Vec::new();
        let mut value = self.trail_length;
        loop {
            digits.push((value % 10) as u8);
            value /= 10;
            if value == 0 {
                break;
            }
        }
        digits.reverse();
        digits
    }
}

/// Pure system that tracks HUD values from world events.
#[derive(Debug)]
pub struct Hud {
    view: HudView,
}

impl Hud {
    /// Creates the HUD for a world whose trail currently holds `trail_length` of `max_steps`.
    #[must_use]
    pub fn new(trail_length: u32, max_steps: u32) -> Self {
        Self {
            view: HudView {
                trail_length,
                max_steps,
                message: None,
                rejected_moves: 0,
            },
        }
    }

    /// Folds the events produced by one batch of commands.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TrailGrew { length, .. } | Event::TrailRetracted { length, .. } => {
                    self.view.trail_length = *length;
                }
                Event::MoveRejected { .. } => {
                    self.view.rejected_moves = self.view.rejected_moves.saturating_add(1);
                }
                Event::ConversationStarted => self.view.message = Some(CONVERSATION_MESSAGE),
                Event::ConversationEnded => self.view.message = None,
                Event::PlayerFaced { .. } | Event::PlayerMoved { .. } | Event::QuitRequested => {}
            }
        }
    }

    /// Current HUD values.
    #[must_use]
    pub fn view(&self) -> HudView {
        self.view
    }
}
