//! Step and interaction transitions.

use log::{debug, trace};
use tilewire_core::{Direction, Event, MoveRejection};

use crate::{hazard, World};

/// Resolves a single directional step against the grid and trail.
///
/// The ordering is fixed: dismiss any conversation, face the direction,
/// reject steps leaving the band or into occupied tiles (except the tile
/// directly behind the head), then either retract the head when stepping
/// back or grow a new one subject to the cap.
pub(crate) fn step(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    if world.in_conversation {
        world.in_conversation = false;
        out_events.push(Event::ConversationEnded);
    }
    world.player.facing = direction;
    out_events.push(Event::PlayerFaced { facing: direction });

    let from = world.player.cell;
    let Some(target) = from
        .step(direction)
        .filter(|cell| world.band.contains(*cell))
    else {
        reject(direction, MoveRejection::OutsideBand, out_events);
        return;
    };

    if let Some(occupant) = world.grid.occupant(target) {
        if Some(occupant) != world.trail.head_predecessor_occupant() {
            reject(direction, MoveRejection::Occupied, out_events);
            return;
        }
    }

    world.player.cell = target;

    if world
        .trail
        .head_direction()
        .is_some_and(|head| head.is_opposite(direction))
    {
        out_events.push(Event::PlayerMoved { from, to: target });
        if let Some(removed) = world.trail.shrink(&mut world.grid) {
            trace!(
                target: "tilewire::movement",
                "retracted segment {} at {:?}",
                removed.id().get(),
                removed.cell()
            );
            out_events.push(Event::TrailRetracted {
                segment: removed.id(),
                cell: removed.cell(),
                length: world.trail.len(),
            });
        }
        return;
    }

    if world.trail.len() >= world.config.max_steps {
        world.player.cell = from;
        reject(direction, MoveRejection::TrailCapReached, out_events);
        return;
    }

    let segment = world.trail.grow(&mut world.grid, target, direction);
    trace!(
        target: "tilewire::movement",
        "laid segment {} at {:?}",
        segment.get(),
        target
    );
    out_events.push(Event::PlayerMoved { from, to: target });
    out_events.push(Event::TrailGrew {
        segment,
        cell: target,
        length: world.trail.len(),
    });
}

/// Opens a conversation when the sweeper is within reach of the player.
pub(crate) fn interact(world: &mut World, out_events: &mut Vec<Event>) {
    let in_reach = hazard::sweeper_in_reach(&world.grid, world.player.cell);
    debug!(
        target: "tilewire::movement",
        "interact at {:?}: sweeper in reach = {in_reach}",
        world.player.cell
    );
    if in_reach && !world.in_conversation {
        world.in_conversation = true;
        out_events.push(Event::ConversationStarted);
    }
}

fn reject(direction: Direction, reason: MoveRejection, out_events: &mut Vec<Event>) {
    trace!(target: "tilewire::movement", "step {direction:?} rejected: {reason:?}");
    out_events.push(Event::MoveRejected { direction, reason });
}
