//! Turn engine that owns the world and sequences the player and plant phases.
//! This module exists to be the single mutation entry point for front-ends.
//! It does not render or read input; consumers drive it with commands and read state back.

use slotmap::SlotMap;

use crate::config::SimConfig;
use crate::entity::Entity;
use crate::index::SpatialIndex;
use crate::region::Region;
use crate::rng::GameRng;
use crate::types::*;

mod bootstrap;
mod hash;
mod player;
mod queries;
mod rest;

#[cfg(test)]
mod test_support;

/// Synchronous observer for everything the world does.
pub type Listener = Box<dyn FnMut(&DidEvent)>;

pub struct Game {
    config: SimConfig,
    rng: GameRng,
    region: Region,
    index: SpatialIndex<EntityId>,
    entities: SlotMap<EntityId, Entity>,
    player_id: EntityId,
    level: usize,
    turn: u64,
    phase: TurnPhase,
    log: Vec<DidEvent>,
    listener: Option<Listener>,
}

impl Game {
    /// Replaces the current listener. Events are still appended to [`Game::log`].
    pub fn set_listener(&mut self, listener: impl FnMut(&DidEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    fn emit(&mut self, source: EntityId, did: Did, target: Option<EntityId>) {
        let event = DidEvent { source, did, target };
        self.log.push(event);
        if let Some(listener) = self.listener.as_mut() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn listener_sees_every_logged_event() {
        let mut game = Game::new(11, SimConfig::default()).expect("default config is valid");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.set_listener(move |event| sink.borrow_mut().push(*event));

        for _ in 0..12 {
            game.rest_act();
        }
        assert!(!game.log().is_empty());
        assert_eq!(seen.borrow().as_slice(), game.log());
    }

    #[test]
    fn cleared_listener_stops_receiving() {
        let mut game = Game::new(11, SimConfig::default()).expect("default config is valid");
        let seen = Rc::new(RefCell::new(0_usize));
        let sink = Rc::clone(&seen);
        game.set_listener(move |_| *sink.borrow_mut() += 1);
        game.clear_listener();

        for _ in 0..6 {
            game.rest_act();
        }
        assert_eq!(*seen.borrow(), 0);
        assert!(!game.log().is_empty());
    }
}
