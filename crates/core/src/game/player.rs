//! Player command resolution and the hit roll shared with plant attacks.
//! This module exists to keep bump-to-attack rules in one place.
//! It does not advance the world; `rest_act` does that.

use tracing::{debug, trace};

use super::*;

impl Game {
    /// Resolves one player command. Returns what happened, or `None` when the command was
    /// a no-op (blocked tile or a dead player). Never advances the plants.
    pub fn player_act(&mut self, direction: Direction, action: Action) -> Option<Did> {
        if self.is_over() {
            return None;
        }
        self.phase = TurnPhase::ResolvingPlayer;
        let did = match action {
            Action::Move => self.move_or_attack(direction),
        };
        self.phase = if did.is_some() { TurnPhase::Resting } else { TurnPhase::AwaitingInput };
        did
    }

    fn move_or_attack(&mut self, direction: Direction) -> Option<Did> {
        let (dx, dy) = direction.delta();
        let to = self.player_coord().offset(dx, dy);
        if !self.region.is_walkable(to) {
            return None;
        }

        let Some(occupant) = self.index.entity_at(to) else {
            self.index.move_to(self.player_id, to).expect("destination was checked free");
            self.emit(self.player_id, Did::Moved, None);
            return Some(Did::Moved);
        };

        let vitals = self.entities[self.player_id].vitals;
        Some(self.strike(self.player_id, occupant, vitals.damage, vitals.to_hit))
    }

    /// Rolls one attack and applies its outcome. Dead plants are queued for removal; a dead
    /// player stays on the board and the death is announced at once.
    pub(super) fn strike(
        &mut self,
        attacker: EntityId,
        defender: EntityId,
        damage: i32,
        to_hit: f64,
    ) -> Did {
        let roll = self.rng.uniform();
        if roll >= to_hit {
            trace!(?attacker, ?defender, roll, to_hit, "attack missed");
            self.emit(attacker, Did::Missed, Some(defender));
            return Did::Missed;
        }
        trace!(?attacker, ?defender, roll, to_hit, damage, "attack hit");

        let Some(target) = self.entities.get_mut(defender) else {
            return Did::Missed;
        };
        target.vitals.take_damage(damage);
        let killed = target.vitals.is_dead();
        let name = target.type_name();
        self.emit(attacker, Did::Attacked, Some(defender));

        if killed {
            debug!(?defender, kind = name, "entity killed");
            if defender == self.player_id {
                self.emit(defender, Did::Died, None);
            } else {
                self.index.remove_later(defender);
            }
        }
        Did::Attacked
    }
}
