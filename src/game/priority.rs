//! Priority windows
//!
//! A window closes when both players pass in a row. Casting an instant
//! resets the pass chain and opens a fresh window above the new effect, so
//! responses resolve last in, first out.

use crate::core::CardKind;
use crate::game::game_loop::Flow;
use crate::game::mana_payment::{check_instant, pay_cost, InstantRejection};
use crate::game::{Action, GameLoop, Phase};
use crate::zones::ZoneKind;

impl GameLoop {
    pub(crate) fn phase_priority(&mut self, action: Action) -> Flow {
        let holder = self.game.priority;
        let idx = match action {
            Action::Noop => return self.await_action(Phase::Priority),
            Action::Enter => {
                if self.game.priority_passed {
                    log_if_verbose!(self, "priority", "Both players passed");
                    self.game.priority = self.game.turn;
                    self.game.priority_passed = false;
                    return Flow::Drain;
                }
                log_if_verbose!(self, "priority", "{} passes priority", holder);
                self.game.priority = holder.other();
                self.game.priority_passed = true;
                return self.await_action(Phase::Priority);
            }
            Action::TogglePriority => {
                self.toggle_priority(holder);
                return self.await_action(Phase::Priority);
            }
            Action::Select(idx) => idx,
        };

        if let Err(rejection) = check_instant(&self.game, holder, idx) {
            let reason = match rejection {
                InstantRejection::NoSuchCard => format!("invalid action {idx}"),
                InstantRejection::NotInstant => format!("card {idx} is not an instant"),
                InstantRejection::ConditionNotMet => "condition for instant not met".to_string(),
                InstantRejection::NotEnoughMana => "not enough mana".to_string(),
            };
            return self.reject(Phase::Priority, &reason);
        }

        let player = self.game.player_mut(holder);
        let Some(card) = player.zones.hand.get(idx).cloned() else {
            return self.reject(Phase::Priority, &format!("invalid action {idx}"));
        };
        let CardKind::Instant(spell) = card.kind else {
            return self.reject(Phase::Priority, &format!("card {idx} is not an instant"));
        };
        if !pay_cost(player, card.cost) {
            return self.reject(Phase::Priority, "not enough mana");
        }
        player.zones.move_card(ZoneKind::Hand, ZoneKind::Graveyard, idx);
        self.game.priority_passed = false;

        self.logger.normal(&format!("{holder} casts {}", card.name));
        self.cast_spell(holder, spell);
        if spell.needs_target() {
            // Target phase runs next and opens the window itself
            Flow::Drain
        } else {
            Flow::AwaitUser
        }
    }
}
