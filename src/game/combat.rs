//! Blocking and combat damage
//!
//! Blockers are assigned one attacker at a time: `block_idx` walks the
//! attacking board and the defending player toggles creatures onto the
//! current attacker. Damage is settled in a single pass once every
//! attacker has been offered.

use crate::core::PlayerId;
use crate::game::game_loop::{Flow, GameEndReason};
use crate::game::{Action, GameLoop, Phase, VerbosityLevel};
use crate::zones::{PlayerZones, ZoneKind};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Outcome of one combat damage step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Damage dealt to the defending player by unblocked or surviving attackers
    pub damage_to_player: i32,

    /// Attacking board indices destroyed, in board order
    pub attackers_destroyed: SmallVec<[usize; 4]>,

    /// Defending board indices destroyed, in board order
    pub blockers_destroyed: SmallVec<[usize; 4]>,
}

/// Settle combat between the attacking and defending boards
///
/// Each attacker fights its blockers in board order, carrying its remaining
/// attack from one to the next. A blocker dies when the remaining attack
/// covers its health; otherwise it absorbs all of it. An attacker that dies
/// deals nothing to the player. Dead creatures go to their owner's
/// graveyard after every fight has been computed, so indices stay stable
/// while iterating. Combat flags are cleared on both boards.
pub fn resolve_combat(attackers: &mut PlayerZones, defenders: &mut PlayerZones) -> CombatReport {
    let mut report = CombatReport::default();

    for (attacker_idx, card) in attackers.board.iter().enumerate() {
        let Some(attacker) = card.as_creature().filter(|c| c.attacking) else {
            continue;
        };

        let mut attack = attacker.attack;
        let mut health = attacker.health;
        let mut destroyed = false;

        for (blocker_idx, blocker_card) in defenders.board.iter().enumerate() {
            let Some(blocker) = blocker_card.as_creature() else {
                continue;
            };
            if blocker.defending != Some(attacker_idx) {
                continue;
            }

            if attack >= blocker.health {
                attack -= blocker.health;
                health -= blocker.attack;
                report.blockers_destroyed.push(blocker_idx);
            } else {
                health -= blocker.attack;
                attack = 0;
            }

            if health <= 0 {
                destroyed = true;
                break;
            }
        }

        if destroyed {
            report.attackers_destroyed.push(attacker_idx);
        } else {
            report.damage_to_player += attack;
        }
    }

    report.blockers_destroyed.sort_unstable();
    clear_combat_flags(attackers);
    clear_combat_flags(defenders);

    for &idx in report.attackers_destroyed.iter().rev() {
        attackers.move_card(ZoneKind::Board, ZoneKind::Graveyard, idx);
    }
    for &idx in report.blockers_destroyed.iter().rev() {
        defenders.move_card(ZoneKind::Board, ZoneKind::Graveyard, idx);
    }

    report
}

fn clear_combat_flags(zones: &mut PlayerZones) {
    for card in zones.board.iter_mut() {
        if let Some(creature) = card.as_creature_mut() {
            creature.attacking = false;
            creature.defending = None;
        }
    }
}

impl GameLoop {
    /// Defending player assigns blockers to the attacker at `block_idx`
    ///
    /// `turn` names the defender for the whole block phase.
    pub(crate) fn phase_block(&mut self, action: Action) -> Flow {
        let defender = self.game.turn;
        let attacker = defender.other();

        let attacking_board = &self.game.player(attacker).zones.board;
        let attacker_count = attacking_board.len();
        let mut current = self.game.block_idx;
        while current < attacker_count
            && !attacking_board
                .get(current)
                .and_then(|card| card.as_creature())
                .is_some_and(|c| c.attacking)
        {
            current += 1;
        }

        let can_block = self.game.player(defender).zones.board.iter().any(|card| {
            card.as_creature().is_some_and(|c| {
                !card.tapped && (c.defending.is_none() || c.defending == Some(current))
            })
        });
        if !can_block {
            current = attacker_count;
        }
        self.game.block_idx = current;

        if current >= attacker_count {
            return self.finish_combat();
        }

        let idx = match action {
            Action::Noop => return self.await_action(Phase::Block),
            Action::Enter => {
                self.game.block_idx += 1;
                self.game.stack.push_phase(Phase::Block);
                return Flow::Drain;
            }
            Action::TogglePriority => {
                return self.reject(Phase::Block, "priority cannot be toggled while blocking")
            }
            Action::Select(idx) => idx,
        };

        let board = &mut self.game.player_mut(defender).zones.board;
        let len = board.len();
        let Some(card) = board.get_mut(idx) else {
            return self.reject(Phase::Block, &format!("invalid action {idx}, board has {len} cards"));
        };
        if card.tapped {
            return self.reject(Phase::Block, "blocking creature is tapped");
        }
        let Some(creature) = card.as_creature_mut() else {
            return self.reject(Phase::Block, "not a creature");
        };
        if let Some(other) = creature.defending.filter(|&other| other != current) {
            return self.reject(
                Phase::Block,
                &format!("creature already blocks attacker {other}"),
            );
        }

        creature.defending = match creature.defending {
            Some(_) => None,
            None => Some(current),
        };
        let blocking = creature.defending.is_some();
        log_if_verbose!(
            self,
            "combat",
            "Creature {} blocking attacker {}: {}",
            idx,
            current,
            blocking
        );
        self.await_action(Phase::Block)
    }

    fn finish_combat(&mut self) -> Flow {
        let defender = self.game.turn;
        let attacker = defender.other();

        let report = {
            let (defending, attacking) = self.game.player_and_opponent_mut(defender);
            resolve_combat(&mut attacking.zones, &mut defending.zones)
        };
        self.log_combat(attacker, &report);

        self.game.block_idx = 0;
        self.game.player_mut(defender).lose_health(report.damage_to_player);
        if self.game.player(defender).has_lost() {
            self.logger.normal(&format!("{defender} has died"));
            return Flow::GameOver(self.episode_result(attacker, GameEndReason::PlayerDeath));
        }

        // The defender draws at the end of combat
        if let Some(result) = self.draw_or_lose(defender) {
            return Flow::GameOver(result);
        }

        self.game.turn = attacker;
        self.game.stack.push_phase(Phase::Untap);
        Flow::Drain
    }

    fn log_combat(&self, attacker: PlayerId, report: &CombatReport) {
        if report.damage_to_player > 0 {
            self.logger.log(
                VerbosityLevel::Normal,
                Some("combat"),
                &format!(
                    "{attacker} deals {} damage to {}",
                    report.damage_to_player,
                    attacker.other()
                ),
            );
        }
        log_if_verbose!(
            self,
            "combat",
            "Attackers destroyed: {:?}, blockers destroyed: {:?}",
            report.attackers_destroyed.as_slice(),
            report.blockers_destroyed.as_slice()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::game::{GameConfig, GameLogger, GameState, VerbosityLevel};
    use crate::loader::DeckList;

    fn attacker(name: &str, attack: i32, health: i32) -> Card {
        let mut card = Card::creature(name, 1, attack, health);
        let state = card.as_creature_mut().unwrap();
        state.summoning_sickness = false;
        state.attacking = true;
        card.tapped = true;
        card
    }

    fn blocker(name: &str, attack: i32, health: i32, blocks: usize) -> Card {
        let mut card = Card::creature(name, 1, attack, health);
        card.as_creature_mut().unwrap().defending = Some(blocks);
        card
    }

    #[test]
    fn test_unblocked_attacker_hits_player() {
        let mut atk = PlayerZones::new();
        let mut def = PlayerZones::new();
        atk.board.push(attacker("Giant", 3, 3));

        let report = resolve_combat(&mut atk, &mut def);
        assert_eq!(report.damage_to_player, 3);
        assert!(report.attackers_destroyed.is_empty());
        assert!(!atk.board.get(0).unwrap().as_creature().unwrap().attacking);
    }

    #[test]
    fn test_trade_deals_no_player_damage() {
        // 4/2 into a 2/3: the blocker dies and so does the attacker
        let mut atk = PlayerZones::new();
        let mut def = PlayerZones::new();
        atk.board.push(attacker("Raider", 4, 2));
        def.board.push(blocker("Wall", 2, 3, 0));

        let report = resolve_combat(&mut atk, &mut def);
        assert_eq!(report.damage_to_player, 0);
        assert_eq!(report.attackers_destroyed.as_slice(), &[0]);
        assert_eq!(report.blockers_destroyed.as_slice(), &[0]);
        assert!(atk.board.is_empty());
        assert!(def.board.is_empty());
        assert_eq!(atk.graveyard.len(), 1);
        assert_eq!(def.graveyard.len(), 1);
    }

    #[test]
    fn test_trample_over_small_blocker() {
        let mut atk = PlayerZones::new();
        let mut def = PlayerZones::new();
        atk.board.push(attacker("Wurm", 6, 4));
        def.board.push(blocker("Goblin", 1, 1, 0));

        let report = resolve_combat(&mut atk, &mut def);
        assert_eq!(report.damage_to_player, 5);
        assert_eq!(report.blockers_destroyed.as_slice(), &[0]);
        assert_eq!(atk.board.len(), 1);
    }

    #[test]
    fn test_blocker_absorbs_attack() {
        let mut atk = PlayerZones::new();
        let mut def = PlayerZones::new();
        atk.board.push(attacker("Bear", 2, 2));
        def.board.push(blocker("Wall", 0, 5, 0));

        let report = resolve_combat(&mut atk, &mut def);
        assert_eq!(report.damage_to_player, 0);
        assert!(report.attackers_destroyed.is_empty());
        assert!(report.blockers_destroyed.is_empty());
        assert_eq!(def.board.get(0).unwrap().as_creature().unwrap().defending, None);
    }

    #[test]
    fn test_removal_keeps_other_creatures() {
        // Two attackers die, the one between them survives
        let mut atk = PlayerZones::new();
        let mut def = PlayerZones::new();
        atk.board.push(attacker("A", 1, 1));
        atk.board.push(attacker("B", 2, 2));
        atk.board.push(attacker("C", 1, 1));
        def.board.push(blocker("X", 3, 3, 0));
        def.board.push(blocker("Y", 3, 3, 2));

        let report = resolve_combat(&mut atk, &mut def);
        assert_eq!(report.attackers_destroyed.as_slice(), &[0, 2]);
        assert_eq!(report.damage_to_player, 2);
        assert_eq!(atk.board.len(), 1);
        assert_eq!(atk.board.get(0).unwrap().name, "B");
        assert_eq!(def.board.len(), 2);
    }

    fn engine_in_combat() -> GameLoop {
        let deck = DeckList::starter().cards();
        let game = GameState::new(GameConfig::default().with_seed(3), deck.clone(), deck).unwrap();
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        let mut engine = GameLoop::new(game).with_logger(logger);
        engine.reset();
        engine.game.stack.clear();
        for id in PlayerId::both() {
            engine.game.player_mut(id).zones.board.clear();
        }
        // FIRST attacks, SECOND defends
        engine.game.turn = PlayerId::SECOND;
        engine.game.block_idx = 0;
        engine
    }

    #[test]
    fn test_block_assignment_and_damage() {
        let mut engine = engine_in_combat();
        let first = engine.game.player_mut(PlayerId::FIRST);
        first.zones.board.push(Card::creature("Idle", 1, 1, 1));
        first.zones.board.push(attacker("Giant", 3, 3));
        engine
            .game
            .player_mut(PlayerId::SECOND)
            .zones
            .board
            .push(Card::creature("Goblin", 1, 1, 1));

        // Non-attacker at index 0 is skipped
        assert_eq!(engine.phase_block(Action::Select(0)), Flow::AwaitUser);
        assert_eq!(engine.game.block_idx, 1);
        let goblin = engine.game.player(PlayerId::SECOND).zones.board.get(0).unwrap();
        assert_eq!(goblin.as_creature().unwrap().defending, Some(1));

        engine.game.stack.clear();
        assert_eq!(engine.phase_block(Action::Enter), Flow::Drain);
        assert_eq!(engine.game.stack.top_phase(), Some(Phase::Block));

        engine.game.stack.clear();
        let before = engine.game.player(PlayerId::SECOND).zones.hand.len();
        assert_eq!(engine.phase_block(Action::Noop), Flow::Drain);
        assert_eq!(engine.game.player(PlayerId::SECOND).health, 18);
        assert_eq!(engine.game.player(PlayerId::SECOND).zones.graveyard.len(), 1);
        assert!(engine.game.player(PlayerId::SECOND).zones.hand.len() >= before);
        assert_eq!(engine.game.turn, PlayerId::FIRST);
        assert_eq!(engine.game.block_idx, 0);
        assert_eq!(engine.game.stack.top_phase(), Some(Phase::Untap));
    }

    #[test]
    fn test_blocker_cannot_switch_attackers() {
        let mut engine = engine_in_combat();
        let first = engine.game.player_mut(PlayerId::FIRST);
        first.zones.board.push(attacker("A", 1, 1));
        first.zones.board.push(attacker("B", 1, 1));
        let second = engine.game.player_mut(PlayerId::SECOND);
        second.zones.board.push(blocker("Wall", 0, 4, 0));
        second.zones.board.push(Card::creature("Spare", 1, 1, 1));
        engine.game.block_idx = 1;

        assert_eq!(engine.phase_block(Action::Select(0)), Flow::AwaitUser);
        assert_eq!(engine.logger().count_category("rejected"), 1);
        let wall = engine.game.player(PlayerId::SECOND).zones.board.get(0).unwrap();
        assert_eq!(wall.as_creature().unwrap().defending, Some(0));
    }

    #[test]
    fn test_tapped_creature_cannot_block() {
        let mut engine = engine_in_combat();
        engine
            .game
            .player_mut(PlayerId::FIRST)
            .zones
            .board
            .push(attacker("A", 1, 1));
        let second = engine.game.player_mut(PlayerId::SECOND);
        let mut tapped = Card::creature("Tired", 1, 1, 1);
        tapped.tap();
        second.zones.board.push(Card::creature("Fresh", 1, 1, 1));
        second.zones.board.push(tapped);

        assert_eq!(engine.phase_block(Action::Select(1)), Flow::AwaitUser);
        assert_eq!(engine.logger().count_category("rejected"), 1);
    }

    #[test]
    fn test_lethal_combat_ends_episode() {
        let mut engine = engine_in_combat();
        engine
            .game
            .player_mut(PlayerId::FIRST)
            .zones
            .board
            .push(attacker("Wurm", 6, 4));
        engine.game.player_mut(PlayerId::SECOND).health = 5;

        match engine.phase_block(Action::Noop) {
            Flow::GameOver(result) => {
                assert_eq!(result.winner, PlayerId::FIRST);
                assert_eq!(result.reason, GameEndReason::PlayerDeath);
            }
            other => panic!("expected game over, got {other:?}"),
        }
    }
}
