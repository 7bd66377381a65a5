//! Turn phase handlers
//!
//! Each handler runs after its own stack item was popped. To stay active it
//! pushes itself back; to advance it pushes its successor. Priority windows
//! are separate stack items pushed above the phase they guard.

use crate::core::{CardKind, PlayerId, SpellEffect};
use crate::game::game_loop::Flow;
use crate::game::mana_payment::{can_play_card, has_valid_moves, pay_cost};
use crate::game::stack::PendingEffect;
use crate::game::{Action, GameLoop, Phase};
use crate::zones::ZoneKind;

impl GameLoop {
    /// Hand the turn over and refresh the incoming player's permanents
    pub(crate) fn phase_untap(&mut self) -> Flow {
        let incoming = self.game.turn.other();
        self.game.turn = incoming;
        self.game.priority = incoming;
        self.game.priority_passed = false;
        self.game.turn_number += 1;

        let player = self.game.player_mut(incoming);
        player.mana = 0;
        player.land_played = false;
        for card in player.zones.board.iter_mut() {
            card.untap();
        }
        for land in player.zones.lands.iter_mut() {
            land.untap();
        }

        log_if_verbose!(self, "turn", "Turn {}: {}", self.game.turn_number, incoming);
        self.game.stack.push_phase(Phase::Upkeep);
        Flow::Drain
    }

    pub(crate) fn phase_upkeep(&mut self) -> Flow {
        let active = self.game.turn;
        for card in self.game.player_mut(active).zones.board.iter_mut() {
            if let Some(creature) = card.as_creature_mut() {
                creature.summoning_sickness = false;
            }
        }

        self.game.stack.push_phase(Phase::Draw);
        self.game.stack.push_phase(Phase::Priority);
        Flow::Drain
    }

    pub(crate) fn phase_draw(&mut self) -> Flow {
        if let Some(result) = self.draw_or_lose(self.game.turn) {
            return Flow::GameOver(result);
        }

        self.game.stack.push_phase(Phase::Play);
        self.game.stack.push_phase(Phase::Priority);
        Flow::Drain
    }

    /// Main phase: play lands, creatures and spells from hand
    pub(crate) fn phase_play(&mut self, action: Action) -> Flow {
        let active = self.game.turn;
        if !has_valid_moves(&self.game, active) {
            log_if_verbose!(self, "play", "{} has no valid moves", active);
            self.game.stack.push_phase(Phase::Attack);
            return Flow::Drain;
        }

        let idx = match action {
            Action::Noop => return self.await_action(Phase::Play),
            Action::Enter => {
                self.game.stack.push_phase(Phase::Attack);
                return Flow::Drain;
            }
            Action::TogglePriority => {
                self.toggle_priority(active);
                return self.await_action(Phase::Play);
            }
            Action::Select(idx) => idx,
        };

        let hand = &self.game.player(active).zones.hand;
        let Some(card) = hand.get(idx) else {
            let len = hand.len();
            return self.reject(
                Phase::Play,
                &format!("invalid action {idx}, hand has {len} cards"),
            );
        };
        if !can_play_card(&self.game, active, card) {
            let name = card.name.clone();
            return self.reject(Phase::Play, &format!("condition for playing {name} not met"));
        }
        let card = card.clone();

        let player = self.game.player_mut(active);
        if !pay_cost(player, card.cost) {
            return self.reject(Phase::Play, &format!("not enough mana for {}", card.name));
        }

        self.logger.normal(&format!("{active} plays {card}"));
        match card.kind {
            CardKind::Land => {
                player.zones.move_card(ZoneKind::Hand, ZoneKind::Lands, idx);
                player.land_played = true;
                self.await_action(Phase::Play)
            }
            CardKind::Creature(state) => {
                player.zones.move_card(ZoneKind::Hand, ZoneKind::Board, idx);
                self.game.stack.push_phase(Phase::Play);
                self.game
                    .stack
                    .push_effect(PendingEffect::new(state.effect, active));
                Flow::Drain
            }
            CardKind::Instant(spell) | CardKind::Sorcery(spell) => {
                player.zones.move_card(ZoneKind::Hand, ZoneKind::Graveyard, idx);
                self.game.stack.push_phase(Phase::Play);
                self.cast_spell(active, spell);
                Flow::Drain
            }
        }
    }

    /// Queue a spell's effect behind a priority window, or a target choice
    /// first when it needs one
    pub(crate) fn cast_spell(&mut self, caster: PlayerId, spell: SpellEffect) {
        let pending = PendingEffect::new(spell.effect, caster);
        if spell.needs_target() {
            self.game.stack.push_phase(Phase::Target(pending));
        } else {
            self.game.stack.push_effect(pending);
            self.game.stack.push_phase(Phase::Priority);
        }
    }

    /// Declare attackers by toggling creatures, Enter to confirm
    pub(crate) fn phase_attack(&mut self, action: Action) -> Flow {
        let active = self.game.turn;
        let idx = match action {
            Action::Noop => return self.await_action(Phase::Attack),
            Action::Enter => {
                log_if_verbose!(self, "combat", "{} confirms attackers", active);
                self.game.turn = active.other();
                self.game.block_idx = 0;
                self.game.stack.push_phase(Phase::Block);
                return Flow::Drain;
            }
            Action::TogglePriority => {
                return self.reject(Phase::Attack, "priority cannot be toggled while attacking")
            }
            Action::Select(idx) => idx,
        };

        let board = &mut self.game.player_mut(active).zones.board;
        let len = board.len();
        let Some(card) = board.get_mut(idx) else {
            return self.reject(Phase::Attack, &format!("invalid action {idx}, board has {len} cards"));
        };
        let tapped = card.tapped;
        let Some(creature) = card.as_creature_mut() else {
            return self.reject(Phase::Attack, "not a creature");
        };
        if creature.summoning_sickness {
            return self.reject(Phase::Attack, "creature has summoning sickness");
        }
        if tapped && !creature.attacking {
            return self.reject(Phase::Attack, "creature is tapped");
        }

        creature.attacking = !creature.attacking;
        let attacking = creature.attacking;
        card.tapped = attacking;
        log_if_verbose!(self, "combat", "Creature {} attacking: {}", idx, attacking);
        self.await_action(Phase::Attack)
    }

    /// Choose a creature on the opposing board for a targeted spell
    pub(crate) fn phase_target(&mut self, pending: PendingEffect, action: Action) -> Flow {
        let phase = Phase::Target(pending);
        let opponent = pending.controller.other();

        // Nothing to choose from: resolve against index 0 and let it fizzle
        if !self.game.player(opponent).has_creature() {
            log_if_verbose!(self, "target", "No legal target for {}", pending.kind.describe());
            self.game.stack.push_effect(pending.with_target(0));
            self.game.stack.push_phase(Phase::Priority);
            return Flow::Drain;
        }

        let target = match action {
            Action::Noop => return self.await_action(phase),
            Action::Enter => 0,
            Action::Select(idx) => idx,
            Action::TogglePriority => {
                return self.reject(phase, "priority cannot be toggled while targeting")
            }
        };

        let board = &self.game.player(opponent).zones.board;
        if !board.get(target).is_some_and(|card| card.is_creature()) {
            let len = board.len();
            return self.reject(phase, &format!("invalid target {target}, board has {len} cards"));
        }

        log_if_verbose!(self, "target", "{} targets creature {}", pending.controller, target);
        self.game.stack.push_effect(pending.with_target(target));
        self.game.stack.push_phase(Phase::Priority);
        Flow::Drain
    }
}
