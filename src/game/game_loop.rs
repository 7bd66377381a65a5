//! Game loop implementation
//!
//! `step` pops stack items until a phase handler asks for a fresh action.
//! Phase items run their handler with the current action; effect items
//! resolve immediately. After the first item, every further handler in the
//! same call sees a synthesized no-op.

use crate::core::{EffectKind, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::stack::{PendingEffect, StackItem};
use crate::game::{Action, GameLogger, GameState, Phase};
use crate::zones::{DrawOutcome, ZoneKind};
use serde::{Deserialize, Serialize};

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only episode outcomes
    Minimal = 1,
    /// Normal - rejections and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - every phase entry and state change
    Verbose = 3,
}

/// Reason an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// The loser's health dropped to 0 or below
    PlayerDeath,
    /// The loser had to draw from an empty deck
    Decking,
}

/// Outcome of a finished episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub reason: GameEndReason,
    /// Untap steps played before the end
    pub turns: u32,
}

impl GameResult {
    pub fn loser(&self) -> PlayerId {
        self.winner.other()
    }
}

/// What `step_with_info` reports back to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub awaiting_user: bool,
    /// Set when this step ended an episode; the game has already been reset
    pub episode: Option<GameResult>,
}

/// What a handler tells the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Return to the driver for a new action
    AwaitUser,
    /// Keep popping with a no-op action
    Drain,
    /// Episode over; reset and return
    GameOver(GameResult),
}

/// Owns a game and drives its effect stack
#[derive(Debug, Clone)]
pub struct GameLoop {
    /// The game state
    pub game: GameState,
    pub(crate) logger: GameLogger,
    last_result: Option<GameResult>,
    episodes_completed: u32,
    steps_taken: u64,
}

impl GameLoop {
    /// Wrap a game without dealing; call `reset` before the first `step`
    pub fn new(game: GameState) -> Self {
        GameLoop {
            game,
            logger: GameLogger::new(),
            last_result: None,
            episodes_completed: 0,
            steps_taken: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub(crate) fn with_episodes_completed(mut self, episodes: u32) -> Self {
        self.episodes_completed = episodes;
        self
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    pub fn episodes_completed(&self) -> u32 {
        self.episodes_completed
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Phase on top of the stack, for labeling
    pub fn current_phase(&self) -> Option<Phase> {
        self.game.stack.top_phase()
    }

    /// Player the next action belongs to
    pub fn acting_player(&self) -> PlayerId {
        match self.game.stack.top_phase() {
            Some(Phase::Priority) => self.game.priority,
            Some(Phase::Target(pending)) => pending.controller,
            _ => self.game.turn,
        }
    }

    /// Read-only view for `player`
    pub fn view(&self, player: PlayerId) -> GameStateView<'_> {
        GameStateView::new(&self.game, player)
    }

    /// Start a new episode: fresh zones and health, shuffled decks, opening
    /// hands, then drain to the first decision point.
    pub fn reset(&mut self) {
        self.game.restart();
        log_if_verbose!(
            self,
            "episode",
            "New episode, {} starts",
            self.game.turn.other()
        );
        self.drain(Action::Noop);
    }

    /// Apply one action; returns true once the engine awaits the next one
    pub fn step(&mut self, action: Action) -> bool {
        self.step_with_info(action).awaiting_user
    }

    /// `step` taking a raw action index
    pub fn step_index(&mut self, index: u8) -> bool {
        self.step(Action::from_index(index))
    }

    pub fn step_with_info(&mut self, action: Action) -> StepInfo {
        self.steps_taken += 1;
        log_if_verbose!(
            self,
            "step",
            "Turn: {}, Priority: {}, Action: {}",
            self.game.turn,
            self.game.priority,
            action
        );
        self.drain(action)
    }

    fn drain(&mut self, action: Action) -> StepInfo {
        let mut action = action;
        loop {
            let item = self.game.stack.pop();

            let flow = match item {
                StackItem::Phase(phase) => self.run_phase(phase, action),
                StackItem::Effect(effect) => self.resolve_effect(effect),
            };

            match flow {
                Flow::AwaitUser => {
                    if self.should_auto_pass() {
                        action = Action::Enter;
                        continue;
                    }
                    return StepInfo {
                        awaiting_user: true,
                        episode: None,
                    };
                }
                Flow::Drain => action = Action::Noop,
                Flow::GameOver(result) => {
                    self.finish_episode(result);
                    self.reset();
                    return StepInfo {
                        awaiting_user: true,
                        episode: Some(result),
                    };
                }
            }
        }
    }

    /// A priority window held by a non-participating player passes itself
    fn should_auto_pass(&self) -> bool {
        self.game.stack.top_phase() == Some(Phase::Priority)
            && !self.game.player(self.game.priority).participate_in_priority
    }

    pub(crate) fn run_phase(&mut self, phase: Phase, action: Action) -> Flow {
        log_if_verbose!(self, "phase", "PHASE_{}", phase.name().to_uppercase());
        match phase {
            Phase::Untap => self.phase_untap(),
            Phase::Upkeep => self.phase_upkeep(),
            Phase::Draw => self.phase_draw(),
            Phase::Play => self.phase_play(action),
            Phase::Attack => self.phase_attack(action),
            Phase::Block => self.phase_block(action),
            Phase::Priority => self.phase_priority(action),
            Phase::Target(pending) => self.phase_target(pending, action),
        }
    }

    pub(crate) fn resolve_effect(&mut self, effect: PendingEffect) -> Flow {
        log_if_verbose!(
            self,
            "effect",
            "Resolving for {}: {}",
            effect.controller,
            effect.kind.describe()
        );
        match effect.kind {
            EffectKind::None => {}
            EffectKind::DamageCreature(amount) => {
                self.damage_creature(effect.controller.other(), effect.target, amount)
            }
            EffectKind::DrawCard => {
                if let Some(result) = self.draw_or_lose(effect.controller) {
                    return Flow::GameOver(result);
                }
            }
            EffectKind::GainLife(amount) => {
                self.game.player_mut(effect.controller).gain_health(amount);
            }
        }
        Flow::Drain
    }

    fn damage_creature(&mut self, owner: PlayerId, target: usize, amount: i32) {
        let zones = &mut self.game.player_mut(owner).zones;
        let Some(creature) = zones.board.get_mut(target).and_then(|c| c.as_creature_mut()) else {
            self.logger.normal(&format!(
                "Effect fizzles: no creature at {owner} board index {target}"
            ));
            return;
        };

        creature.health -= amount;
        if creature.health <= 0 {
            creature.health = 0;
            zones.move_card(ZoneKind::Board, ZoneKind::Graveyard, target);
            log_if_verbose!(self, "effect", "Creature at index {} destroyed", target);
        }
    }

    /// Draw for `player`; returns the episode result when the deck is empty
    pub(crate) fn draw_or_lose(&mut self, player: PlayerId) -> Option<GameResult> {
        match self.game.draw_card(player) {
            DrawOutcome::Drawn => None,
            DrawOutcome::HandFull => {
                log_if_verbose!(self, "draw", "Hand full, {} skips the draw", player);
                None
            }
            DrawOutcome::DeckEmpty => {
                self.logger.normal(&format!("Deck empty, {player} loses"));
                Some(self.episode_result(player.other(), GameEndReason::Decking))
            }
        }
    }

    pub(crate) fn episode_result(&self, winner: PlayerId, reason: GameEndReason) -> GameResult {
        GameResult {
            winner,
            reason,
            turns: self.game.turn_number,
        }
    }

    fn finish_episode(&mut self, result: GameResult) {
        self.logger.minimal(&format!(
            "{} wins by {:?} after {} turns",
            result.winner, result.reason, result.turns
        ));
        self.last_result = Some(result);
        self.episodes_completed += 1;
    }

    /// Push `phase` back and wait for the next action
    pub(crate) fn await_action(&mut self, phase: Phase) -> Flow {
        self.game.stack.push_phase(phase);
        Flow::AwaitUser
    }

    /// Log a refused action, leave state untouched, and re-poll `phase`
    pub(crate) fn reject(&mut self, phase: Phase, reason: &str) -> Flow {
        self.logger
            .log(VerbosityLevel::Normal, Some("rejected"), &format!("{}: {}", phase.name(), reason));
        self.await_action(phase)
    }

    pub(crate) fn toggle_priority(&mut self, player: PlayerId) {
        let state = self.game.player_mut(player);
        state.participate_in_priority = !state.participate_in_priority;
        let participate = state.participate_in_priority;
        self.logger
            .normal(&format!("{player} participate in priority: {participate}"));
    }

    /// Let controllers play until an episode ends or `max_steps` runs out
    ///
    /// Returns the finished episode, or `None` when the step budget ran out.
    pub fn run_episode(
        &mut self,
        controllers: &mut [Box<dyn PlayerController>; 2],
        max_steps: u64,
    ) -> Option<GameResult> {
        for _ in 0..max_steps {
            let actor = self.acting_player();
            let action = controllers[actor.index()].choose_action(&self.view(actor));
            let info = self.step_with_info(action);
            if let Some(result) = info.episode {
                for id in PlayerId::both() {
                    controllers[id.index()].on_episode_end(id == result.winner);
                }
                return Some(result);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;
    use crate::game::GameConfig;
    use crate::loader::DeckList;

    pub(crate) fn new_loop(seed: u64) -> GameLoop {
        let deck = DeckList::starter().cards();
        let config = GameConfig::default().with_seed(seed);
        let game = GameState::new(config, deck.clone(), deck).unwrap();
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        GameLoop::new(game).with_logger(logger)
    }

    #[test]
    fn test_reset_reaches_a_decision_point() {
        let mut engine = new_loop(5);
        engine.reset();

        let phase = engine.current_phase().unwrap();
        assert!(phase.is_interactive(), "stopped at {phase:?}");
        assert_eq!(engine.game.player(PlayerId::FIRST).health, 20);
        assert_eq!(engine.game.player(PlayerId::SECOND).health, 20);
    }

    #[test]
    fn test_reset_stops_at_upkeep_priority() {
        // Seat 2 participates by default, so the upkeep window always stops
        // with it holding priority
        for seed in 0..8 {
            let mut engine = new_loop(seed);
            engine.reset();
            assert_eq!(engine.current_phase(), Some(Phase::Priority));
            assert_eq!(engine.game.priority, PlayerId::SECOND);
            assert_eq!(engine.game.turn_number, 1);

            let items = engine.game.stack.items();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0], StackItem::Phase(Phase::Draw));
            for id in PlayerId::both() {
                assert_eq!(engine.game.player(id).zones.hand.len(), 5);
            }
        }
    }

    #[test]
    fn test_damage_effect_destroys_creature() {
        let mut engine = new_loop(1);
        engine.reset();
        let board = &mut engine.game.player_mut(PlayerId::SECOND).zones.board;
        board.clear();
        board.push(Card::creature("Goblin", 1, 1, 2));

        let flow = engine.resolve_effect(
            PendingEffect::new(EffectKind::DamageCreature(3), PlayerId::FIRST).with_target(0),
        );
        assert_eq!(flow, Flow::Drain);
        let second = engine.game.player(PlayerId::SECOND);
        assert!(second.zones.board.is_empty());
        let dead = second.zones.graveyard.peek_top().unwrap();
        assert_eq!(dead.as_creature().unwrap().health, 0);
    }

    #[test]
    fn test_damage_effect_fizzles_without_target() {
        let mut engine = new_loop(1);
        engine.reset();
        engine.game.player_mut(PlayerId::SECOND).zones.board.clear();
        let graveyard = engine.game.player(PlayerId::SECOND).zones.graveyard.len();

        engine.resolve_effect(
            PendingEffect::new(EffectKind::DamageCreature(3), PlayerId::FIRST).with_target(4),
        );
        assert_eq!(engine.game.player(PlayerId::SECOND).zones.graveyard.len(), graveyard);
        assert!(engine.logger().logs().iter().any(|l| l.message.contains("fizzles")));
    }

    #[test]
    fn test_draw_effect_on_empty_deck_loses() {
        let mut engine = new_loop(2);
        engine.reset();
        engine.game.player_mut(PlayerId::FIRST).zones.deck.clear();

        let flow = engine.resolve_effect(PendingEffect::new(EffectKind::DrawCard, PlayerId::FIRST));
        match flow {
            Flow::GameOver(result) => {
                assert_eq!(result.winner, PlayerId::SECOND);
                assert_eq!(result.reason, GameEndReason::Decking);
            }
            other => panic!("expected game over, got {other:?}"),
        }
    }

    #[test]
    fn test_gain_life_effect() {
        let mut engine = new_loop(2);
        engine.reset();
        engine.resolve_effect(PendingEffect::new(EffectKind::GainLife(3), PlayerId::SECOND));
        assert_eq!(engine.game.player(PlayerId::SECOND).health, 23);
    }

    #[test]
    fn test_acting_player_follows_priority() {
        let mut engine = new_loop(4);
        engine.reset();
        engine.game.stack.push_phase(Phase::Priority);
        engine.game.priority = engine.game.turn.other();
        assert_eq!(engine.acting_player(), engine.game.turn.other());

        engine.game.stack.push_phase(Phase::Attack);
        assert_eq!(engine.acting_player(), engine.game.turn);
    }

    #[test]
    #[should_panic(expected = "drained")]
    fn test_step_without_reset_panics() {
        let mut engine = new_loop(0);
        engine.step(Action::Noop);
    }
}
