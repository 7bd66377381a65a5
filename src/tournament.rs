//! Tournament mode: many independent episodes in parallel
//!
//! Each episode gets its own engine, controllers and derived seed, so the
//! batch result does not depend on how rayon schedules the work.

use crate::{
    core::PlayerId,
    game::{
        ControllerKind, GameConfig, GameEndReason, GameLogger, GameResult, PlayerController,
        VerbosityLevel,
    },
    loader::{DeckList, GameInitializer},
    Result,
};
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default per-episode step cap
pub const DEFAULT_MAX_STEPS: u64 = 100_000;

#[derive(Debug, Clone)]
pub struct TourneyConfig {
    pub games: usize,
    pub p1: ControllerKind,
    pub p2: ControllerKind,
    /// Master seed; episode seeds are derived from it
    pub seed: u64,
    /// Steps before an episode is abandoned as unfinished
    pub max_steps: u64,
    pub game: GameConfig,
    pub deck1: DeckList,
    pub deck2: DeckList,
}

impl TourneyConfig {
    pub fn new(games: usize, p1: ControllerKind, p2: ControllerKind) -> Self {
        TourneyConfig {
            games,
            p1,
            p2,
            seed: 0,
            max_steps: DEFAULT_MAX_STEPS,
            game: GameConfig::default(),
            deck1: DeckList::starter(),
            deck2: DeckList::starter(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Outcome of a single tournament episode
#[derive(Debug, Clone, Copy)]
struct EpisodeOutcome {
    result: Option<GameResult>,
    steps: u64,
}

/// Aggregated batch statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct TourneyStats {
    pub games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    /// Episodes that hit the step cap
    pub unfinished: usize,
    pub wins_by_decking: usize,
    pub wins_by_damage: usize,
    /// Turns summed over finished episodes
    pub total_turns: u64,
    pub total_steps: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TourneyStats {
    fn record(&mut self, outcome: EpisodeOutcome) {
        self.games += 1;
        self.total_steps += outcome.steps;
        let Some(result) = outcome.result else {
            self.unfinished += 1;
            return;
        };

        if result.winner == PlayerId::FIRST {
            self.p1_wins += 1;
        } else {
            self.p2_wins += 1;
        }
        match result.reason {
            GameEndReason::Decking => self.wins_by_decking += 1,
            GameEndReason::PlayerDeath => self.wins_by_damage += 1,
        }
        self.total_turns += u64::from(result.turns);
    }

    pub fn finished(&self) -> usize {
        self.games - self.unfinished
    }

    pub fn average_turns(&self) -> f64 {
        match self.finished() {
            0 => 0.0,
            n => self.total_turns as f64 / n as f64,
        }
    }

    pub fn steps_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.total_steps as f64 / secs
        } else {
            0.0
        }
    }

    pub fn print_summary(&self) {
        let pct = |n: usize| {
            if self.games == 0 {
                0.0
            } else {
                100.0 * n as f64 / self.games as f64
            }
        };
        println!("=== Tournament Complete ===");
        println!("Total games played: {}", self.games);
        println!("Elapsed time: {:.2}s", self.elapsed.as_secs_f64());
        println!("Steps per second: {:.0}\n", self.steps_per_second());
        println!("P1 wins: {} ({:.1}%)", self.p1_wins, pct(self.p1_wins));
        println!("P2 wins: {} ({:.1}%)", self.p2_wins, pct(self.p2_wins));
        println!("Unfinished: {} ({:.1}%)", self.unfinished, pct(self.unfinished));
        println!(
            "Wins by damage: {}, by decking: {}",
            self.wins_by_damage, self.wins_by_decking
        );
        println!("Average turns: {:.1}", self.average_turns());
    }
}

/// Seed for episode `idx`, spread with the golden-ratio increment
fn episode_seed(master: u64, idx: usize) -> u64 {
    master.wrapping_add((idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn play_episode(config: &TourneyConfig, idx: usize) -> Result<EpisodeOutcome> {
    let game_seed = episode_seed(config.seed, idx);
    let init = GameInitializer::new(config.game.clone().with_seed(game_seed))
        .with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    let mut engine = init.init_game(&config.deck1, &config.deck2)?;

    let mut controllers: [Box<dyn PlayerController>; 2] = [
        config
            .p1
            .build(PlayerId::FIRST, game_seed.wrapping_add(0x1234_5678_9ABC_DEF0)),
        config
            .p2
            .build(PlayerId::SECOND, game_seed.wrapping_add(0xFEDC_BA98_7654_3210)),
    ];
    let result = engine.run_episode(&mut controllers, config.max_steps);
    Ok(EpisodeOutcome {
        result,
        steps: engine.steps_taken(),
    })
}

/// Play `config.games` episodes in parallel and aggregate the results
pub fn run_tourney(config: &TourneyConfig) -> Result<TourneyStats> {
    config.game.validate()?;
    config.deck1.validate(&config.game)?;
    config.deck2.validate(&config.game)?;

    let start = Instant::now();
    let outcomes = (0..config.games)
        .into_par_iter()
        .map(|idx| play_episode(config, idx))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = TourneyStats::default();
    for outcome in outcomes {
        stats.record(outcome);
    }
    stats.elapsed = start.elapsed();
    Ok(stats)
}
