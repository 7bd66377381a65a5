//! TCG turn engine - Main Binary
//!
//! Runs self-play episodes between built-in controllers.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tcg_engine::{
    core::PlayerId,
    game::{
        controller::scripted, ControllerKind, GameConfig, GameLogger, GameLoop, GameSnapshot,
        OutputFormat, PlayerController, VerbosityLevel,
    },
    loader::{DeckList, GameInitializer},
    tournament::{run_tourney, TourneyConfig, DEFAULT_MAX_STEPS},
    Result, TcgError,
};

/// Controller type for each seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Always presses Enter
    Zero,
    /// Uniform random action indices
    Random,
    /// Fixed script of action indices (requires --pN-fixed-inputs)
    Fixed,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "tcg")]
#[command(about = "Stack-driven trading card game turn engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes between two controllers
    Play {
        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "random")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,

        /// Fixed script for player 1 (space or comma separated indices, e.g., "1 1 10")
        #[arg(long, value_name = "ACTIONS")]
        p1_fixed_inputs: Option<String>,

        /// Fixed script for player 2 (space or comma separated indices, e.g., "1 1 10")
        #[arg(long, value_name = "ACTIONS")]
        p2_fixed_inputs: Option<String>,

        /// Set random seed for deterministic runs
        #[arg(long)]
        seed: Option<u64>,

        /// Number of episodes to play
        #[arg(long, default_value_t = 1)]
        episodes: u32,

        /// Step cap per episode
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u64,

        /// Player 1 takes part in priority windows instead of auto-passing
        #[arg(long)]
        p1_priority: bool,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Emit log lines as JSON objects
        #[arg(long)]
        json: bool,

        /// Stop after this many steps and save a snapshot
        #[arg(long, value_name = "STEPS")]
        stop_after: Option<u64>,

        /// Output file for game snapshot
        #[arg(long, default_value = "game.snapshot")]
        snapshot_output: PathBuf,

        /// Load and resume game from snapshot file
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        start_from: Option<PathBuf>,
    },

    /// Run many episodes in parallel and print statistics
    Tourney {
        /// Number of episodes
        #[arg(long, default_value_t = 1000)]
        games: usize,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "random")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,

        /// Master seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Step cap per episode
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u64,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            p1,
            p2,
            p1_fixed_inputs,
            p2_fixed_inputs,
            seed,
            episodes,
            max_steps,
            p1_priority,
            verbosity,
            json,
            stop_after,
            snapshot_output,
            start_from,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let mut logger = GameLogger::with_verbosity(verbosity.into());
            if json {
                logger.set_output_format(OutputFormat::Json);
            }

            let specs = [
                (p1, p1_fixed_inputs, PlayerId::FIRST),
                (p2, p2_fixed_inputs, PlayerId::SECOND),
            ];
            let (mut engine, mut controllers) = match start_from {
                Some(path) => {
                    let snapshot = GameSnapshot::load_from_file(&path)?;
                    println!("Resuming from {}", path.display());
                    let states = [
                        snapshot.p1_controller_state.clone(),
                        snapshot.p2_controller_state.clone(),
                    ];
                    let [first, second] = specs;
                    let [state1, state2] = states;
                    let controllers = [
                        restore_or_build(state1, first, seed)?,
                        restore_or_build(state2, second, seed)?,
                    ];
                    (snapshot.into_game_loop().with_logger(logger), controllers)
                }
                None => {
                    println!("Using seed: {seed}");
                    let config = GameConfig::default()
                        .with_seed(seed)
                        .with_priority_participation(PlayerId::FIRST, p1_priority);
                    let engine = GameInitializer::new(config)
                        .with_logger(logger)
                        .init_game(&DeckList::starter(), &DeckList::starter())?;
                    let [first, second] = specs;
                    let controllers = [
                        build_controller(first, seed)?,
                        build_controller(second, seed)?,
                    ];
                    (engine, controllers)
                }
            };

            match stop_after {
                Some(limit) => stop_and_save(&mut engine, &mut controllers, limit, &snapshot_output),
                None => {
                    run_episodes(&mut engine, &mut controllers, episodes, max_steps);
                    Ok(())
                }
            }
        }

        Commands::Tourney {
            games,
            p1,
            p2,
            seed,
            max_steps,
            json,
        } => {
            let config = TourneyConfig::new(games, tourney_kind(p1)?, tourney_kind(p2)?)
                .with_seed(seed)
                .with_max_steps(max_steps);
            println!("Running {games} games: P1={p1:?}, P2={p2:?}, seed {seed}\n");
            let stats = run_tourney(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                stats.print_summary();
            }
            Ok(())
        }
    }
}

type SeatSpec = (ControllerType, Option<String>, PlayerId);

fn build_controller(spec: SeatSpec, seed: u64) -> Result<Box<dyn PlayerController>> {
    let (kind, script, player) = spec;
    match kind {
        ControllerType::Zero => Ok(ControllerKind::Zero.build(player, seed)),
        ControllerType::Random => {
            let seat_seed = seed.wrapping_add(player.index() as u64 + 1);
            Ok(ControllerKind::Random.build(player, seat_seed))
        }
        ControllerType::Fixed => {
            let script = script.ok_or_else(|| {
                TcgError::InvalidConfig(format!("fixed controller for {player} needs a script"))
            })?;
            scripted(player, &script)
        }
    }
}

fn restore_or_build(
    state: Option<tcg_engine::game::ControllerState>,
    spec: SeatSpec,
    seed: u64,
) -> Result<Box<dyn PlayerController>> {
    match state {
        Some(state) => Ok(state.into_controller()),
        None => build_controller(spec, seed),
    }
}

fn tourney_kind(kind: ControllerType) -> Result<ControllerKind> {
    match kind {
        ControllerType::Zero => Ok(ControllerKind::Zero),
        ControllerType::Random => Ok(ControllerKind::Random),
        ControllerType::Fixed => Err(TcgError::InvalidConfig(
            "fixed scripts are not supported in tournaments".to_string(),
        )),
    }
}

fn run_episodes(
    engine: &mut GameLoop,
    controllers: &mut [Box<dyn PlayerController>; 2],
    episodes: u32,
    max_steps: u64,
) {
    for episode in 1..=episodes {
        match engine.run_episode(controllers, max_steps) {
            Some(result) => println!(
                "Episode {episode}: {} wins by {:?} on turn {}",
                result.winner, result.reason, result.turns
            ),
            None => {
                println!("Episode {episode}: no result after {max_steps} steps");
                engine.reset();
            }
        }
    }
}

fn stop_and_save(
    engine: &mut GameLoop,
    controllers: &mut [Box<dyn PlayerController>; 2],
    limit: u64,
    output: &Path,
) -> Result<()> {
    for _ in 0..limit {
        let actor = engine.acting_player();
        let action = controllers[actor.index()].choose_action(&engine.view(actor));
        if let Some(result) = engine.step_with_info(action).episode {
            println!("{} wins by {:?} on turn {}", result.winner, result.reason, result.turns);
        }
    }

    let snapshot = GameSnapshot::capture(engine).with_controller_state(
        controllers[0].snapshot_state(),
        controllers[1].snapshot_state(),
    );
    snapshot.save_to_file(output)?;
    println!("Snapshot saved to {}", output.display());
    Ok(())
}
