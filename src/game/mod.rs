//! Turn engine: effect stack, phase handlers and the step loop

/// Trace line at Verbose level under `category`, compiled out without the
/// `verbose-logging` feature
macro_rules! log_if_verbose {
    ($self:expr, $category:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.log(
                $crate::game::VerbosityLevel::Verbose,
                Some($category),
                &format!($($arg)*),
            );
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

pub mod actions;
pub mod combat;
pub mod config;
pub mod controller;
pub mod fixed_script_controller;
pub mod game_loop;
pub mod logger;
pub mod mana_payment;
pub mod phase;
pub mod phases;
pub mod priority;
pub mod random_controller;
pub mod snapshot;
pub mod stack;
pub mod state;
pub mod zero_controller;

pub use actions::{Action, ACTION_ENTER, ACTION_NOOP, ACTION_SPACE, ACTION_TOGGLE_PRIORITY};
pub use combat::CombatReport;
pub use config::GameConfig;
pub use controller::{ControllerKind, GameStateView, PlayerController};
pub use fixed_script_controller::FixedScriptController;
pub use game_loop::{GameEndReason, GameLoop, GameResult, StepInfo, VerbosityLevel};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::Phase;
pub use random_controller::RandomController;
pub use snapshot::{ControllerState, GameSnapshot};
pub use stack::{EffectStack, PendingEffect, StackItem, STACK_SIZE};
pub use state::GameState;
pub use zero_controller::ZeroController;
