//! # cu_core - Camel race leg outcome engine
//!
//! Computes how likely each racing camel is to finish a leg in each rank.
//!
//! ## Features
//! - Exact enumeration of every remaining die draw and roll (no sampling)
//! - Monte-Carlo estimator for cross-checking, serial or rayon-parallel
//! - Reversible move engine on an index-linked stack arena
//! - Deterministic randomness (same seed = same result)
//!
//! ```
//! use cu_core::{Color, DiePyramid, Game, GameStateInput};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let input = GameStateInput::from_camels([
//!     (1, vec![Color::Yellow, Color::Green, Color::Red, Color::Blue, Color::Purple]),
//!     (13, vec![Color::Black, Color::White]),
//! ]);
//! let dice = DiePyramid::with_dice(
//!     ChaCha8Rng::seed_from_u64(7),
//!     vec![Color::Purple, Color::Red, Color::Blue],
//! );
//! let mut game = Game::new(&input, dice).unwrap();
//! let distribution = game.compute_leg_ranking_distribution();
//! assert_eq!(distribution.total, 216);
//! ```

pub mod board;
pub mod color;
pub mod config;
pub mod debug_flags;
pub mod dice;
pub mod distribution;
pub mod error;
pub mod game;
pub mod input;
pub mod leg;
pub mod moves;
pub mod simulate;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{Board, Position, Ranking, BOARD_SIZE, FINISH_POSITION, START_POSITION};
pub use color::{Color, NUM_CAMELS, NUM_RACING_CAMELS};
pub use config::EstimatorConfig;
pub use dice::{DiePyramid, DieRoll, RollValue};
pub use distribution::RankingDistribution;
pub use error::{BoardError, CoreError, DieError, Result};
pub use game::Game;
pub use input::{GameStateInput, PlayerTag, Scenario};
pub use leg::LegWeights;
pub use moves::{Move, MoveType};
