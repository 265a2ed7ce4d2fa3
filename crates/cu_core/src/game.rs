//! A game in progress: the board plus the dice left in the leg.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::board::Board;
use crate::color::Color;
use crate::dice::{DiePyramid, MAX_ROLL_VALUE};
use crate::error::{BoardError, CoreError, Result};
use crate::input::{GameStateInput, Scenario};
use crate::moves::{Move, MoveType};

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) players: Vec<String>,
    pub(crate) board: Board,
    pub(crate) dice: DiePyramid,
}

impl Game {
    /// Builds a game from a validated board and the dice still in the pyramid.
    pub fn new(input: &GameStateInput, dice: DiePyramid) -> std::result::Result<Game, BoardError> {
        let board = Board::new(input, dice.remaining_rolls())?;
        Ok(Game { players: input.players.clone(), board, dice })
    }

    /// Builds a game with a pyramid seeded from `seed`.
    pub fn from_scenario(scenario: &Scenario, seed: u64) -> Result<Game> {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let dice = match &scenario.dice {
            Some(dice) => DiePyramid::with_dice(rng, dice.clone()),
            None => DiePyramid::new(rng),
        };
        let game = Game::new(&scenario.board, dice)?;
        info!(
            "game loaded: {} players, {} rolls left in the leg, seed {seed}",
            game.players.len(),
            game.dice.remaining_rolls()
        );
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dice(&self) -> &DiePyramid {
        &self.dice
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn is_leg_over(&self) -> bool {
        self.board.is_leg_over()
    }

    /// Plays a move. Only die rolls change the board; the other move types
    /// are placeholders.
    pub fn play(&mut self, mv: &Move) -> Result<()> {
        match mv.move_type {
            MoveType::RollDie => {
                if self.is_leg_over() {
                    return Err(CoreError::InvalidParameter("the leg is over".to_string()));
                }
                let Some(roll) = mv.die_roll else {
                    return Err(CoreError::InvalidParameter("die roll move without a roll".to_string()));
                };
                if !(1..=MAX_ROLL_VALUE).contains(&roll.value) {
                    return Err(CoreError::InvalidParameter(format!("invalid roll value {}", roll.value)));
                }
                let die = if roll.color.is_crazy() { Color::GREY_DIE } else { roll.color };
                self.dice.take_die(die)?;
                self.board.apply(roll);
                Ok(())
            }
            other => Err(CoreError::InvalidParameter(format!("{other:?} moves are not supported"))),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.players.is_empty() {
            writeln!(f, "Players: {}", self.players.join(", "))?;
        }
        writeln!(f, "Rolls left in leg: {}", self.dice.remaining_rolls())?;
        write!(f, "{}", self.board)
    }
}
