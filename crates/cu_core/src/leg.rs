//! Exact leg outcome enumeration.
//!
//! Every way the remaining dice could come out of the pyramid is explored
//! depth first: at each depth the search tries every die not yet used on the
//! branch, in pyramid order, and every face of that die. A branch stops when
//! the game ends or when the last die that will be rolled this leg has been
//! rolled. The die left in the pyramid is never rolled.
//!
//! Branches are not equally likely as they stand: a branch cut short by the
//! end of the game stands for all the orders and faces of the dice it never
//! rolled, and a racing die stands for both colours the grey die could have
//! shown in its place. The terminal weight
//!
//! ```text
//! W = 2^j * (k + 1)! * 6^k
//! ```
//!
//! with `k` the number of rolls the branch skipped and `j` the number of
//! racing dice it rolled (depth + 1 without the grey die, depth with it)
//! makes the weights add up to `m! * 6^(m - 1)` for a pyramid of `m` dice,
//! the number of equally likely ways to roll it.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::board::{Board, NUM_MOVES_PER_LEG};
use crate::color::{Color, NUM_CAMELS};
use crate::dice::{DieRoll, GREY_DIE_FACES, MAX_ROLL_VALUE};
use crate::distribution::RankingDistribution;
use crate::game::Game;

const MAX_DICE: usize = NUM_MOVES_PER_LEG + 1;

/// Terminal weights by depth, number of rolls and grey die usage. Built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegWeights {
    /// `(k + 1)! * 6^k` by `k`, the rolls a branch skipped.
    remaining: [u64; MAX_DICE],
    powers_of_two: [u64; MAX_DICE],
}

static LEG_WEIGHTS: Lazy<LegWeights> = Lazy::new(LegWeights::build);

impl LegWeights {
    fn build() -> Self {
        let mut remaining = [1u64; MAX_DICE];
        let mut powers_of_two = [1u64; MAX_DICE];
        for k in 1..MAX_DICE {
            remaining[k] = remaining[k - 1] * (k as u64 + 1) * 6;
            powers_of_two[k] = powers_of_two[k - 1] * 2;
        }
        Self { remaining, powers_of_two }
    }

    pub fn get() -> &'static LegWeights {
        &LEG_WEIGHTS
    }

    /// Weight of a branch ending at `depth` (0-based) out of `rolls` rolls.
    #[inline]
    pub fn weight(&self, depth: usize, rolls: usize, grey_used: bool) -> u64 {
        let j = if grey_used { depth } else { depth + 1 };
        self.powers_of_two[j] * self.remaining[rolls - depth - 1]
    }

    /// Sum of every terminal weight for a pyramid of `dice` dice.
    pub fn total(&self, dice: usize) -> u64 {
        dice.checked_sub(1).map_or(1, |k| self.remaining[k])
    }
}

/// Search state shared down one branch.
struct LegSearch<'a> {
    board: &'a mut Board,
    dice: &'a [Color],
    rolls: usize,
    used: [bool; NUM_CAMELS],
    weights: &'static LegWeights,
    terminals: u64,
    distribution: RankingDistribution,
}

impl LegSearch<'_> {
    fn explore(&mut self, depth: usize) {
        for &die in self.dice {
            if self.used[die.index()] {
                continue;
            }
            self.used[die.index()] = true;
            let faces = if die == Color::GREY_DIE { GREY_DIE_FACES } else { MAX_ROLL_VALUE };
            for face in 1..=faces {
                self.board.apply(DieRoll::from_face(die, face));
                if self.board.is_game_over() || depth == self.rolls - 1 {
                    let w =
                        self.weights.weight(depth, self.rolls, self.used[Color::GREY_DIE.index()]);
                    self.distribution.record_weighted_ranking(self.board.ranking(), w);
                    self.terminals += 1;
                } else {
                    self.explore(depth + 1);
                }
                self.board.undo_last();
            }
            self.used[die.index()] = false;
        }
    }
}

/// Enumerates every outcome of the rest of the leg. The board is left as it
/// was found.
pub fn leg_ranking_distribution(board: &mut Board, dice: &[Color], rolls: usize) -> RankingDistribution {
    let mut distribution = RankingDistribution::new();
    if rolls == 0 || board.is_leg_over() {
        // Nothing left to roll, or the game already ended: only the current
        // board remains.
        distribution.record_ranking(board.ranking());
        return distribution;
    }
    debug!("enumerating leg: {rolls} rolls from {} dice {:?}", dice.len(), dice);
    let mut search = LegSearch {
        board,
        dice,
        rolls,
        used: [false; NUM_CAMELS],
        weights: LegWeights::get(),
        terminals: 0,
        distribution,
    };
    search.explore(0);
    debug!(
        "leg enumerated: {} terminal branches, total weight {}",
        search.terminals, search.distribution.total
    );
    search.distribution
}

impl Game {
    /// Computes all the possible outcomes for the current leg.
    pub fn compute_leg_ranking_distribution(&mut self) -> RankingDistribution {
        let rolls = self.dice.remaining_rolls();
        let dice = self.dice.remaining_dice().to_vec();
        leg_ranking_distribution(&mut self.board, &dice, rolls)
    }
}
