//! Deriving the ranking from the board.

use super::{Board, Position, Ranking, UndoableMove};
use crate::color::{Color, NUM_CAMELS, NUM_RACING_CAMELS};

/// Where the camels carried over the finish line by the game-ending move are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarriedRank {
    /// A crazy camel crossed backwards: everyone it carried is least advanced.
    Last,
    /// A racing camel crossed: its whole stack is most advanced.
    First,
}

impl Board {
    pub(crate) fn compute_ranking(&mut self) {
        let game_ending_move = if self.game_over {
            self.leg_moves_index.checked_sub(1).and_then(|i| self.leg_moves[i])
        } else {
            None
        };
        self.ranking = match game_ending_move {
            Some(mv) => self.ranking_game_over(mv),
            None => self.ranking_with_carried(&[], CarriedRank::First),
        };
    }

    fn ranking_game_over(&self, mv: UndoableMove) -> Ranking {
        let mut carried = [Color::Green; NUM_RACING_CAMELS];
        let mut len = 0;
        for c in self.run(mv.stack_bottom, mv.stack_top).filter(|c| !c.is_crazy()) {
            carried[len] = c;
            len += 1;
        }
        let side =
            if mv.stack_bottom.is_crazy() { CarriedRank::Last } else { CarriedRank::First };
        self.ranking_with_carried(&carried[..len], side)
    }

    /// Ranks the `carried` camels (bottom to top) as a block at one end and
    /// everybody else by walking the board from the start line.
    fn ranking_with_carried(&self, carried: &[Color], side: CarriedRank) -> Ranking {
        let mut excluded = [false; NUM_CAMELS];
        for c in carried {
            excluded[c.index()] = true;
        }

        let mut ranking = [Color::Green; NUM_RACING_CAMELS];
        let mut rank = 0;
        let mut place = |c: Color| {
            ranking[rank] = c;
            rank += 1;
        };

        if side == CarriedRank::Last {
            carried.iter().copied().for_each(&mut place);
        }
        for p in Position::all() {
            self.stack(p)
                .filter(|c| !c.is_crazy() && !excluded[c.index()])
                .for_each(&mut place);
        }
        if side == CarriedRank::First {
            carried.iter().copied().for_each(&mut place);
        }

        debug_assert_eq!(rank, NUM_RACING_CAMELS, "ranking must hold every racing camel");
        ranking
    }
}
