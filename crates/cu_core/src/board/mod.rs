//! Board state: the track, the camel stacks and the leg bookkeeping.
//!
//! Camels live in a fixed arena indexed by colour. A stack is a chain of
//! `next` (camel on top) / `prev` (camel below) links inside that arena, and
//! every space remembers the bottom and top camel of its stack. Moving a
//! stack is a constant-time splice of those links.

mod moves;
mod ranking;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color, NUM_CAMELS, NUM_RACING_CAMELS};
use crate::error::BoardError;
use crate::input::{GameStateInput, PlayerTag};

pub const BOARD_SIZE: usize = 16;
pub const NUM_MOVES_PER_LEG: usize = 5;

pub const START_POSITION: Position = Position(0);
pub const FINISH_POSITION: Position = Position(BOARD_SIZE as u8 - 1);

/// Racing camels from last (index 0) to first.
pub type Ranking = [Color; NUM_RACING_CAMELS];

/// A space on the track, 0 (start) to 15 (finish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(u8);

impl Position {
    pub fn new(p: i32) -> Option<Position> {
        if (START_POSITION.value()..=FINISH_POSITION.value()).contains(&p) {
            Some(Position(p as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn value(self) -> i32 {
        self.0 as i32
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps `k` spaces, wrapping around the track.
    #[inline]
    pub fn add(self, k: i32) -> Position {
        Position((self.value() + k).rem_euclid(BOARD_SIZE as i32) as u8)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Position> {
        (0..BOARD_SIZE as u8).map(Position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Camel {
    color: Color,
    position: Option<Position>,
    /// The camel on top of this one.
    next: Option<Color>,
    /// The camel below this one.
    prev: Option<Color>,
    /// Black <-> White.
    other_crazy: Option<Color>,
}

impl Camel {
    fn new(color: Color) -> Self {
        Self {
            color,
            position: None,
            next: None,
            prev: None,
            other_crazy: color.is_crazy().then(|| color.other_crazy()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BoardSpace {
    cheer: Option<PlayerTag>,
    boo: Option<PlayerTag>,
    stack_bottom: Option<Color>,
    stack_top: Option<Color>,
}

/// Enough to put a moved stack back where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndoableMove {
    pub(crate) stack_bottom: Color,
    pub(crate) stack_top: Color,
    pub(crate) src: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    camels: [Camel; NUM_CAMELS],
    spaces: [BoardSpace; BOARD_SIZE],
    ranking: Ranking,
    game_over: bool,
    leg_moves_index: usize,
    leg_moves: [Option<UndoableMove>; NUM_MOVES_PER_LEG],
}

impl Board {
    /// Builds a validated board. `remaining_rolls` tells how many dice are
    /// still to be rolled in the current leg.
    pub fn new(input: &GameStateInput, remaining_rolls: usize) -> Result<Board, BoardError> {
        let mut board = Board {
            camels: Color::ALL.map(Camel::new),
            spaces: [BoardSpace::default(); BOARD_SIZE],
            ranking: Color::RACING,
            game_over: false,
            leg_moves_index: NUM_MOVES_PER_LEG.saturating_sub(remaining_rolls),
            leg_moves: [None; NUM_MOVES_PER_LEG],
        };

        for (&p, colors) in &input.camels {
            if colors.is_empty() {
                continue;
            }
            let pos = Position::new(p).ok_or(BoardError::InvalidPosition { position: p })?;
            let mut prev: Option<Color> = None;
            for &c in colors {
                let camel = &mut board.camels[c.index()];
                if camel.position.is_some() {
                    return Err(BoardError::DuplicateCamel { color: c });
                }
                camel.position = Some(pos);
                camel.prev = prev;
                match prev {
                    None => board.spaces[pos.index()].stack_bottom = Some(c),
                    Some(below) => board.camels[below.index()].next = Some(c),
                }
                board.spaces[pos.index()].stack_top = Some(c);
                prev = Some(c);
            }
        }

        if let Some(missing) = board.camels.iter().find(|c| c.position.is_none()) {
            return Err(BoardError::MissingCamel { color: missing.color });
        }

        for (&p, player) in &input.cheers {
            let space = board.marker_space(p)?;
            if !space.is_empty() {
                return Err(BoardError::OccupiedCheer { position: p });
            }
            space.cheer = Some(input.player_tag(player));
        }
        for (&p, player) in &input.boos {
            let space = board.marker_space(p)?;
            if !space.is_empty() {
                return Err(BoardError::OccupiedBoo { position: p });
            }
            space.boo = Some(input.player_tag(player));
        }

        board.compute_ranking();
        debug!(
            "board ready: leg move {}/{}, ranking {:?}",
            board.leg_moves_index, NUM_MOVES_PER_LEG, board.ranking
        );
        Ok(board)
    }

    /// Markers can go anywhere but the start space.
    fn marker_space(&mut self, p: i32) -> Result<&mut BoardSpace, BoardError> {
        match Position::new(p) {
            Some(pos) if pos != START_POSITION => Ok(&mut self.spaces[pos.index()]),
            _ => Err(BoardError::InvalidPosition { position: p }),
        }
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Moves already made in this leg, counting dice rolled before the board
    /// was built.
    pub fn leg_moves_index(&self) -> usize {
        self.leg_moves_index
    }

    pub fn is_leg_over(&self) -> bool {
        self.game_over || self.leg_moves_index == NUM_MOVES_PER_LEG
    }

    pub fn has_cheer(&self, pos: Position) -> bool {
        self.spaces[pos.index()].cheer.is_some()
    }

    pub fn has_boo(&self, pos: Position) -> bool {
        self.spaces[pos.index()].boo.is_some()
    }

    pub fn cheer_owner(&self, pos: Position) -> Option<PlayerTag> {
        self.spaces[pos.index()].cheer
    }

    pub fn boo_owner(&self, pos: Position) -> Option<PlayerTag> {
        self.spaces[pos.index()].boo
    }

    pub fn position_of(&self, color: Color) -> Option<Position> {
        self.camels[color.index()].position
    }

    /// Camels on `pos`, bottom to top.
    pub fn stack(&self, pos: Position) -> Stack<'_> {
        Stack { board: self, cur: self.spaces[pos.index()].stack_bottom, last: None }
    }

    /// Camels from `bottom` upwards through `top`, following `next` links.
    fn run(&self, bottom: Color, top: Color) -> Stack<'_> {
        Stack { board: self, cur: Some(bottom), last: Some(top) }
    }
}

impl BoardSpace {
    fn is_empty(&self) -> bool {
        self.stack_bottom.is_none() && self.cheer.is_none() && self.boo.is_none()
    }
}

/// Walks a stack from the bottom up.
#[derive(Clone)]
pub struct Stack<'a> {
    board: &'a Board,
    cur: Option<Color>,
    /// Stop after this camel instead of at the top of the stack.
    last: Option<Color>,
}

impl Iterator for Stack<'_> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let c = self.cur?;
        self.cur = if self.last == Some(c) { None } else { self.board.camels[c.index()].next };
        Some(c)
    }
}

/// Reports a broken caller contract on the move engine. Debug builds and
/// `strict_contracts` (on by default) panic. Without the feature a release
/// build logs and skips the operation; a skipped `apply` leaves no log entry,
/// so a later `undo_last` reverts the move before it and the board drifts
/// from the caller's view.
#[track_caller]
pub(crate) fn contract_violation(what: &str) {
    if cfg!(debug_assertions) || cfg!(feature = "strict_contracts") {
        panic!("board contract violated: {what}");
    }
    tracing::error!("board contract violated: {what}");
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for p in Position::all() {
            write!(f, "{:2}: ", p.value() + 1)?;
            for c in self.stack(p) {
                write!(f, "{c} ")?;
            }
            if self.has_cheer(p) {
                write!(f, ">>")?;
            }
            if self.has_boo(p) {
                write!(f, "<<")?;
            }
            writeln!(f)?;
        }
        if self.game_over {
            write!(f, "Game is over! Final ranking (>>): ")?;
        } else {
            write!(f, "Game is in progress. Current ranking (>>): ")?;
        }
        for c in &self.ranking {
            write!(f, "{c} ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Board {
    /// Checks that every stack is a well-formed chain and that each camel sits
    /// in exactly one of them.
    pub(crate) fn assert_consistent(&self) {
        let mut seen = [false; NUM_CAMELS];
        for p in Position::all() {
            let space = &self.spaces[p.index()];
            let mut below: Option<Color> = None;
            let mut cur = space.stack_bottom;
            while let Some(c) = cur {
                let camel = &self.camels[c.index()];
                assert!(!seen[c.index()], "{c} appears twice");
                seen[c.index()] = true;
                assert_eq!(camel.position, Some(p), "{c} has the wrong position");
                assert_eq!(camel.prev, below, "{c} has a broken prev link");
                below = Some(c);
                cur = camel.next;
            }
            assert_eq!(space.stack_top, below, "space {p} has the wrong top");
            assert!(!(space.cheer.is_some() && space.boo.is_some()));
        }
        assert!(seen.iter().all(|&s| s), "some camel is off the board");
    }

    /// Stacks bottom to top, keyed by position, for comparing against inputs.
    pub(crate) fn stacks(&self) -> std::collections::BTreeMap<i32, Vec<Color>> {
        Position::all()
            .map(|p| (p.value(), self.stack(p).collect::<Vec<_>>()))
            .filter(|(_, stack)| !stack.is_empty())
            .collect()
    }
}
