//! Player moves. Only die rolls are played; the betting and pact moves are
//! listed so that callers can name them.

use serde::{Deserialize, Serialize};

use crate::dice::DieRoll;
use crate::input::PlayerTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    RollDie,
    PlaceCheer,
    PlaceBoo,
    BuyTicket,
    BetOnWinner,
    BetOnLoser,
    MakePact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub move_type: MoveType,
    pub player: Option<PlayerTag>,
    pub die_roll: Option<DieRoll>,
}

impl Move {
    pub fn roll(roll: DieRoll) -> Self {
        Self { move_type: MoveType::RollDie, player: None, die_roll: Some(roll) }
    }

    pub fn placeholder(move_type: MoveType, player: PlayerTag) -> Self {
        Self { move_type, player: Some(player), die_roll: None }
    }
}
