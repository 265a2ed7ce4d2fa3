//! Board construction input and the scenario file format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CoreError, Result};

/// Opaque owner of a cheer or boo marker: the index of the player in
/// [`GameStateInput::players`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerTag(pub u8);

impl PlayerTag {
    /// Owner of a marker whose player is not listed.
    pub const ANONYMOUS: PlayerTag = PlayerTag(u8::MAX);
}

/// A board as the user describes it. Positions are kept signed so that bad
/// input can be reported instead of silently wrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateInput {
    /// Player names, in turn order.
    #[serde(default)]
    pub players: Vec<String>,
    /// Stacks by space, bottom to top.
    pub camels: BTreeMap<i32, Vec<Color>>,
    /// Cheer markers by space, to player name.
    #[serde(default)]
    pub cheers: BTreeMap<i32, String>,
    /// Boo markers by space, to player name.
    #[serde(default)]
    pub boos: BTreeMap<i32, String>,
}

impl GameStateInput {
    pub fn from_camels(camels: impl IntoIterator<Item = (i32, Vec<Color>)>) -> Self {
        Self { camels: camels.into_iter().collect(), ..Self::default() }
    }

    pub fn with_cheers(mut self, positions: impl IntoIterator<Item = i32>) -> Self {
        self.cheers.extend(positions.into_iter().map(|p| (p, String::new())));
        self
    }

    pub fn with_boos(mut self, positions: impl IntoIterator<Item = i32>) -> Self {
        self.boos.extend(positions.into_iter().map(|p| (p, String::new())));
        self
    }

    pub fn player_tag(&self, name: &str) -> PlayerTag {
        self.players
            .iter()
            .position(|p| p == name)
            .and_then(|i| u8::try_from(i).ok())
            .map(PlayerTag)
            .unwrap_or(PlayerTag::ANONYMOUS)
    }
}

/// A board plus the dice left in the pyramid, as read from a JSON file.
///
/// ```json
/// {
///   "board": {
///     "players": ["ann"],
///     "camels": { "0": ["Blue", "Green", "Red", "Yellow", "Purple"], "5": ["White", "Black"] },
///     "boos": { "3": "ann" }
///   },
///   "dice": ["Red", "Blue", "Black"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub board: GameStateInput,
    /// Dice still in the pyramid (Black is the grey die). `None` means a fresh leg.
    #[serde(default)]
    pub dice: Option<Vec<Color>>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Scenario> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate_dice()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Scenario> {
        let json = fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidParameter(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// The pyramid itself trusts its caller; files do not get that trust.
    fn validate_dice(&self) -> Result<()> {
        let Some(dice) = &self.dice else {
            return Ok(());
        };
        if dice.is_empty() || dice.len() > 6 {
            return Err(CoreError::InvalidParameter(format!(
                "die pyramid holds 1 to 6 dice, got {}",
                dice.len()
            )));
        }
        if dice.contains(&Color::White) {
            return Err(CoreError::InvalidParameter(
                "White has no die; use Black for the grey die".to_string(),
            ));
        }
        for (i, c) in dice.iter().enumerate() {
            if dice[..i].contains(c) {
                return Err(CoreError::InvalidParameter(format!("{c} die appears twice")));
            }
        }
        Ok(())
    }

    /// The board the command-line tool starts from when no file is given.
    pub fn default_opening() -> Scenario {
        Scenario {
            board: GameStateInput::from_camels([
                (0, vec![Color::Blue, Color::Green, Color::Red, Color::Yellow, Color::Purple]),
                (5, vec![Color::White, Color::Black]),
            ]),
            dice: None,
        }
    }
}
