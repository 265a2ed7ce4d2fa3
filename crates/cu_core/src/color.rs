//! Camel colours.
//!
//! Five racing camels move forward; the two crazy camels (Black and White)
//! move backward and never appear in a ranking. Black also names the single
//! grey die in the pyramid, which rolls for either crazy camel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const NUM_CAMELS: usize = 7;
pub const NUM_RACING_CAMELS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Green = 0,
    Yellow = 1,
    Red = 2,
    Blue = 3,
    Purple = 4,
    Black = 5,
    White = 6,
}

impl Color {
    pub const ALL: [Color; NUM_CAMELS] = [
        Color::Green,
        Color::Yellow,
        Color::Red,
        Color::Blue,
        Color::Purple,
        Color::Black,
        Color::White,
    ];

    pub const RACING: [Color; NUM_RACING_CAMELS] =
        [Color::Green, Color::Yellow, Color::Red, Color::Blue, Color::Purple];

    /// Die identity of the grey die, which moves either crazy camel.
    pub const GREY_DIE: Color = Color::Black;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_crazy(self) -> bool {
        self >= Color::Black
    }

    /// The other member of the crazy pair; racing camels map to themselves.
    pub fn other_crazy(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            c => c,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Purple => "Purple",
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown color: {}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" | "g" => Ok(Color::Green),
            "yellow" | "y" => Ok(Color::Yellow),
            "red" | "r" => Ok(Color::Red),
            "blue" | "b" => Ok(Color::Blue),
            "purple" | "p" => Ok(Color::Purple),
            "black" | "bk" | "k" => Ok(Color::Black),
            "white" | "w" => Ok(Color::White),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("g".parse::<Color>(), Ok(Color::Green));
        assert_eq!("YELLOW".parse::<Color>(), Ok(Color::Yellow));
        assert_eq!(" k ".parse::<Color>(), Ok(Color::Black));
        assert_eq!("bk".parse::<Color>(), Ok(Color::Black));
        assert_eq!("w".parse::<Color>(), Ok(Color::White));
        let err = "orange".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), "unknown color: orange");
    }

    #[test]
    fn test_crazy_pair() {
        assert!(Color::Black.is_crazy());
        assert!(Color::White.is_crazy());
        assert!(Color::RACING.iter().all(|c| !c.is_crazy()));
        assert_eq!(Color::Black.other_crazy(), Color::White);
        assert_eq!(Color::White.other_crazy(), Color::Black);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:>6}", Color::Red), "   Red");
        assert_eq!(Color::ALL[Color::Purple.index()], Color::Purple);
    }
}
