//! Die pyramid: the dice not yet rolled in the current leg.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::DieError;

/// Face value of a movement die (1, 2 or 3).
pub type RollValue = u8;

pub const MAX_ROLL_VALUE: RollValue = 3;

/// Faces of the grey die: three per crazy camel.
pub const GREY_DIE_FACES: u8 = 2 * MAX_ROLL_VALUE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DieRoll {
    pub color: Color,
    pub value: RollValue,
}

impl DieRoll {
    pub fn new(color: Color, value: RollValue) -> Self {
        Self { color, value }
    }

    /// Maps a die face to a roll. The grey die shows Black on faces 1..=3 and
    /// White on faces 4..=6; every other die has faces 1..=3.
    pub fn from_face(die: Color, face: u8) -> Self {
        if die == Color::GREY_DIE && face > MAX_ROLL_VALUE {
            Self::new(Color::White, face - MAX_ROLL_VALUE)
        } else {
            Self::new(die, face)
        }
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}

/// The full pyramid of a fresh leg: five racing dice plus the grey die.
pub const FULL_PYRAMID: [Color; 6] =
    [Color::Green, Color::Yellow, Color::Red, Color::Blue, Color::Purple, Color::GREY_DIE];

/// A bag of `n` dice prepared for rolling `n - 1` of them; the colour of the
/// last die is implied by the others.
#[derive(Debug, Clone)]
pub struct DiePyramid {
    rng: ChaCha8Rng,
    num_rolls: usize,
    dice: Vec<Color>,
}

impl DiePyramid {
    /// Pyramid with all six dice available.
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self::with_dice(rng, FULL_PYRAMID.to_vec())
    }

    /// Pyramid holding only `dice`, used when some dice of the leg were
    /// already rolled out. Colours must be unique, 1 to 6 of them, with Black
    /// standing for the grey die and no White.
    pub fn with_dice(rng: ChaCha8Rng, dice: Vec<Color>) -> Self {
        debug_assert!(
            !dice.is_empty() && dice.len() <= FULL_PYRAMID.len(),
            "die pyramid holds 1..=6 dice, got {}",
            dice.len()
        );
        debug_assert!(!dice.contains(&Color::White), "White has no die of its own");
        let mut pyramid = Self { rng, num_rolls: 0, dice };
        pyramid.reset();
        pyramid
    }

    /// Reshuffles the starting dice and forgets every roll.
    pub fn reset(&mut self) {
        self.dice.shuffle(&mut self.rng);
        self.num_rolls = 0;
    }

    /// Replaces the randomness source, e.g. to give a parallel worker its own stream.
    pub fn reseed(&mut self, rng: ChaCha8Rng) {
        self.rng = rng;
        self.reset();
    }

    pub fn remaining_rolls(&self) -> usize {
        self.dice.len().saturating_sub(1 + self.num_rolls)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_rolls() == 0
    }

    /// Every die of the leg in the current shuffled order, rolled or not.
    pub fn remaining_dice(&self) -> &[Color] {
        &self.dice
    }

    /// Takes an unrolled die out of the pyramid after it was rolled at the
    /// table. Black stands for the grey die.
    pub fn take_die(&mut self, die: Color) -> Result<(), DieError> {
        if self.is_empty() {
            return Err(DieError::OutOfDice);
        }
        let Some(i) = self.dice[self.num_rolls..].iter().position(|&c| c == die) else {
            return Err(DieError::NotInPyramid { color: die });
        };
        self.dice.remove(self.num_rolls + i);
        Ok(())
    }

    pub fn roll(&mut self) -> Result<DieRoll, DieError> {
        if self.is_empty() {
            return Err(DieError::OutOfDice);
        }
        let mut color = self.dice[self.num_rolls];
        if color == Color::GREY_DIE {
            color = if self.rng.gen_bool(0.5) { Color::Black } else { Color::White };
        }
        let value = self.rng.gen_range(1..=MAX_ROLL_VALUE);
        self.num_rolls += 1;
        Ok(DieRoll::new(color, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mean_std_dev;
    use rand::SeedableRng;

    const NUM_SAMPLES: usize = 1000;
    const STD_DEV_CUTOFF: f64 = 30.0;

    /// Roll counts by step x colour x value.
    struct RollTally {
        dice: Vec<Color>,
        counts: [[[u32; 3]; 7]; 5],
    }

    impl RollTally {
        fn new(dice: &[Color]) -> Self {
            Self { dice: dice.to_vec(), counts: [[[0; 3]; 7]; 5] }
        }

        fn record(&mut self, step: usize, roll: DieRoll) {
            self.counts[step][roll.color.index()][roll.value as usize - 1] += 1;
        }

        fn validate(&self) -> Result<(), String> {
            let steps = self.dice.len() - 1;
            for s in steps..5 {
                for c in Color::ALL {
                    if self.counts[s][c.index()].iter().any(|&n| n != 0) {
                        return Err(format!("step {s} colour {c} should never be rolled"));
                    }
                }
            }
            let mut used = [false; 7];
            for &c in &self.dice {
                used[c.index()] = true;
                if c == Color::GREY_DIE {
                    used[Color::White.index()] = true;
                }
            }
            let mut racing = Vec::new();
            let mut crazy = Vec::new();
            for c in Color::ALL {
                if !used[c.index()] {
                    if (0..5).any(|s| self.counts[s][c.index()].iter().any(|&n| n != 0)) {
                        return Err(format!("colour {c} is not in the pyramid"));
                    }
                    continue;
                }
                for s in 0..steps {
                    for &n in &self.counts[s][c.index()] {
                        if c.is_crazy() {
                            crazy.push(n as f64);
                        } else {
                            racing.push(n as f64);
                        }
                    }
                }
            }
            let (racing_mean, racing_std) = mean_std_dev(&racing);
            if racing_std > STD_DEV_CUTOFF {
                return Err(format!("racing std dev {racing_std} too large"));
            }
            if !crazy.is_empty() {
                let (crazy_mean, crazy_std) = mean_std_dev(&crazy);
                if crazy_std > STD_DEV_CUTOFF {
                    return Err(format!("crazy std dev {crazy_std} too large"));
                }
                if (crazy_mean * 2.0 - racing_mean).abs() > STD_DEV_CUTOFF {
                    return Err(format!(
                        "crazy mean {crazy_mean} should be half of racing mean {racing_mean}"
                    ));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_roll_distributions() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut all = FULL_PYRAMID.to_vec();
        for k in 2..=6 {
            all.shuffle(&mut rng);
            let chosen = all[..k].to_vec();
            let mut pyramid =
                DiePyramid::with_dice(ChaCha8Rng::seed_from_u64(k as u64), chosen.clone());
            let mut tally = RollTally::new(&chosen);
            for _ in 0..NUM_SAMPLES {
                for s in 0..k - 1 {
                    let roll = pyramid.roll().expect("roll within pyramid size");
                    tally.record(s, roll);
                }
                assert!(pyramid.is_empty());
                pyramid.reset();
            }
            if let Err(msg) = tally.validate() {
                panic!("k={k}: {msg}");
            }
        }
    }

    #[test]
    fn test_out_of_dice() {
        let mut pyramid =
            DiePyramid::with_dice(ChaCha8Rng::seed_from_u64(1), vec![Color::Green, Color::Blue]);
        assert_eq!(pyramid.remaining_rolls(), 1);
        assert!(pyramid.roll().is_ok());
        assert_eq!(pyramid.roll(), Err(DieError::OutOfDice));
        pyramid.reset();
        assert_eq!(pyramid.remaining_rolls(), 1);
    }

    #[test]
    fn test_single_die_has_no_rolls() {
        let mut pyramid = DiePyramid::with_dice(ChaCha8Rng::seed_from_u64(1), vec![Color::Purple]);
        assert!(pyramid.is_empty());
        assert_eq!(pyramid.roll(), Err(DieError::OutOfDice));
    }

    #[test]
    fn test_take_die() {
        let mut pyramid = DiePyramid::with_dice(
            ChaCha8Rng::seed_from_u64(1),
            vec![Color::Green, Color::Black, Color::Red],
        );
        pyramid.take_die(Color::Black).unwrap();
        assert_eq!(pyramid.remaining_rolls(), 1);
        assert!(!pyramid.remaining_dice().contains(&Color::Black));
        assert_eq!(
            pyramid.take_die(Color::Blue),
            Err(DieError::NotInPyramid { color: Color::Blue })
        );
        pyramid.take_die(Color::Red).unwrap();
        assert_eq!(pyramid.take_die(Color::Green), Err(DieError::OutOfDice));
    }

    #[test]
    fn test_grey_die_faces() {
        assert_eq!(DieRoll::from_face(Color::GREY_DIE, 2), DieRoll::new(Color::Black, 2));
        assert_eq!(DieRoll::from_face(Color::GREY_DIE, 4), DieRoll::new(Color::White, 1));
        assert_eq!(DieRoll::from_face(Color::GREY_DIE, 6), DieRoll::new(Color::White, 3));
        assert_eq!(DieRoll::from_face(Color::Red, 3), DieRoll::new(Color::Red, 3));
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = DiePyramid::new(ChaCha8Rng::seed_from_u64(99));
        let mut b = DiePyramid::new(ChaCha8Rng::seed_from_u64(99));
        for _ in 0..5 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
