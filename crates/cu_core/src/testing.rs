//! Shared test helpers and proptest strategies.

use proptest::prelude::*;

use crate::board::BOARD_SIZE;
use crate::color::{Color, NUM_CAMELS};
use crate::dice::{DieRoll, FULL_PYRAMID, MAX_ROLL_VALUE};
use crate::input::GameStateInput;

/// Mean and sample standard deviation.
pub(crate) fn mean_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

pub(crate) fn arb_color() -> impl Strategy<Value = Color> {
    proptest::sample::select(Color::ALL.to_vec())
}

/// Any roll of any camel, crazy ones included.
pub(crate) fn arb_roll() -> impl Strategy<Value = DieRoll> {
    (arb_color(), 1..=MAX_ROLL_VALUE).prop_map(|(color, value)| DieRoll::new(color, value))
}

/// 1 to `max` distinct dice, Black standing for the grey die.
pub(crate) fn arb_pyramid_dice(max: usize) -> impl Strategy<Value = Vec<Color>> {
    let max = max.clamp(1, FULL_PYRAMID.len());
    (1..=max).prop_flat_map(|n| {
        proptest::sample::subsequence(FULL_PYRAMID.to_vec(), n).prop_shuffle()
    })
}

/// A valid board: every camel placed once, stacks on distinct spaces, and
/// markers only on empty spaces past the start.
pub(crate) fn arb_board_input() -> impl Strategy<Value = GameStateInput> {
    let positions: Vec<i32> = (0..BOARD_SIZE as i32).collect();
    (
        Just(Color::ALL.to_vec()).prop_shuffle(),
        proptest::collection::vec(any::<bool>(), NUM_CAMELS - 1),
        proptest::sample::subsequence(positions, NUM_CAMELS).prop_shuffle(),
        proptest::collection::vec(0u8..4, BOARD_SIZE),
    )
        .prop_map(|(order, cuts, spaces, markers)| {
            let mut stacks: Vec<Vec<Color>> = vec![vec![order[0]]];
            for (&c, &cut) in order[1..].iter().zip(&cuts) {
                if cut {
                    stacks.push(vec![c]);
                } else if let Some(stack) = stacks.last_mut() {
                    stack.push(c);
                }
            }
            let mut input = GameStateInput::from_camels(spaces.iter().copied().zip(stacks));
            for p in 1..BOARD_SIZE as i32 {
                if input.camels.contains_key(&p) {
                    continue;
                }
                match markers[p as usize] {
                    1 => input = input.with_cheers([p]),
                    2 => input = input.with_boos([p]),
                    _ => {}
                }
            }
            input
        })
}

#[test]
fn test_mean_std_dev() {
    let (mean, std) = mean_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert!((mean - 5.0).abs() < 1e-12);
    assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
}
