//! Monte-Carlo leg estimator.
//!
//! Plays the rest of the leg with random rolls, records the ranking, then
//! puts the board back. Only the board is restored between samples: the die
//! source keeps advancing, so every sample sees fresh rolls.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::board::contract_violation;
use crate::config::EstimatorConfig;
use crate::distribution::RankingDistribution;
use crate::error::Result;
use crate::game::Game;

impl Game {
    /// Samples `n` random completions of the current leg. The board is left
    /// as it was found.
    pub fn simulate_leg_ranking_distribution(&mut self, n: usize) -> RankingDistribution {
        let snapshot = self.board.clone();
        let mut distribution = RankingDistribution::new();
        for _ in 0..n {
            while !self.board.is_leg_over() {
                match self.dice.roll() {
                    Ok(roll) => self.board.apply(roll),
                    Err(e) => {
                        contract_violation(&format!("leg sampling: {e} before the leg ended"));
                        break;
                    }
                }
            }
            distribution.record_ranking(self.board.ranking());
            self.dice.reset();
            self.board.clone_from(&snapshot);
        }
        distribution
    }

    /// Splits the samples over independent streams of one seed and merges the
    /// results. The stream count comes from the configuration alone, so the
    /// same configuration gives the same distribution whatever the thread pool
    /// size.
    pub fn simulate_parallel(&self, config: &EstimatorConfig) -> RankingDistribution {
        let workers = config.effective_workers();
        let share = config.samples / workers;
        let extra = config.samples % workers;
        debug!("sampling {} legs on {workers} streams", config.samples);
        (0..workers)
            .into_par_iter()
            .map(|worker| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
                rng.set_stream(worker as u64);
                let mut game = self.clone();
                game.dice.reseed(rng);
                let n = share + usize::from(worker < extra);
                game.simulate_leg_ranking_distribution(n)
            })
            .reduce(RankingDistribution::new, |a, b| a.merge(&b))
    }

    /// Runs the estimator described by `config`.
    pub fn estimate(&mut self, config: &EstimatorConfig) -> Result<RankingDistribution> {
        config.validate()?;
        let distribution = if config.parallel {
            self.simulate_parallel(config)
        } else {
            self.dice.reseed(ChaCha8Rng::seed_from_u64(config.seed));
            self.simulate_leg_ranking_distribution(config.samples)
        };
        info!("estimated leg from {} samples (seed {})", distribution.total, config.seed);
        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color::{self, *};
    use crate::dice::DiePyramid;
    use crate::input::GameStateInput;

    fn stacked_game() -> Game {
        let input = GameStateInput::from_camels([
            (1, vec![Yellow, Green, Red, Blue, Purple]),
            (13, vec![Black, White]),
        ])
        .with_boos([2]);
        let dice = DiePyramid::with_dice(ChaCha8Rng::seed_from_u64(5), vec![Purple, Red, Blue]);
        Game::new(&input, dice).unwrap()
    }

    #[test]
    fn test_sampling_agrees_with_enumeration() {
        let mut game = stacked_game();
        let exact = game.compute_leg_ranking_distribution();
        let sampled = game.simulate_leg_ranking_distribution(20_000);
        assert_eq!(sampled.total, 20_000);
        let gap = exact.max_probability_gap(&sampled);
        assert!(gap < 0.03, "sampled distribution is {gap} away from the exact one");
    }

    #[test]
    fn test_sampling_leaves_board_untouched() {
        let mut game = stacked_game();
        let before = game.board().clone();
        game.simulate_leg_ranking_distribution(50);
        assert_eq!(game.board(), &before);
        assert_eq!(game.dice().remaining_rolls(), 2);
    }

    #[test]
    fn test_finished_leg_records_current_ranking() {
        let input = GameStateInput::from_camels([
            (0, vec![Blue, Black, White]),
            (1, vec![Green]),
            (2, vec![Red]),
            (3, vec![Yellow]),
            (4, vec![Purple]),
        ]);
        let dice = DiePyramid::with_dice(ChaCha8Rng::seed_from_u64(5), vec![Color::Purple]);
        let mut game = Game::new(&input, dice).unwrap();
        let d = game.simulate_leg_ranking_distribution(10);
        assert_eq!(d.count(Purple, 4), 10);
        assert_eq!(d.count(Blue, 0), 10);
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let config = EstimatorConfig { samples: 500, seed: 11, parallel: false, workers: 0 };
        let a = stacked_game().estimate(&config).unwrap();
        let b = stacked_game().estimate(&config).unwrap();
        assert_eq!(a, b);

        let config = EstimatorConfig { samples: 501, seed: 11, parallel: true, workers: 4 };
        let a = stacked_game().estimate(&config).unwrap();
        let b = stacked_game().estimate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total, 501);
    }

    #[test]
    fn test_parallel_estimate_ignores_pool_size() {
        let config = EstimatorConfig { samples: 1000, seed: 11, parallel: true, workers: 0 };
        let run = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
            pool.install(|| stacked_game().estimate(&config).unwrap())
        };
        let two = run(2);
        assert_eq!(two, run(3));
        assert_eq!(two, run(1));
        assert_eq!(two.total, 1000);
    }

    #[test]
    fn test_parallel_agrees_with_enumeration() {
        let mut game = stacked_game();
        let exact = game.compute_leg_ranking_distribution();
        let config = EstimatorConfig { samples: 20_000, seed: 3, parallel: true, workers: 8 };
        let sampled = game.estimate(&config).unwrap();
        assert!(exact.max_probability_gap(&sampled) < 0.03);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EstimatorConfig { samples: 0, ..EstimatorConfig::default() };
        assert!(stacked_game().estimate(&config).is_err());
    }
}
