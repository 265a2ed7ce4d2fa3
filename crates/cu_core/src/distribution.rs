//! Ranking distributions.
//!
//! A distribution is the result of either a simulation or an exact
//! enumeration of all possible leg results. It counts, for every racing
//! camel, how often (or with how much weight) it finished in each rank.

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::board::Ranking;
use crate::color::{Color, NUM_RACING_CAMELS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingDistribution {
    pub total: u64,
    /// Colour x rank, rank 0 being last.
    pub counts: [[u64; NUM_RACING_CAMELS]; NUM_RACING_CAMELS],
}

impl RankingDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ranking(&mut self, ranking: &Ranking) {
        self.record_weighted_ranking(ranking, 1);
    }

    pub fn record_weighted_ranking(&mut self, ranking: &Ranking, weight: u64) {
        self.total += weight;
        for (rank, c) in ranking.iter().enumerate() {
            self.counts[c.index()][rank] += weight;
        }
    }

    pub fn count(&self, color: Color, rank: usize) -> u64 {
        self.counts[color.index()][rank]
    }

    pub fn probability(&self, color: Color, rank: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(color, rank) as f64 / self.total as f64
    }

    /// Probability of winning the leg.
    pub fn first(&self, color: Color) -> f64 {
        self.probability(color, NUM_RACING_CAMELS - 1)
    }

    pub fn merge(mut self, other: &RankingDistribution) -> Self {
        self += *other;
        self
    }

    /// Largest gap in probability between two distributions over every
    /// colour and rank.
    pub fn max_probability_gap(&self, other: &RankingDistribution) -> f64 {
        Color::RACING
            .iter()
            .flat_map(|&c| (0..NUM_RACING_CAMELS).map(move |r| (c, r)))
            .map(|(c, r)| (self.probability(c, r) - other.probability(c, r)).abs())
            .fold(0.0, f64::max)
    }
}

impl AddAssign for RankingDistribution {
    fn add_assign(&mut self, rhs: Self) {
        self.total += rhs.total;
        for (row, other) in self.counts.iter_mut().zip(rhs.counts.iter()) {
            for (n, m) in row.iter_mut().zip(other.iter()) {
                *n += m;
            }
        }
    }
}

const RANK_NAMES: [&str; NUM_RACING_CAMELS] = ["Last", "4th", "3rd", "2nd", "First"];

impl fmt::Display for RankingDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total rankings: {}", self.total)?;
        let digits = self.total.max(1).to_string().len();
        write!(f, "{:6}", "")?;
        for name in RANK_NAMES {
            write!(f, "\t{:>width$}", name, width = digits + 9)?;
        }
        writeln!(f)?;
        for c in Color::RACING {
            write!(f, "{c:<6}")?;
            for rank in 0..NUM_RACING_CAMELS {
                write!(
                    f,
                    "\t{:>digits$} ({:5.2}%)",
                    self.count(c, rank),
                    self.probability(c, rank) * 100.0
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
