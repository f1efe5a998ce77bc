use super::board::MineOracle;
use crate::Position;
use ndarray::{Array2, Zip};
use rand::Rng;

/// One candidate mine-probability map.
///
/// `errors` holds the last recorded `truth - probability` for every cell that
/// has been scored, in this map or in its ancestors, and zero for cells never
/// scored. `fitness` is the root-mean-square error over the most recent sample;
/// lower is better and an unevaluated map sorts last.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    pub probabilities: Array2<f64>,
    pub errors: Array2<f64>,
    pub fitness: f64,
}

impl Chromosome {
    pub fn from_probabilities(probabilities: Array2<f64>) -> Self {
        let errors = Array2::zeros(probabilities.raw_dim());
        Self {
            probabilities,
            errors,
            fitness: f64::INFINITY,
        }
    }

    /// Every cell drawn independently from `[0, max_probability)`.
    pub fn random<R: Rng + ?Sized>(shape: (usize, usize), max_probability: f64, rng: &mut R) -> Self {
        let probabilities = Array2::from_shape_simple_fn(shape, || rng.gen::<f64>() * max_probability);
        Self::from_probabilities(probabilities)
    }

    pub fn probability(&self, pos: Position) -> f64 {
        self.probabilities[pos.nd_index()]
    }

    /// Scores the map against the true labels of `sample`, overwriting the
    /// recorded error of each sampled cell. Errors elsewhere are kept.
    pub fn evaluate(&mut self, sample: &[Position], oracle: &MineOracle) -> f64 {
        if sample.is_empty() {
            self.fitness = 0.0;
            return self.fitness;
        }

        let mut squared = 0.0;
        for &pos in sample {
            let idx = pos.nd_index();
            let truth = if oracle.is_mine(pos) { 1.0 } else { 0.0 };
            let error = truth - self.probabilities[idx];
            self.errors[idx] = error;
            squared += error * error;
        }

        self.fitness = (squared / sample.len() as f64).sqrt();
        self.fitness
    }

    /// Child whose probabilities and errors are the mean of both parents'.
    pub fn crossover(first: &Chromosome, second: &Chromosome) -> Chromosome {
        Chromosome {
            probabilities: (&first.probabilities + &second.probabilities) / 2.0,
            errors: (&first.errors + &second.errors) / 2.0,
            fitness: f64::INFINITY,
        }
    }

    /// Moves each cell, with probability `chance`, a random fraction of
    /// `strength * error` along its recorded error, clamped to `[0, 1]`.
    /// Cells without recorded error stay put.
    pub fn mutate<R: Rng + ?Sized>(&mut self, chance: f64, strength: f64, rng: &mut R) {
        Zip::from(&mut self.probabilities)
            .and(&self.errors)
            .for_each(|probability, &error| {
                if error == 0.0 || rng.gen::<f64>() >= chance {
                    return;
                }
                let delta = rng.gen::<f64>() * strength * error;
                *probability = (*probability + delta).clamp(0.0, 1.0);
            });
    }

    /// Fitness-weighted mean of `members`, weight `1 / (fitness + 1)`.
    pub fn weighted_average(members: &[Chromosome]) -> Option<Chromosome> {
        let first = members.first()?;
        let mut probabilities = Array2::zeros(first.probabilities.raw_dim());
        let mut errors = Array2::zeros(first.errors.raw_dim());
        let mut total_weight = 0.0;

        for member in members {
            let weight = 1.0 / (member.fitness + 1.0);
            probabilities.scaled_add(weight, &member.probabilities);
            errors.scaled_add(weight, &member.errors);
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return None;
        }
        probabilities /= total_weight;
        errors /= total_weight;

        Some(Chromosome {
            probabilities,
            errors,
            fitness: f64::INFINITY,
        })
    }

    /// Cells this map would flag at `threshold`.
    pub fn implied_mines(&self, threshold: f64) -> impl Iterator<Item = Position> + '_ {
        self.probabilities
            .indexed_iter()
            .filter(move |&(_, &p)| p > threshold)
            .map(|((row, column), _)| Position::new(column as i32, row as i32))
    }
}
