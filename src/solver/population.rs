use super::board::MineOracle;
use super::chromosome::Chromosome;
use super::evolutionary::EvolutionConfig;
use crate::Position;
use rand::{seq::SliceRandom, Rng};
use statrs::statistics::Statistics;

/// Summary of the population's fitness after an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl FitnessStats {
    fn from_fitness(fitness: &[f64]) -> Self {
        Self {
            min: Statistics::min(fitness),
            max: Statistics::max(fitness),
            mean: fitness.mean(),
            std_dev: fitness.std_dev(),
        }
    }
}

/// Cells the fitness sample is drawn from, split by their true label.
///
/// Each draw takes up to half of its cells from the mines and the rest from
/// the safe cells.
#[derive(Debug, Clone)]
struct SampleFrame {
    mines: Vec<Position>,
    safe: Vec<Position>,
    size: usize,
}

impl SampleFrame {
    fn new(size: usize, oracle: &MineOracle) -> Self {
        let (mines, safe): (Vec<Position>, Vec<Position>) = (0..oracle.total_cells())
            .map(|idx| oracle.position(idx))
            .partition(|&pos| oracle.is_mine(pos));
        Self {
            mines,
            safe,
            size: size.min(oracle.total_cells()),
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Position> {
        let mine_share = self.size.div_ceil(2).min(self.mines.len());
        let safe_share = (self.size - mine_share).min(self.safe.len());
        self.mines
            .choose_multiple(rng, mine_share)
            .chain(self.safe.choose_multiple(rng, safe_share))
            .copied()
            .collect()
    }
}

/// A population of probability maps.
///
/// Each evaluation scores a chromosome on a freshly drawn sample. Members keep
/// the score they were given when they joined, and culling only drops the
/// worst, so the best fitness never increases from one generation to the next.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    frame: SampleFrame,
    generation: usize,
    stats: FitnessStats,
}

impl Population {
    pub fn new<R: Rng + ?Sized>(
        config: &EvolutionConfig,
        shape: (usize, usize),
        oracle: &MineOracle,
        rng: &mut R,
    ) -> Self {
        let chromosomes = (0..config.population_size)
            .map(|_| Chromosome::random(shape, config.initial_probability_max, rng))
            .collect();
        Self::from_chromosomes(chromosomes, Self::scored_cells(config, oracle), oracle, rng)
    }

    /// Wraps existing chromosomes; they are evaluated and sorted immediately.
    pub fn from_chromosomes<R: Rng + ?Sized>(
        chromosomes: Vec<Chromosome>,
        sample_size: usize,
        oracle: &MineOracle,
        rng: &mut R,
    ) -> Self {
        let mut population = Self {
            chromosomes,
            frame: SampleFrame::new(sample_size, oracle),
            generation: 0,
            stats: FitnessStats::default(),
        };
        population.evaluate(oracle, rng);
        population
    }

    /// Cells scored per evaluation, at most as many as there are mines on the board.
    fn scored_cells(config: &EvolutionConfig, oracle: &MineOracle) -> usize {
        config
            .sample_size
            .unwrap_or(usize::MAX)
            .min(oracle.mine_count())
            .max(1)
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn sample_size(&self) -> usize {
        self.frame.size
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn stats(&self) -> FitnessStats {
        self.stats
    }

    pub fn fitness_min(&self) -> f64 {
        self.stats.min
    }

    pub fn best(&self) -> &Chromosome {
        &self.chromosomes[0]
    }

    /// Scores every chromosome on its own fresh sample and sorts ascending by fitness.
    pub fn evaluate<R: Rng + ?Sized>(&mut self, oracle: &MineOracle, rng: &mut R) {
        for chromosome in &mut self.chromosomes {
            chromosome.evaluate(&self.frame.draw(rng), oracle);
        }
        self.sort();
        self.summarize();
    }

    fn sort(&mut self) {
        self.chromosomes
            .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    fn summarize(&mut self) {
        let fitness: Vec<f64> = self.chromosomes.iter().map(|c| c.fitness).collect();
        self.stats = FitnessStats::from_fitness(&fitness);
    }

    /// Runs one generation: crowd injection, breeding, mutation, culling.
    pub fn evolve<R: Rng + ?Sized>(
        &mut self,
        config: &EvolutionConfig,
        oracle: &MineOracle,
        rng: &mut R,
    ) {
        if config.wisdom_of_crowds {
            self.inject_crowd(config.crowd_size, oracle, rng);
        }

        let mutation_chance = self.stats.min.clamp(0.0, 1.0);
        let children: Vec<Chromosome> = self
            .select_parents(config, rng)
            .into_iter()
            .map(|(first, second)| {
                let mut child =
                    Chromosome::crossover(&self.chromosomes[first], &self.chromosomes[second]);
                child.mutate(mutation_chance, config.mutation_strength, rng);
                child.evaluate(&self.frame.draw(rng), oracle);
                child
            })
            .collect();

        self.chromosomes.extend(children);
        self.sort();
        self.chromosomes.truncate(config.population_size);
        self.summarize();
        self.generation += 1;
    }

    /// Replaces the worst member with the weighted average of the top `crowd_size`.
    fn inject_crowd<R: Rng + ?Sized>(&mut self, crowd_size: usize, oracle: &MineOracle, rng: &mut R) {
        if self.chromosomes.len() < 2 {
            return;
        }
        let top = crowd_size.clamp(1, self.chromosomes.len());
        let Some(mut crowd) = Chromosome::weighted_average(&self.chromosomes[..top]) else {
            return;
        };
        crowd.evaluate(&self.frame.draw(rng), oracle);
        if let Some(worst) = self.chromosomes.last_mut() {
            *worst = crowd;
        }
    }

    /// Breeding pairs picked by tournament; the two parents are always distinct members.
    pub fn select_parents<R: Rng + ?Sized>(
        &self,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Vec<(usize, usize)> {
        let len = self.chromosomes.len();
        if len < 2 {
            return Vec::new();
        }
        let pairs = ((len as f64 * config.parent_fraction) as usize).max(1);
        let tournament_size = ((len as f64 * config.tournament_fraction) as usize).max(2);

        (0..pairs)
            .map(|_| {
                let first = self.tournament(tournament_size, None, rng);
                let second = self.tournament(tournament_size, Some(first), rng);
                (first, second)
            })
            .collect()
    }

    fn tournament<R: Rng + ?Sized>(&self, size: usize, exclude: Option<usize>, rng: &mut R) -> usize {
        let mut winner = self.draw(exclude, rng);
        for _ in 1..size {
            let contender = self.draw(exclude, rng);
            if self.chromosomes[contender].fitness < self.chromosomes[winner].fitness {
                winner = contender;
            }
        }
        winner
    }

    fn draw<R: Rng + ?Sized>(&self, exclude: Option<usize>, rng: &mut R) -> usize {
        loop {
            let idx = rng.gen_range(0..self.chromosomes.len());
            if Some(idx) != exclude {
                return idx;
            }
        }
    }

    /// Below the fitness threshold after at least one generation, or the best
    /// map flags exactly the true mines.
    pub fn is_converged(&self, config: &EvolutionConfig, oracle: &MineOracle) -> bool {
        if self.generation > 0 && self.stats.min < config.convergence_threshold {
            return true;
        }

        let best = self.best();
        let implied = best.implied_mines(config.flag_threshold).count();
        implied == oracle.mine_count()
            && best
                .implied_mines(config.flag_threshold)
                .all(|pos| oracle.is_mine(pos))
    }
}
