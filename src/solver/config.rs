//! Solver configuration.

use crate::error::{Error, Result};

/// First-solution construction strategy for the CP-VRP engine.
///
/// Names mirror the OR-Tools routing enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirstSolutionStrategy {
    /// Extend each route from its last node with the cheapest arc.
    #[default]
    PathCheapestArc,
    /// Insert the cheapest node at its cheapest position, in parallel.
    ParallelCheapestInsertion,
    /// Clarke & Wright savings construction.
    Savings,
    /// Let the engine pick.
    Automatic,
}

/// Local-search metaheuristic for the CP-VRP engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metaheuristic {
    /// Guided local search; usually the strongest choice for routing.
    #[default]
    GuidedLocalSearch,
    /// Simulated annealing.
    SimulatedAnnealing,
    /// Tabu search.
    TabuSearch,
    /// Let the engine pick.
    Automatic,
}

/// Tunable parameters shared by all solver strategies.
///
/// Defaults match typical field-service deployments; strategies read only
/// the fields that apply to them.
///
/// # Examples
///
/// ```
/// use dispatch_routing::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_avg_speed_mph(25.0)
///     .with_generations(200)
///     .with_seed(42);
/// assert_eq!(config.avg_speed_mph(), 25.0);
/// assert_eq!(config.generations(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    avg_speed_mph: f64,
    time_limit_seconds: u64,
    first_solution_strategy: FirstSolutionStrategy,
    metaheuristic: Metaheuristic,
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
    elite_size: usize,
    tournament_size: usize,
    seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            avg_speed_mph: 30.0,
            time_limit_seconds: 120,
            first_solution_strategy: FirstSolutionStrategy::default(),
            metaheuristic: Metaheuristic::default(),
            population_size: 100,
            generations: 500,
            mutation_rate: 0.10,
            elite_size: 10,
            tournament_size: 5,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Average travel speed used to convert distance to time.
    pub fn avg_speed_mph(&self) -> f64 {
        self.avg_speed_mph
    }

    /// Wall-clock cap for the CP-VRP search.
    pub fn time_limit_seconds(&self) -> u64 {
        self.time_limit_seconds
    }

    /// CP-VRP first-solution strategy.
    pub fn first_solution_strategy(&self) -> FirstSolutionStrategy {
        self.first_solution_strategy
    }

    /// CP-VRP local-search metaheuristic.
    pub fn metaheuristic(&self) -> Metaheuristic {
        self.metaheuristic
    }

    /// Genetic population size.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Genetic generation count.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Genetic per-locus mutation probability.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Genetic elites carried forward each generation.
    pub fn elite_size(&self) -> usize {
        self.elite_size
    }

    /// Genetic tournament pool size.
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Genetic random seed; `None` draws fresh entropy per solve.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the average travel speed.
    pub fn with_avg_speed_mph(mut self, mph: f64) -> Self {
        self.avg_speed_mph = mph;
        self
    }

    /// Sets the CP-VRP wall-clock cap.
    pub fn with_time_limit_seconds(mut self, seconds: u64) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    /// Sets the CP-VRP first-solution strategy.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Sets the CP-VRP metaheuristic.
    pub fn with_metaheuristic(mut self, metaheuristic: Metaheuristic) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }

    /// Sets the genetic population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the genetic generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the genetic per-locus mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the genetic elite count.
    pub fn with_elite_size(mut self, size: usize) -> Self {
        self.elite_size = size;
        self
    }

    /// Sets the genetic tournament pool size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Fixes the genetic random seed for reproducible solves.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the fields every strategy depends on.
    pub(crate) fn validate_common(&self) -> Result<()> {
        if self.avg_speed_mph <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "avg_speed_mph must be positive, got {}",
                self.avg_speed_mph
            )));
        }
        Ok(())
    }

    /// Checks the genetic-strategy fields.
    pub(crate) fn validate_genetic(&self) -> Result<()> {
        self.validate_common()?;
        if self.population_size == 0 {
            return Err(Error::InvalidInput(
                "population_size must be positive".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(Error::InvalidInput(
                "tournament_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidInput(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elite_size > self.population_size {
            return Err(Error::InvalidInput(format!(
                "elite_size {} exceeds population_size {}",
                self.elite_size, self.population_size
            )));
        }
        Ok(())
    }

    /// Checks the CP-VRP fields.
    pub(crate) fn validate_cp(&self) -> Result<()> {
        self.validate_common()?;
        if self.time_limit_seconds == 0 {
            return Err(Error::InvalidInput(
                "time_limit_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
