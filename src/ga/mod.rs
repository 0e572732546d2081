//! Genetic strategy.
//!
//! Evolves a population of [`Chromosome`]s — technician assignments plus a
//! global visit order — under a fitness that sums travel distance with
//! weighted penalties for skill, time-window, and hour-budget violations.
//! Any violation is priced high enough that a feasible solution always
//! beats an infeasible one at field-service scale.
//!
//! Selection is tournament, crossover is uniform (assignments) + OX
//! (sequence), mutation is per-locus reassignment plus a sequence swap,
//! and the top elites survive each generation unchanged. The best
//! chromosome is decoded through the shared route decoder, which drops any
//! residual infeasible stop, so the returned schedule is strictly
//! feasible.

mod chromosome;
mod operators;

pub use chromosome::Chromosome;
pub use operators::{order_crossover, swap_mutation, uniform_crossover};

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{add_minutes, minutes_between, OptimizationResult};
use crate::round::{round2, round4};
use crate::solver::decode::{decode_assignment, result_from_decoded, travel_minutes};
use crate::solver::{run_timed, ProblemInstance, Solver, SolverConfig};

/// Fitness penalty per stop whose skill requirements the assignee misses.
const SKILL_VIOLATION_PENALTY: f64 = 500.0;
/// Fitness penalty per hour of arrival past a time-window end.
const TIME_WINDOW_PENALTY_PER_HOUR: f64 = 200.0;
/// Fitness penalty per hour past shift end or over the daily budget.
const OVERRUN_PENALTY_PER_HOUR: f64 = 300.0;

/// Genetic algorithm solver for field-service routing.
///
/// A fixed `seed` in the configuration makes the solve fully
/// deterministic; unseeded solves draw fresh OS entropy. The generator is
/// local to each solve, so concurrent solves never interfere.
///
/// # Examples
///
/// ```no_run
/// use dispatch_routing::ga::GeneticSolver;
/// use dispatch_routing::solver::{ProblemInstance, Solver, SolverConfig};
///
/// # fn demo(problem: &ProblemInstance) -> dispatch_routing::error::Result<()> {
/// let config = SolverConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_seed(42);
/// let result = GeneticSolver::new(problem, config).solve()?;
/// println!("best fitness: {}", result.metadata()["best_fitness"]);
/// # Ok(())
/// # }
/// ```
pub struct GeneticSolver<'a> {
    problem: &'a ProblemInstance,
    config: SolverConfig,
}

impl<'a> GeneticSolver<'a> {
    /// Creates a genetic solver over a validated problem instance.
    pub fn new(problem: &'a ProblemInstance, config: SolverConfig) -> Self {
        Self { problem, config }
    }

    fn solve_impl(&self) -> Result<OptimizationResult> {
        let problem = self.problem;
        let config = &self.config;
        let speed = config.avg_speed_mph();
        let num_orders = problem.work_orders().len();
        let num_technicians = problem.technicians().len();

        info!(
            population = config.population_size(),
            generations = config.generations(),
            mutation_rate = config.mutation_rate(),
            elites = config.elite_size(),
            work_orders = num_orders,
            technicians = num_technicians,
            "genetic solver starting"
        );

        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // Per-order lists of skill-feasible technicians; empty list means
        // any technician may be sampled.
        let mask = problem.feasibility_mask();
        let feasible_techs: Vec<Vec<usize>> = (0..num_orders)
            .map(|w| (0..num_technicians).filter(|&t| mask[t][w]).collect())
            .collect();

        let mut population: Vec<Chromosome> = (0..config.population_size())
            .map(|_| random_chromosome(num_orders, num_technicians, &feasible_techs, &mut rng))
            .collect();
        for chromo in &mut population {
            let fitness = evaluate_fitness(problem, chromo, speed);
            chromo.set_fitness(fitness);
        }
        population.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));

        let mut best_history = vec![population[0].fitness()];

        for generation in 0..config.generations() {
            let mut next: Vec<Chromosome> =
                population[..config.elite_size().min(population.len())].to_vec();

            while next.len() < config.population_size() {
                let parent1 = tournament(&population, config.tournament_size(), &mut rng);
                let parent2 = tournament(&population, config.tournament_size(), &mut rng);
                let (mut child1, mut child2) = crossover(parent1, parent2, &mut rng);

                for child in [&mut child1, &mut child2] {
                    mutate(
                        child,
                        config.mutation_rate(),
                        num_technicians,
                        &feasible_techs,
                        &mut rng,
                    );
                    let fitness = evaluate_fitness(problem, child, speed);
                    child.set_fitness(fitness);
                }

                next.push(child1);
                if next.len() < config.population_size() {
                    next.push(child2);
                }
            }

            next.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
            population = next;
            best_history.push(population[0].fitness());

            if (generation + 1) % 100 == 0 {
                debug!(
                    generation = generation + 1,
                    best_fitness = population[0].fitness(),
                    "generation complete"
                );
            }
        }

        let best = &population[0];
        info!(best_fitness = best.fitness(), "genetic search converged");

        let decoded =
            decode_assignment(problem, &best.group_by_technician(num_technicians), speed);
        let mut result = result_from_decoded(self.name(), problem, decoded);

        let initial = best_history[0];
        let final_fitness = *best_history.last().unwrap_or(&initial);
        let improvement_pct = if initial > 0.0 {
            round2((1.0 - final_fitness / initial) * 100.0)
        } else {
            0.0
        };
        result.insert_metadata("best_fitness", serde_json::json!(round4(best.fitness())));
        result.insert_metadata("initial_fitness", serde_json::json!(round4(initial)));
        result.insert_metadata("final_fitness", serde_json::json!(round4(final_fitness)));
        result.insert_metadata("improvement_pct", serde_json::json!(improvement_pct));
        result.insert_metadata("generations", serde_json::json!(config.generations()));
        Ok(result)
    }
}

impl Solver for GeneticSolver<'_> {
    fn name(&self) -> &'static str {
        "genetic"
    }

    fn solve(&self) -> Result<OptimizationResult> {
        self.config.validate_genetic()?;
        run_timed(self.name(), || self.solve_impl())
    }
}

/// Samples a chromosome: skill-feasible assignee per order when one
/// exists, uniform otherwise; shuffled visit order.
fn random_chromosome<R: Rng>(
    num_orders: usize,
    num_technicians: usize,
    feasible_techs: &[Vec<usize>],
    rng: &mut R,
) -> Chromosome {
    let assignments = (0..num_orders)
        .map(|w| match feasible_techs[w].choose(rng) {
            Some(&tech) => tech,
            None => rng.random_range(0..num_technicians),
        })
        .collect();

    let mut order_sequence: Vec<usize> = (0..num_orders).collect();
    order_sequence.shuffle(rng);

    Chromosome::new(assignments, order_sequence)
}

/// Total travel distance plus weighted constraint penalties; lower is
/// better. Early arrivals wait at no cost; infeasible stops are priced,
/// not skipped, so the search gradient points toward feasibility.
fn evaluate_fitness(problem: &ProblemInstance, chromo: &Chromosome, speed: f64) -> f64 {
    let num_technicians = problem.technicians().len();
    let mut total_distance = 0.0;
    let mut penalty = 0.0;

    for (tech_idx, order_indices) in chromo
        .group_by_technician(num_technicians)
        .iter()
        .enumerate()
    {
        let tech = &problem.technicians()[tech_idx];
        let shift = tech.shift();
        let mut current_node = tech_idx;
        let mut current_time = shift.start();
        let mut used_hours = 0.0;

        for &order_idx in order_indices {
            let wo = &problem.work_orders()[order_idx];

            if !problem.skill_feasible(tech_idx, order_idx) {
                penalty += SKILL_VIOLATION_PENALTY;
            }

            let node = problem.order_node(order_idx);
            let dist = problem.distance(current_node, node);
            let travel_min = travel_minutes(dist, speed);
            let service_min = f64::from(wo.duration_minutes());
            total_distance += dist;

            let mut arrival = add_minutes(current_time, travel_min);
            let window = wo.time_window();
            if arrival < window.start() {
                arrival = window.start();
            }
            if arrival > window.end() {
                let hours_late = minutes_between(window.end(), arrival) / 60.0;
                penalty += TIME_WINDOW_PENALTY_PER_HOUR * hours_late;
            }

            current_time = add_minutes(arrival, service_min);
            if current_time > shift.end() {
                let hours_over = minutes_between(shift.end(), current_time) / 60.0;
                penalty += OVERRUN_PENALTY_PER_HOUR * hours_over;
            }

            used_hours += (travel_min + service_min) / 60.0;
            current_node = node;
        }

        if used_hours > tech.max_hours() {
            penalty += OVERRUN_PENALTY_PER_HOUR * (used_hours - tech.max_hours());
        }
    }

    total_distance + penalty
}

/// Tournament selection: `k` competitors drawn with replacement, minimum
/// fitness wins.
fn tournament<'p, R: Rng>(
    population: &'p [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'p Chromosome {
    let mut winner = &population[rng.random_range(0..population.len())];
    for _ in 1..tournament_size {
        let challenger = &population[rng.random_range(0..population.len())];
        if challenger.fitness() < winner.fitness() {
            winner = challenger;
        }
    }
    winner
}

/// Uniform crossover on assignments, OX on the sequence; produces two
/// children with roles reversed.
fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let (assign1, assign2) = uniform_crossover(parent1.assignments(), parent2.assignments(), rng);
    let seq1 = order_crossover(parent1.order_sequence(), parent2.order_sequence(), rng);
    let seq2 = order_crossover(parent2.order_sequence(), parent1.order_sequence(), rng);
    (Chromosome::new(assign1, seq1), Chromosome::new(assign2, seq2))
}

/// In-place mutation: each assignment locus reassigns with probability
/// `rate` to a skill-feasible technician (uniform fallback), and with
/// probability `rate` the sequence undergoes one swap.
fn mutate<R: Rng>(
    chromo: &mut Chromosome,
    rate: f64,
    num_technicians: usize,
    feasible_techs: &[Vec<usize>],
    rng: &mut R,
) {
    for order_idx in 0..chromo.len() {
        if rng.random::<f64>() < rate {
            chromo.assignments_mut()[order_idx] = match feasible_techs[order_idx].choose(rng) {
                Some(&tech) => tech,
                None => rng.random_range(0..num_technicians),
            };
        }
    }
    if rng.random::<f64>() < rate {
        swap_mutation(chromo.order_sequence_mut(), rng);
    }
}
