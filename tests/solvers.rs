//! Cross-solver scenarios on a realistic Denver-metro instance: fifteen
//! work orders with varied skills, windows, and priorities against five
//! technicians.

use chrono::{NaiveDate, NaiveDateTime};

use dispatch_routing::constraints::{skill_match, validate_route, work_order_map};
use dispatch_routing::ga::GeneticSolver;
use dispatch_routing::geo::{problem_locations, DistanceMatrix};
use dispatch_routing::models::{
    OptimizationResult, Priority, Shift, Technician, TimeWindow, WorkOrder,
};
use dispatch_routing::solver::{GreedySolver, ProblemInstance, Solver, SolverConfig};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 12)
        .expect("valid date")
        .and_hms_opt(h, m, 0)
        .expect("valid time")
}

fn shift() -> Shift {
    Shift::new(at(8, 0), at(17, 0)).expect("valid shift")
}

fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
    TimeWindow::new(at(start.0, start.1), at(end.0, end.1)).expect("valid window")
}

fn technicians() -> Vec<Technician> {
    vec![
        Technician::new("tech-001", "Alice Martinez", 39.7392, -104.9903, 8.0, shift())
            .with_skills(["electrical", "plumbing", "hvac"]),
        Technician::new("tech-002", "Bob Johnson", 39.7294, -104.8319, 8.0, shift())
            .with_skills(["plumbing", "general_maintenance"]),
        Technician::new("tech-003", "Carol Williams", 39.8028, -105.0875, 8.0, shift())
            .with_skills(["electrical", "inspection", "hvac"]),
        Technician::new("tech-004", "David Chen", 39.5791, -104.8769, 8.0, shift())
            .with_skills(["plumbing", "electrical", "general_maintenance", "inspection"]),
        Technician::new("tech-005", "Eva Petrov", 39.9205, -105.0867, 8.0, shift())
            .with_skills(["hvac", "general_maintenance", "inspection"]),
    ]
}

struct OrderSpec {
    id: &'static str,
    property: &'static str,
    lat: f64,
    lng: f64,
    priority: Priority,
    skills: &'static [&'static str],
    minutes: u32,
    window: ((u32, u32), (u32, u32)),
}

fn work_orders() -> Vec<WorkOrder> {
    let specs = [
        OrderSpec { id: "WO-001", property: "P-101", lat: 39.7047, lng: -105.0814, priority: Priority::Emergency, skills: &["electrical"], minutes: 60, window: ((8, 0), (10, 0)) },
        OrderSpec { id: "WO-002", property: "P-102", lat: 39.8367, lng: -105.0372, priority: Priority::High, skills: &["plumbing"], minutes: 45, window: ((8, 0), (12, 0)) },
        OrderSpec { id: "WO-003", property: "P-103", lat: 39.8680, lng: -104.9719, priority: Priority::Medium, skills: &["general_maintenance"], minutes: 30, window: ((9, 0), (15, 0)) },
        OrderSpec { id: "WO-004", property: "P-104", lat: 39.5518, lng: -105.0109, priority: Priority::Low, skills: &["inspection"], minutes: 30, window: ((8, 0), (17, 0)) },
        OrderSpec { id: "WO-005", property: "P-105", lat: 39.5186, lng: -104.7614, priority: Priority::High, skills: &["electrical", "plumbing"], minutes: 90, window: ((10, 0), (14, 0)) },
        OrderSpec { id: "WO-006", property: "P-106", lat: 39.9853, lng: -104.8206, priority: Priority::Medium, skills: &["hvac"], minutes: 60, window: ((8, 0), (16, 0)) },
        OrderSpec { id: "WO-007", property: "P-107", lat: 39.7555, lng: -105.2211, priority: Priority::Low, skills: &["general_maintenance"], minutes: 45, window: ((9, 0), (17, 0)) },
        OrderSpec { id: "WO-008", property: "P-108", lat: 39.6133, lng: -105.0166, priority: Priority::High, skills: &["plumbing"], minutes: 60, window: ((8, 0), (13, 0)) },
        OrderSpec { id: "WO-009", property: "P-109", lat: 39.8083, lng: -104.9339, priority: Priority::Emergency, skills: &["electrical"], minutes: 45, window: ((8, 0), (10, 0)) },
        OrderSpec { id: "WO-010", property: "P-110", lat: 39.6480, lng: -104.9878, priority: Priority::Medium, skills: &["inspection"], minutes: 30, window: ((10, 0), (16, 0)) },
        OrderSpec { id: "WO-011", property: "P-111", lat: 39.6172, lng: -104.9508, priority: Priority::Low, skills: &["general_maintenance"], minutes: 30, window: ((8, 0), (17, 0)) },
        OrderSpec { id: "WO-012", property: "P-112", lat: 39.6417, lng: -104.9589, priority: Priority::Medium, skills: &["hvac"], minutes: 60, window: ((11, 0), (16, 0)) },
        OrderSpec { id: "WO-013", property: "P-113", lat: 39.5372, lng: -104.8953, priority: Priority::High, skills: &["plumbing", "general_maintenance"], minutes: 75, window: ((9, 0), (14, 0)) },
        OrderSpec { id: "WO-014", property: "P-114", lat: 39.3722, lng: -104.8561, priority: Priority::Low, skills: &["inspection"], minutes: 30, window: ((8, 0), (17, 0)) },
        OrderSpec { id: "WO-015", property: "P-115", lat: 39.8853, lng: -104.9811, priority: Priority::Medium, skills: &["general_maintenance"], minutes: 45, window: ((8, 0), (17, 0)) },
    ];

    specs
        .into_iter()
        .map(|s| {
            WorkOrder::new(
                s.id,
                s.property,
                s.lat,
                s.lng,
                s.priority,
                s.minutes,
                window(s.window.0, s.window.1),
            )
            .with_required_skills(s.skills.iter().copied())
        })
        .collect()
}

fn denver_instance() -> ProblemInstance {
    let technicians = technicians();
    let work_orders = work_orders();
    let matrix = DistanceMatrix::from_locations(&problem_locations(&technicians, &work_orders))
        .expect("valid locations");
    ProblemInstance::new(work_orders, technicians, matrix).expect("valid instance")
}

fn ga_config() -> SolverConfig {
    SolverConfig::default()
        .with_population_size(50)
        .with_generations(150)
        .with_mutation_rate(0.15)
        .with_elite_size(5)
        .with_seed(42)
}

fn assert_partition(result: &OptimizationResult, problem: &ProblemInstance) {
    let mut assigned: Vec<&str> = result
        .routes()
        .iter()
        .flat_map(|r| r.stops().iter().map(|s| s.work_order_id.as_str()))
        .collect();
    let mut with_duplicates = assigned.clone();
    assigned.sort_unstable();
    assigned.dedup();
    with_duplicates.sort_unstable();
    assert_eq!(assigned, with_duplicates, "a work order appears twice");

    for id in result.unassigned_orders() {
        assert!(
            !assigned.contains(&id.as_str()),
            "{id} both assigned and unassigned"
        );
    }

    let mut all: Vec<&str> = assigned;
    all.extend(result.unassigned_orders().iter().map(String::as_str));
    all.sort_unstable();
    let mut expected: Vec<&str> = problem.work_orders().iter().map(|wo| wo.id()).collect();
    expected.sort_unstable();
    assert_eq!(all, expected, "assigned ∪ unassigned must cover all inputs");
}

fn assert_feasibility(result: &OptimizationResult, problem: &ProblemInstance) {
    let orders = problem.work_orders();
    for (tech_idx, route) in result.routes().iter().enumerate() {
        let tech = &problem.technicians()[tech_idx];

        for (pos, stop) in route.stops().iter().enumerate() {
            assert_eq!(stop.sequence, pos, "sequence must be contiguous from 0");

            let wo = orders
                .iter()
                .find(|wo| wo.id() == stop.work_order_id)
                .expect("stop references an input order");
            assert!(
                skill_match(tech.skills(), wo.required_skills()),
                "{} assigned {} without required skills",
                tech.id(),
                wo.id()
            );
            assert!(
                stop.arrival_time <= wo.time_window().end(),
                "{} arrives after window end",
                wo.id()
            );
            assert!(stop.arrival_time <= stop.departure_time);
            assert!(
                stop.departure_time <= tech.shift().end(),
                "{} departs after shift end",
                wo.id()
            );
        }

        let total_hours = (route.total_duration() + route.total_work_time()) / 60.0;
        assert!(
            total_hours <= tech.max_hours() + 0.01,
            "{} works {total_hours:.2}h over budget",
            tech.id()
        );
        assert!(route.utilization_percent() >= 0.0);
        assert!(route.utilization_percent() <= 100.0);
    }
}

fn assert_totals_consistent(result: &OptimizationResult) {
    let mut route_sum = 0.0;
    for route in result.routes() {
        let stop_sum: f64 = route.stops().iter().map(|s| s.travel_distance).sum();
        assert!(
            (route.total_distance() - stop_sum).abs() < 0.1,
            "route total {} != stop sum {stop_sum}",
            route.total_distance()
        );
        route_sum += route.total_distance();
    }
    assert!(
        (result.total_distance() - route_sum).abs() < 0.1,
        "result total {} != route sum {route_sum}",
        result.total_distance()
    );
}

#[test]
fn greedy_produces_valid_result() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");

    assert_eq!(result.algorithm(), "greedy");
    assert!(result.solve_time_seconds() >= 0.0);
    assert_eq!(result.routes().len(), problem.technicians().len());
}

#[test]
fn greedy_partition_holds() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");
    assert_partition(&result, &problem);
}

#[test]
fn greedy_routes_feasible() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");
    assert_feasibility(&result, &problem);
    assert_totals_consistent(&result);
}

#[test]
fn greedy_routes_pass_validator() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");

    let lookup = work_order_map(problem.work_orders());
    for (tech_idx, route) in result.routes().iter().enumerate() {
        let violations = validate_route(
            route.stops(),
            &problem.technicians()[tech_idx],
            &lookup,
        );
        assert!(
            violations.is_empty(),
            "validator flagged greedy route: {violations:?}"
        );
    }
}

#[test]
fn greedy_assigns_majority() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");

    assert!(
        result.num_assigned() * 2 >= problem.work_orders().len(),
        "only {} of {} assigned",
        result.num_assigned(),
        problem.work_orders().len()
    );
}

#[test]
fn greedy_assigns_all_emergencies() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");

    for id in ["WO-001", "WO-009"] {
        let assigned = result
            .routes()
            .iter()
            .any(|r| r.stops().iter().any(|s| s.work_order_id == id));
        assert!(assigned, "emergency {id} was not assigned");
    }
}

#[test]
fn greedy_nonempty_routes_have_positive_distance() {
    let problem = denver_instance();
    let result = GreedySolver::new(&problem, SolverConfig::default())
        .solve()
        .expect("solves");

    for route in result.routes() {
        if !route.is_empty() {
            assert!(route.total_distance() > 0.0);
        }
    }
}

#[test]
fn genetic_produces_valid_result() {
    let problem = denver_instance();
    let result = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");

    assert_eq!(result.algorithm(), "genetic");
    assert!(result.solve_time_seconds() >= 0.0);
    assert_eq!(result.routes().len(), problem.technicians().len());
}

#[test]
fn genetic_partition_holds() {
    let problem = denver_instance();
    let result = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");
    assert_partition(&result, &problem);
}

#[test]
fn genetic_routes_feasible() {
    let problem = denver_instance();
    let result = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");
    assert_feasibility(&result, &problem);
    assert_totals_consistent(&result);
}

#[test]
fn genetic_assigns_majority() {
    let problem = denver_instance();
    let result = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");

    assert!(
        result.num_assigned() * 2 >= problem.work_orders().len(),
        "only {} of {} assigned",
        result.num_assigned(),
        problem.work_orders().len()
    );
}

#[test]
fn genetic_fitness_improves() {
    let problem = denver_instance();
    let result = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");

    let initial = result.metadata()["initial_fitness"]
        .as_f64()
        .expect("numeric");
    let final_fitness = result.metadata()["final_fitness"]
        .as_f64()
        .expect("numeric");
    assert!(
        final_fitness <= initial,
        "fitness worsened: {initial} -> {final_fitness}"
    );
}

#[test]
fn genetic_deterministic_under_seed() {
    let problem = denver_instance();
    let a = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");
    let b = GeneticSolver::new(&problem, ga_config())
        .solve()
        .expect("solves");

    assert_eq!(a.total_distance(), b.total_distance());
    assert_eq!(a.unassigned_orders(), b.unassigned_orders());
    assert_eq!(a.metadata()["best_fitness"], b.metadata()["best_fitness"]);
    for (ra, rb) in a.routes().iter().zip(b.routes()) {
        assert_eq!(ra.stops(), rb.stops());
    }
}

#[cfg(feature = "ortools")]
mod cp_end_to_end {
    use super::*;
    use dispatch_routing::cp::CpSolver;

    fn cp_config() -> SolverConfig {
        SolverConfig::default().with_time_limit_seconds(10)
    }

    #[test]
    fn cp_produces_valid_result() {
        let problem = denver_instance();
        let result = CpSolver::new(&problem, cp_config()).solve().expect("solves");

        assert_eq!(result.algorithm(), "cp-vrp");
        assert_partition(&result, &problem);
        assert_feasibility(&result, &problem);
        assert_totals_consistent(&result);
    }

    #[test]
    fn cp_assigns_majority() {
        let problem = denver_instance();
        let result = CpSolver::new(&problem, cp_config()).solve().expect("solves");
        assert!(result.num_assigned() * 2 >= problem.work_orders().len());
    }

    #[test]
    fn cp_distance_competitive_with_greedy() {
        let problem = denver_instance();
        let greedy = GreedySolver::new(&problem, SolverConfig::default())
            .solve()
            .expect("solves");
        let cp = CpSolver::new(&problem, cp_config()).solve().expect("solves");

        // When the CP engine serves at least as many orders, its mileage
        // must not exceed greedy's by more than 5%.
        if cp.num_assigned() >= greedy.num_assigned() {
            assert!(
                cp.total_distance() <= greedy.total_distance() * 1.05,
                "cp {} mi vs greedy {} mi",
                cp.total_distance(),
                greedy.total_distance()
            );
        }
    }
}
