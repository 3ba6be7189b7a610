#![forbid(unsafe_code)]
use rand::rngs::StdRng;
use rand::SeedableRng;
use ridechecks::scheduler::transfer_improves;
use ridechecks::{
    generate_day_assignment, Assignment, CanCheck, DayProblem, DaySolution, RideId, RideTimes,
    Violation, WorkerId,
};
use std::collections::BTreeSet;

fn rides(list: &[(&str, u32)]) -> RideTimes {
    list.iter().map(|(r, t)| (RideId::new(r), *t)).collect()
}

fn worker(name: &str, can: &[&str]) -> (WorkerId, BTreeSet<RideId>) {
    (WorkerId::new(name), can.iter().map(RideId::new).collect())
}

fn is_valid_assignment(
    assignment: &Assignment,
    worker_time: u32,
    ride_times: &RideTimes,
    can_check: &CanCheck,
) -> bool {
    if assignment.len() != ride_times.len() || !ride_times.keys().all(|r| assignment.contains_key(r)) {
        return false;
    }
    for worker in can_check.keys() {
        let used: u32 = assignment
            .iter()
            .filter(|(_, w)| *w == worker)
            .map(|(r, _)| ride_times[r])
            .sum();
        if used > worker_time {
            return false;
        }
    }
    assignment
        .iter()
        .all(|(ride, worker)| can_check.get(worker).is_some_and(|can| can.contains(ride)))
}

fn is_local_optimum(problem: &DayProblem<'_>, solution: &DaySolution) -> bool {
    solution.assignment.iter().all(|(ride, from)| {
        problem
            .can_check
            .iter()
            .filter(|(to, can)| *to != from && can.contains(ride))
            .all(|(to, _)| {
                !transfer_improves(
                    solution.remaining[to],
                    solution.remaining[from],
                    problem.ride_times[ride],
                )
            })
    })
}

fn small_park() -> (RideTimes, CanCheck) {
    let all: &[&str] = &["wooden", "scary", "slow", "fast"];
    (
        rides(&[("wooden", 10), ("scary", 1), ("slow", 1), ("fast", 5)]),
        [worker("bob", all), worker("john", all)].into_iter().collect(),
    )
}

#[test]
fn generate_day_assignment_basic() {
    let (ride_times, can_check) = small_park();
    let mut rng = StdRng::seed_from_u64(1);
    let assignment = generate_day_assignment(20, &ride_times, &can_check, &mut rng).unwrap();
    assert!(is_valid_assignment(&assignment, 20, &ride_times, &can_check));
}

#[test]
fn every_seed_gives_a_valid_assignment() {
    let ride_times = rides(&[("RA", 10), ("RB", 12), ("RC", 14), ("RD", 15), ("RE", 20)]);
    let can_check: CanCheck = [
        worker("WA", &["RA", "RB"]),
        worker("WB", &["RA", "RB", "RC", "RD", "RE"]),
        worker("WC", &["RE", "RD"]),
    ]
    .into_iter()
    .collect();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment = generate_day_assignment(30, &ride_times, &can_check, &mut rng)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));
        assert!(is_valid_assignment(&assignment, 30, &ride_times, &can_check));
    }
}

#[test]
fn task_longer_than_budget_is_infeasible_for_every_seed() {
    let ride_times = rides(&[("RA", 10)]);
    let can_check: CanCheck = [worker("WA", &["RA"])].into_iter().collect();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let err = generate_day_assignment(5, &ride_times, &can_check, &mut rng).unwrap_err();
        assert_eq!(err.worker_time, 5);
        assert_eq!(err.ride_times, ride_times);
        assert_eq!(err.can_check, can_check);
    }
}

#[test]
fn worker_without_capability_adds_no_capacity() {
    let ride_times = rides(&[("RA", 8), ("RB", 8)]);
    let can_check: CanCheck = [worker("WA", &["RA", "RB"]), worker("WB", &[])]
        .into_iter()
        .collect();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert!(generate_day_assignment(10, &ride_times, &can_check, &mut rng).is_err());
    }
}

#[test]
fn violations_report_over_budget_beyond_u32_range() {
    let ride_times = rides(&[("RA", 3_000_000_000), ("RB", 3_000_000_000)]);
    let can_check: CanCheck = [worker("WA", &["RA", "RB"])].into_iter().collect();
    let problem = DayProblem::new(4_000_000_000, &ride_times, &can_check);
    let assignment: Assignment = ride_times
        .keys()
        .map(|r| (r.clone(), WorkerId::new("WA")))
        .collect();

    assert_eq!(
        problem.violations(&assignment),
        vec![Violation::OverBudget {
            worker: WorkerId::new("WA"),
            assigned: 6_000_000_000,
            budget: 4_000_000_000,
        }]
    );
}

#[test]
fn empty_day_is_a_success_not_a_failure() {
    let mut rng = StdRng::seed_from_u64(0);
    let assignment =
        generate_day_assignment(10, &RideTimes::new(), &CanCheck::new(), &mut rng).unwrap();
    assert!(assignment.is_empty());
}

#[test]
fn rides_without_workers_are_infeasible() {
    let mut rng = StdRng::seed_from_u64(0);
    let ride_times = rides(&[("RA", 1)]);
    assert!(generate_day_assignment(10, &ride_times, &CanCheck::new(), &mut rng).is_err());
}

#[test]
fn search_needs_backtracking_to_succeed() {
    // RB ne peut aller que chez WA : RA doit donc finir chez WB
    let ride_times = rides(&[("RA", 6), ("RB", 6), ("RC", 4)]);
    let can_check: CanCheck = [worker("WA", &["RA", "RB", "RC"]), worker("WB", &["RA", "RC"])]
        .into_iter()
        .collect();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = DayProblem::new(10, &ride_times, &can_check);
        let solution = problem.search(&mut rng).unwrap();
        assert!(is_valid_assignment(&solution.assignment, 10, &ride_times, &can_check));
        assert_eq!(solution.assignment[&RideId::new("RB")], WorkerId::new("WA"));
    }
}

#[test]
fn search_keeps_remaining_times_consistent() {
    let (ride_times, can_check) = small_park();
    let problem = DayProblem::new(20, &ride_times, &can_check);
    let mut rng = StdRng::seed_from_u64(11);
    let solution = problem.search(&mut rng).unwrap();
    for (worker, left) in &solution.remaining {
        let used: u32 = solution.rides_of(worker).map(|r| ride_times[r]).sum();
        assert_eq!(*left + used, 20);
    }
}

#[test]
fn same_seed_same_assignment() {
    let (ride_times, can_check) = small_park();
    let a = generate_day_assignment(20, &ride_times, &can_check, &mut StdRng::seed_from_u64(42));
    let b = generate_day_assignment(20, &ride_times, &can_check, &mut StdRng::seed_from_u64(42));
    assert_eq!(a.unwrap(), b.unwrap());
}

#[test]
fn transfer_rule() {
    assert!(transfer_improves(10, 2, 3));
    assert!(transfer_improves(10, 2, 4));
    assert!(transfer_improves(10, 2, 5));
    assert!(!transfer_improves(10, 2, 8));
    assert!(!transfer_improves(2, 10, 1));
    assert!(!transfer_improves(5, 5, 1));
    // un transfert et son inverse ne sont jamais acceptés tous les deux
    assert!(transfer_improves(9, 3, 2));
    assert!(!transfer_improves(5, 7, 2));
}

#[test]
fn balance_reaches_local_optimum_from_skewed_start() {
    let names = ["r1", "r2", "r3", "r4", "r5", "r6"];
    let ride_times: RideTimes = names
        .iter()
        .zip(1u32..)
        .map(|(r, t)| (RideId::new(r), t))
        .collect();
    let can_check: CanCheck = [
        worker("WA", &names),
        worker("WB", &names),
        worker("WC", &names[..3]),
    ]
    .into_iter()
    .collect();
    let problem = DayProblem::new(30, &ride_times, &can_check);

    for seed in 0..30 {
        let mut solution = DaySolution {
            assignment: ride_times
                .keys()
                .map(|r| (r.clone(), WorkerId::new("WA")))
                .collect(),
            remaining: [("WA", 9), ("WB", 30), ("WC", 30)]
                .into_iter()
                .map(|(w, t)| (WorkerId::new(w), t))
                .collect(),
        };
        let before = max_gap(&solution);

        let mut rng = StdRng::seed_from_u64(seed);
        let transfers = problem.balance(&mut solution, &mut rng);

        assert!(transfers > 0);
        assert!(max_gap(&solution) <= before);
        assert!(is_valid_assignment(&solution.assignment, 30, &ride_times, &can_check));
        assert!(is_local_optimum(&problem, &solution));
        assert!(problem.balance_round(&mut solution, &mut rng).is_none());
    }
}

#[test]
fn solve_returns_balanced_valid_solutions() {
    let (ride_times, can_check) = small_park();
    let problem = DayProblem::new(20, &ride_times, &can_check);
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = problem.solve(&mut rng).unwrap();
        assert!(is_valid_assignment(&solution.assignment, 20, &ride_times, &can_check));
        assert!(is_local_optimum(&problem, &solution));
        assert!(problem.violations(&solution.assignment).is_empty());
    }
}

fn max_gap(solution: &DaySolution) -> u32 {
    let max = solution.remaining.values().max().copied().unwrap_or(0);
    let min = solution.remaining.values().min().copied().unwrap_or(0);
    max - min
}
