mod balance;
mod conflicts;
mod search;
mod types;
mod util;
mod week;

pub use balance::transfer_improves;
pub use types::{DaySolution, Infeasible, SchedError, Transfer, Violation};
pub use util::without_keys;
pub use week::{day_inputs, generate_week_assignments};

use crate::model::{Assignment, CanCheck, RideTimes};
use rand::Rng;

/// Problème d'une journée : budget commun, durées, habilitations.
#[derive(Debug, Clone, Copy)]
pub struct DayProblem<'a> {
    pub worker_time: u32,
    pub ride_times: &'a RideTimes,
    pub can_check: &'a CanCheck,
}

impl<'a> DayProblem<'a> {
    pub fn new(worker_time: u32, ride_times: &'a RideTimes, can_check: &'a CanCheck) -> Self {
        Self {
            worker_time,
            ride_times,
            can_check,
        }
    }

    /// Recherche en profondeur randomisée d'une affectation complète.
    pub fn search<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DaySolution, Infeasible> {
        search::search(self, rng)
    }

    pub fn balance_round<R: Rng + ?Sized>(
        &self,
        solution: &mut DaySolution,
        rng: &mut R,
    ) -> Option<Transfer> {
        balance::balance_round(self, solution, rng)
    }

    pub fn balance<R: Rng + ?Sized>(&self, solution: &mut DaySolution, rng: &mut R) -> usize {
        balance::balance(self, solution, rng)
    }

    /// Recherche puis équilibrage jusqu'à l'optimum local.
    pub fn solve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DaySolution, Infeasible> {
        let mut solution = self.search(rng)?;
        self.balance(&mut solution, rng);
        Ok(solution)
    }

    pub fn violations(&self, assignment: &Assignment) -> Vec<Violation> {
        conflicts::detect_violations(self, assignment)
    }
}

/// Point d'entrée du moteur pour une journée.
pub fn generate_day_assignment<R: Rng + ?Sized>(
    worker_time: u32,
    ride_times: &RideTimes,
    can_check: &CanCheck,
    rng: &mut R,
) -> Result<Assignment, Infeasible> {
    DayProblem::new(worker_time, ride_times, can_check)
        .solve(rng)
        .map(|solution| solution.assignment)
}
