use super::{types::Infeasible, DayProblem, DaySolution};
use crate::model::{RideId, WorkerId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Pile de recherche : l'attraction `k` est affectée à la profondeur `k`.
struct Backtrack<'p> {
    rides: Vec<(&'p RideId, u32)>,
    workers: Vec<(&'p WorkerId, &'p BTreeSet<RideId>)>,
    owners: Vec<usize>,
    remaining: Vec<u32>,
    nodes: u64,
}

impl<'p> Backtrack<'p> {
    fn new(problem: &DayProblem<'p>) -> Self {
        let workers: Vec<_> = problem.can_check.iter().collect();
        Self {
            rides: problem.ride_times.iter().map(|(r, t)| (r, *t)).collect(),
            remaining: vec![problem.worker_time; workers.len()],
            owners: Vec::with_capacity(problem.ride_times.len()),
            workers,
            nodes: 0,
        }
    }

    fn extend<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(&(ride, time)) = self.rides.get(self.owners.len()) else {
            return true;
        };
        self.nodes += 1;

        let mut order: Vec<usize> = (0..self.workers.len()).collect();
        order.shuffle(rng);

        for w in order {
            let (_, allowed) = self.workers[w];
            if !allowed.contains(ride) || self.remaining[w] < time {
                continue;
            }
            self.remaining[w] -= time;
            self.owners.push(w);
            if self.extend(rng) {
                return true;
            }
            // rollback
            self.owners.pop();
            self.remaining[w] += time;
        }
        false
    }

    fn into_solution(self) -> DaySolution {
        let workers = &self.workers;
        let assignment = self
            .rides
            .iter()
            .zip(&self.owners)
            .map(|((ride, _), &w)| ((*ride).clone(), workers[w].0.clone()))
            .collect();
        let remaining = workers
            .iter()
            .zip(&self.remaining)
            .map(|((worker, _), left)| ((*worker).clone(), *left))
            .collect();
        DaySolution {
            assignment,
            remaining,
        }
    }
}

pub(super) fn search<R: Rng + ?Sized>(
    problem: &DayProblem<'_>,
    rng: &mut R,
) -> Result<DaySolution, Infeasible> {
    let mut state = Backtrack::new(problem);
    let found = state.extend(rng);
    tracing::debug!(
        rides = problem.ride_times.len(),
        workers = problem.can_check.len(),
        nodes = state.nodes,
        found,
        "feasibility search finished"
    );

    if !found {
        return Err(Infeasible {
            worker_time: problem.worker_time,
            ride_times: problem.ride_times.clone(),
            can_check: problem.can_check.clone(),
        });
    }
    Ok(state.into_solution())
}
