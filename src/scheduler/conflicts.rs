use super::{DayProblem, Violation};
use crate::model::{Assignment, WorkerId};
use std::collections::BTreeMap;

pub(super) fn detect_violations(problem: &DayProblem<'_>, assignment: &Assignment) -> Vec<Violation> {
    let mut out = Vec::new();

    for ride in problem.ride_times.keys() {
        if !assignment.contains_key(ride) {
            out.push(Violation::Unassigned(ride.clone()));
        }
    }

    // u64 : la somme de durées u32 d'un même contrôleur peut dépasser u32::MAX
    let mut used: BTreeMap<WorkerId, u64> = BTreeMap::new();
    for (ride, worker) in assignment {
        let Some(&time) = problem.ride_times.get(ride) else {
            out.push(Violation::UnknownRide(ride.clone()));
            continue;
        };
        let capable = problem
            .can_check
            .get(worker)
            .is_some_and(|allowed| allowed.contains(ride));
        if !capable {
            out.push(Violation::NotCapable {
                ride: ride.clone(),
                worker: worker.clone(),
            });
        }
        *used.entry(worker.clone()).or_default() += u64::from(time);
    }

    for (worker, assigned) in used {
        if assigned > u64::from(problem.worker_time) {
            out.push(Violation::OverBudget {
                worker,
                assigned,
                budget: problem.worker_time,
            });
        }
    }

    out
}
