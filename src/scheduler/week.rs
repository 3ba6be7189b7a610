use super::{generate_day_assignment, util::without_keys, SchedError};
use crate::model::{Assignment, CanCheck, Day, DayInfo, RideId, RideTimes, WeekPlan};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Restreint les attractions et contrôleurs à ceux disponibles ce jour-là.
///
/// Les attractions fermées disparaissent aussi des habilitations restantes.
pub fn day_inputs(
    ride_times: &RideTimes,
    can_check: &CanCheck,
    info: &DayInfo,
) -> (RideTimes, CanCheck) {
    let rides = without_keys(ride_times, &info.unavail_rides);
    let workers: CanCheck = without_keys(can_check, &info.unavail_workers)
        .into_iter()
        .map(|(worker, allowed)| {
            let allowed: BTreeSet<RideId> = allowed
                .into_iter()
                .filter(|ride| rides.contains_key(ride))
                .collect();
            (worker, allowed)
        })
        .collect();
    (rides, workers)
}

/// Génère une affectation par jour, dans l'ordre du calendrier.
///
/// Un jour à budget nul (parc fermé) reçoit une affectation vide sans
/// solliciter le moteur. Le premier jour infaisable interrompt la semaine.
pub fn generate_week_assignments<R: Rng + ?Sized>(
    days: &BTreeMap<Day, DayInfo>,
    ride_times: &RideTimes,
    can_check: &CanCheck,
    rng: &mut R,
) -> Result<WeekPlan, SchedError> {
    let mut plan = WeekPlan::new();

    for (&day, info) in days {
        if info.is_closed() {
            tracing::info!(%day, "park closed, no checks to assign");
            plan.insert(day, Assignment::new());
            continue;
        }

        let (rides, workers) = day_inputs(ride_times, can_check, info);
        let assignment = generate_day_assignment(info.time, &rides, &workers, rng)
            .map_err(|source| SchedError::NoDayAssignment { day, source })?;
        tracing::info!(%day, rides = assignment.len(), "day assigned");
        plan.insert(day, assignment);
    }

    Ok(plan)
}
