use super::{types::Transfer, DayProblem, DaySolution};
use crate::model::{RideId, WorkerId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Règle d'acceptation d'un transfert.
///
/// `A` : temps restant du receveur, `T` : temps restant du cédant, `d` : durée.
/// On transfère si `|(A - d) - (T + d)| < |A - T|` et `A > T`.
pub fn transfer_improves(accepting: u32, transferring: u32, ride_time: u32) -> bool {
    let a = i64::from(accepting);
    let t = i64::from(transferring);
    let d = i64::from(ride_time);
    let new_gap = (a - t - 2 * d).abs();
    let old_gap = (a - t).abs();
    new_gap < old_gap && a > t
}

/// Un tour de descente : applique le premier transfert améliorant trouvé.
pub(super) fn balance_round<R: Rng + ?Sized>(
    problem: &DayProblem<'_>,
    solution: &mut DaySolution,
    rng: &mut R,
) -> Option<Transfer> {
    let mut transferring: Vec<&WorkerId> = problem.can_check.keys().collect();
    transferring.shuffle(rng);

    for from in transferring {
        if let Some(transfer) = try_transfer_ride(problem, solution, from, rng) {
            tracing::trace!(
                ride = %transfer.ride,
                from = %transfer.from,
                to = %transfer.to,
                time = transfer.time,
                "ride transferred"
            );
            solution.apply(&transfer);
            return Some(transfer);
        }
    }
    None
}

fn try_transfer_ride<R: Rng + ?Sized>(
    problem: &DayProblem<'_>,
    solution: &DaySolution,
    from: &WorkerId,
    rng: &mut R,
) -> Option<Transfer> {
    let from_left = *solution.remaining.get(from)?;
    let mut rides: Vec<&RideId> = solution.rides_of(from).collect();
    rides.shuffle(rng);

    rides.into_iter().find_map(|ride| {
        let time = *problem.ride_times.get(ride)?;
        problem
            .can_check
            .iter()
            .filter(|(worker, allowed)| *worker != from && allowed.contains(ride))
            .find(|(worker, _)| {
                solution
                    .remaining
                    .get(*worker)
                    .is_some_and(|&left| transfer_improves(left, from_left, time))
            })
            .map(|(to, _)| Transfer {
                ride: ride.clone(),
                from: from.clone(),
                to: to.clone(),
                time,
            })
    })
}

/// Descente jusqu'à l'optimum local ; renvoie le nombre de transferts.
pub(super) fn balance<R: Rng + ?Sized>(
    problem: &DayProblem<'_>,
    solution: &mut DaySolution,
    rng: &mut R,
) -> usize {
    let mut transfers = 0usize;
    while balance_round(problem, solution, rng).is_some() {
        transfers += 1;
    }
    tracing::debug!(transfers, "balancing converged");
    transfers
}
