use crate::model::{Assignment, CanCheck, Day, RideId, RideTimes, TimeRemaining, WorkerId};
use thiserror::Error;

/// Affectation complète et temps restant associé, gardés cohérents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySolution {
    pub assignment: Assignment,
    pub remaining: TimeRemaining,
}

impl DaySolution {
    /// Attractions actuellement confiées à `worker`.
    pub fn rides_of<'a>(&'a self, worker: &'a WorkerId) -> impl Iterator<Item = &'a RideId> + 'a {
        self.assignment
            .iter()
            .filter(move |(_, w)| *w == worker)
            .map(|(ride, _)| ride)
    }

    pub(super) fn apply(&mut self, transfer: &Transfer) {
        self.assignment
            .insert(transfer.ride.clone(), transfer.to.clone());
        if let Some(left) = self.remaining.get_mut(&transfer.from) {
            *left += transfer.time;
        }
        if let Some(left) = self.remaining.get_mut(&transfer.to) {
            *left -= transfer.time;
        }
    }
}

/// Transfert d'une attraction d'un contrôleur vers un autre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub ride: RideId,
    pub from: WorkerId,
    pub to: WorkerId,
    pub time: u32,
}

/// Aucune affectation ne respecte les contraintes de la journée.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "no assignment exists for worker_time={worker_time} ({} rides, {} workers)",
    .ride_times.len(),
    .can_check.len()
)]
pub struct Infeasible {
    pub worker_time: u32,
    pub ride_times: RideTimes,
    pub can_check: CanCheck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// attraction sans contrôleur
    Unassigned(RideId),
    /// attraction affectée mais inconnue du jour
    UnknownRide(RideId),
    /// contrôleur absent, inconnu ou non habilité
    NotCapable { ride: RideId, worker: WorkerId },
    /// budget de temps dépassé
    OverBudget {
        worker: WorkerId,
        assigned: u64,
        budget: u32,
    },
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("no assignment exists for day '{day}'")]
    NoDayAssignment {
        day: Day,
        #[source]
        source: Infeasible,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
