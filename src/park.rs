use crate::model::{Day, DayInfo, Park, RideId, RideTimes, WeekPlan, WorkerId};
use crate::scheduler::{generate_week_assignments, SchedError};
use anyhow::{bail, Result};
use rand::Rng;
use std::collections::BTreeMap;

impl Park {
    /// Vérifie la cohérence de la configuration avant toute génération.
    pub fn validate(&self) -> Result<()> {
        for (ride, time) in &self.rides {
            if ride.as_str().trim().is_empty() {
                bail!("ride name cannot be empty");
            }
            if *time == 0 {
                bail!("ride '{ride}' must take a positive time");
            }
        }

        for (worker, cannot_check) in &self.workers_cannot_check {
            if worker.as_str().trim().is_empty() {
                bail!("worker name cannot be empty");
            }
            for ride in cannot_check {
                if !self.rides.contains_key(ride) {
                    bail!(
                        "ride '{ride}' listed as not checkable by '{worker}' is not a known ride, check ride name"
                    );
                }
            }
        }

        for (day, info) in &self.days {
            for ride in &info.unavail_rides {
                if !self.rides.contains_key(ride) {
                    bail!(
                        "unavailable ride '{ride}' listed for day '{day}' is not a known ride, check ride name"
                    );
                }
            }
            for worker in &info.unavail_workers {
                if !self.workers_cannot_check.contains_key(worker) {
                    bail!(
                        "unavailable worker '{worker}' listed for day '{day}' is not a known worker, check worker name"
                    );
                }
            }
        }

        Ok(())
    }

    /// Valide puis génère les affectations de chaque jour configuré.
    pub fn plan_week<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WeekPlan, SchedError> {
        self.validate()?;
        generate_week_assignments(&self.days, &self.rides, &self.can_check(), rng)
    }

    pub fn add_rides(&mut self, rides: RideTimes) {
        self.rides.extend(rides);
    }

    pub fn add_workers(&mut self, workers: BTreeMap<WorkerId, Vec<RideId>>) {
        self.workers_cannot_check.extend(workers);
    }

    pub fn set_day(&mut self, day: Day, info: DayInfo) {
        self.days.insert(day, info);
    }
}
