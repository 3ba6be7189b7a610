#![forbid(unsafe_code)]
//! Ridechecks — affectation des contrôles quotidiens d'attractions.
//!
//! - Recherche en profondeur randomisée d'une affectation faisable.
//! - Équilibrage par transferts successifs jusqu'à un optimum local.
//! - Orchestration par jour (attractions fermées, absents, parc fermé).
//! - Stockage fichiers (JSON/CSV) et rendu HTML/texte en dehors du moteur.

pub mod io;
pub mod model;
pub mod park;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use model::{
    Assignment, CanCheck, Day, DayInfo, Park, RideId, RideTimes, Schedule, TimeRemaining,
    WeekPlan, WorkerId,
};
pub use report::{HtmlTable, PlanRenderer, TextTable};
pub use scheduler::{
    generate_day_assignment, generate_week_assignments, DayProblem, DaySolution, Infeasible,
    SchedError, Transfer, Violation,
};
pub use storage::{JsonStorage, Storage};
