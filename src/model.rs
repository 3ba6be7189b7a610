use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Identifiant fort pour une attraction (ride)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RideId(String);

impl RideId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour un contrôleur (worker)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durée de contrôle de chaque attraction.
pub type RideTimes = BTreeMap<RideId, u32>;
/// Attractions que chaque contrôleur a le droit de contrôler.
pub type CanCheck = BTreeMap<WorkerId, BTreeSet<RideId>>;
/// Affectation complète `{ride: worker}` pour une journée.
pub type Assignment = BTreeMap<RideId, WorkerId>;
/// Temps restant par contrôleur.
pub type TimeRemaining = BTreeMap<WorkerId, u32>;
/// Affectations de la semaine, triées dans l'ordre du calendrier.
pub type WeekPlan = BTreeMap<Day, Assignment>;

/// Jour de la semaine (l'ordre dérivé suit le calendrier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weekday: Weekday = s
            .trim()
            .parse()
            .map_err(|_| format!("unknown day: {s}"))?;
        Ok(Day::from(weekday))
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

/// Informations d'une journée : budget de temps, attractions fermées, absents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInfo {
    pub time: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavail_workers: Vec<WorkerId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unavail_rides: Vec<RideId>,
}

impl DayInfo {
    pub fn new(time: u32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Parc fermé ce jour-là : aucune affectation à produire.
    pub fn is_closed(&self) -> bool {
        self.time == 0
    }
}

/// Configuration persistée du parc
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Park {
    #[serde(default)]
    pub rides: RideTimes,
    /// Pour chaque contrôleur, les attractions qu'il ne peut PAS contrôler.
    #[serde(default)]
    pub workers_cannot_check: BTreeMap<WorkerId, Vec<RideId>>,
    #[serde(default)]
    pub days: BTreeMap<Day, DayInfo>,
}

impl Park {
    /// Inverse `workers_cannot_check` : toutes les attractions moins les interdites.
    pub fn can_check(&self) -> CanCheck {
        self.workers_cannot_check
            .iter()
            .map(|(worker, cannot)| {
                let allowed = self
                    .rides
                    .keys()
                    .filter(|ride| !cannot.contains(ride))
                    .cloned()
                    .collect();
                (worker.clone(), allowed)
            })
            .collect()
    }

    pub fn ride_ids(&self) -> Vec<RideId> {
        self.rides.keys().cloned().collect()
    }
}

/// Planning généré, tel qu'exporté sur disque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub days: WeekPlan,
}

impl Schedule {
    pub fn new(days: WeekPlan, seed: Option<u64>) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            days,
        }
    }
}
