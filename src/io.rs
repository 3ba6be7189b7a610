use crate::model::{RideId, RideTimes, Schedule, WeekPlan, WorkerId};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Import des durées depuis CSV: header `ride,time`
pub fn import_rides_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<RideTimes> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = RideTimes::new();
    for rec in rdr.records() {
        let rec = rec?;
        let ride = rec.get(0).context("missing ride")?.trim();
        let time = rec.get(1).context("missing time")?.trim();
        if ride.is_empty() {
            bail!("invalid ride row (empty name)");
        }
        let time: u32 = time
            .parse()
            .with_context(|| format!("invalid time for ride {ride}: expected a number"))?;
        if out.insert(RideId::new(ride), time).is_some() {
            bail!("duplicate ride {ride}");
        }
    }
    Ok(out)
}

/// Import des contrôleurs: header `worker[,cannot_check]`, liste séparée par `;`
pub fn import_workers_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<BTreeMap<WorkerId, Vec<RideId>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = BTreeMap::new();
    for rec in rdr.records() {
        let rec = rec?;
        let worker = rec.get(0).context("missing worker")?.trim();
        if worker.is_empty() {
            bail!("invalid worker row (empty name)");
        }
        let cannot_check = rec.get(1).map(parse_ride_list).unwrap_or_default();
        if out.insert(WorkerId::new(worker), cannot_check).is_some() {
            bail!("duplicate worker {worker}");
        }
    }
    Ok(out)
}

fn parse_ride_list(raw: &str) -> Vec<RideId> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(RideId::new)
        .collect()
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let schedule = serde_json::from_slice(&data)
        .with_context(|| format!("parsing schedule {}", path.display()))?;
    Ok(schedule)
}

/// Export CSV des affectations: header `day,ride,worker,time`
pub fn export_plan_csv<P: AsRef<Path>>(
    path: P,
    plan: &WeekPlan,
    ride_times: &RideTimes,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "ride", "worker", "time"])?;
    let mut buf = itoa::Buffer::new();
    for (day, assignment) in plan {
        for (ride, worker) in assignment {
            let time = match ride_times.get(ride) {
                Some(t) => buf.format(*t),
                None => "",
            };
            w.write_record([day.as_str(), ride.as_str(), worker.as_str(), time])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Nom de fichier par défaut : `ridechecks_<jj>_<mm>_<aaaa>`
pub fn default_stem(date: NaiveDate) -> String {
    format!("ridechecks_{}", date.format("%d_%m_%Y"))
}
