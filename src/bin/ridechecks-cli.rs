#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ridechecks::{
    io,
    model::{Day, DayInfo, RideId, Schedule, WorkerId},
    report::{HtmlTable, PlanRenderer, TextTable},
    scheduler::{day_inputs, DayProblem, Violation},
    storage::{JsonStorage, Storage},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'affectation des contrôles d'attractions
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration du parc
    #[arg(long, global = true, default_value = "park.json")]
    park: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer les durées des attractions depuis un CSV
    ImportRides {
        #[arg(long)]
        csv: String,
    },

    /// Importer les contrôleurs (et leurs interdictions) depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Configurer une journée
    SetDay {
        /// mon, tue, ... ou monday, tuesday, ...
        #[arg(long)]
        day: Day,
        /// Budget de temps par contrôleur (0 = parc fermé)
        #[arg(long)]
        time: u32,
        /// liste "worker1,worker2,..."
        #[arg(long)]
        unavail_workers: Option<String>,
        /// liste "ride1,ride2,..."
        #[arg(long)]
        unavail_rides: Option<String>,
    },

    /// Vérifier la cohérence de la configuration
    Validate,

    /// Générer le planning de la semaine
    Generate {
        /// Graine pour un résultat reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Nom des fichiers produits (défaut : ridechecks_<jj>_<mm>_<aaaa>)
        #[arg(long)]
        stem: Option<String>,
        #[arg(long)]
        no_html: bool,
    },

    /// Revérifier un planning exporté
    Check {
        #[arg(long)]
        schedule: String,
    },
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.park)?;
    let mut park = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::ImportRides { csv } => {
            let rides = io::import_rides_csv(csv)?;
            park.add_rides(rides);
            storage.save(&park)?;
            0
        }
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            park.add_workers(workers);
            storage.save(&park)?;
            0
        }
        Commands::SetDay {
            day,
            time,
            unavail_workers,
            unavail_rides,
        } => {
            let info = DayInfo {
                time,
                unavail_workers: split_list(unavail_workers)
                    .into_iter()
                    .map(WorkerId::new)
                    .collect(),
                unavail_rides: split_list(unavail_rides)
                    .into_iter()
                    .map(RideId::new)
                    .collect(),
            };
            park.set_day(day, info);
            park.validate()?;
            storage.save(&park)?;
            0
        }
        Commands::Validate => {
            park.validate()?;
            println!(
                "OK: {} rides, {} workers, {} days",
                park.rides.len(),
                park.workers_cannot_check.len(),
                park.days.len()
            );
            0
        }
        Commands::Generate {
            seed,
            out_dir,
            stem,
            no_html,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = park.plan_week(&mut rng)?;

            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating output directory {}", out_dir.display()))?;
            let stem = stem.unwrap_or_else(|| io::default_stem(Utc::now().date_naive()));
            let rides = park.ride_ids();
            let schedule = Schedule::new(plan, Some(seed));

            io::export_schedule_json(out_dir.join(format!("{stem}.json")), &schedule)?;
            io::export_plan_csv(
                out_dir.join(format!("{stem}.csv")),
                &schedule.days,
                &park.rides,
            )?;
            if !no_html {
                let html = HtmlTable.render(&schedule.days, &rides);
                std::fs::write(out_dir.join(format!("{stem}.html")), html)?;
            }

            print!("{}", TextTable.render(&schedule.days, &rides));
            println!("seed: {seed}");
            0
        }
        Commands::Check { schedule } => {
            park.validate()?;
            let schedule = io::load_schedule_json(schedule)?;
            let can_check = park.can_check();
            let mut found = 0usize;

            for (day, assignment) in &schedule.days {
                let Some(info) = park.days.get(day) else {
                    bail!("day '{day}' is not configured in {}", cli.park);
                };
                if info.is_closed() {
                    if !assignment.is_empty() {
                        eprintln!("{day}: park closed but {} rides assigned", assignment.len());
                        found += 1;
                    }
                    continue;
                }
                let (rides, workers) = day_inputs(&park.rides, &can_check, info);
                let problem = DayProblem::new(info.time, &rides, &workers);
                for v in problem.violations(assignment) {
                    eprintln!("{day}: {}", describe(&v));
                    found += 1;
                }
            }

            if found == 0 {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {found} violation(s)");
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn describe(v: &Violation) -> String {
    match v {
        Violation::Unassigned(ride) => format!("ride {ride} has no worker"),
        Violation::UnknownRide(ride) => format!("ride {ride} is not checked that day"),
        Violation::NotCapable { ride, worker } => {
            format!("worker {worker} cannot check ride {ride}")
        }
        Violation::OverBudget {
            worker,
            assigned,
            budget,
        } => format!("worker {worker} assigned {assigned} > {budget}"),
    }
}
