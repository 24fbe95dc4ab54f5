use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use u_timetable::config::EngineConfig;
use u_timetable::scheduler::{GenerateRequest, TimetableKpi};
use u_timetable::store::{InMemoryStore, Snapshot};
use u_timetable::TimetableError;

#[derive(Parser)]
#[command(
    name = "u-timetable",
    about = "Exam timetabling and invigilator assignment",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the exam timetable for one semester and exam type.
    ///
    /// Reads a registry snapshot (courses, registrations, rooms, staff,
    /// existing bookings) as JSON and prints the run report as JSON.
    Generate {
        /// Snapshot JSON file
        #[arg(short, long)]
        input: PathBuf,
        /// First exam date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last exam date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Number of catalog windows used per day
        #[arg(short, long, default_value_t = 4)]
        windows: usize,
        #[arg(long)]
        exam_type: String,
        #[arg(long)]
        semester: String,
        /// Engine configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pretty-print the report
        #[arg(long)]
        pretty: bool,
    },
    /// Print the exam window catalog.
    Catalog {
        /// Engine configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("u_timetable=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            start,
            end,
            windows,
            exam_type,
            semester,
            config,
            pretty,
        } => {
            let config = load_config(config.as_deref())?;
            let request = GenerateRequest::new(start, end, windows, exam_type, semester);
            generate(&input, &request, &config, pretty)
        }
        Commands::Catalog { config } => {
            let config = load_config(config.as_deref())?;
            for w in config.catalog.windows() {
                println!(
                    "{:>3}  {}-{}  {:>4} min",
                    w.id,
                    w.start_label(),
                    w.end_label(),
                    w.duration_minutes
                );
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn generate(
    input: &Path,
    request: &GenerateRequest,
    config: &EngineConfig,
    pretty: bool,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read snapshot {}", input.display()))?;
    let snapshot = Snapshot::from_json_str(&text)
        .with_context(|| format!("invalid snapshot {}", input.display()))?;
    let rooms = snapshot.rooms.clone();
    let mut store = InMemoryStore::from_snapshot(snapshot);

    match u_timetable::generate(&mut store, request, config) {
        Ok(report) => {
            let kpi = TimetableKpi::calculate(
                &report,
                &rooms,
                request.day_count(),
                request.windows_per_day,
            );
            info!(
                placement_rate = kpi.placement_rate,
                seat_fill = kpi.seat_fill,
                room_slot_utilization = kpi.room_slot_utilization,
                duty_spread = kpi.duty_spread(),
                "timetable metrics"
            );
            println!("{}", report.to_json(pretty)?);
            Ok(())
        }
        Err(TimetableError::Persistence { report, source, .. }) => {
            println!("{}", report.to_json(pretty)?);
            Err(source).context("timetable computed but not persisted")
        }
        Err(e) => Err(e.into()),
    }
}
