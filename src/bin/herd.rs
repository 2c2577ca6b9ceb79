//! Herd projection CLI
//!
//! Projects a herd and saves the run, lists saved runs, and scores a saved
//! run against observed counts from a CSV file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use herd_projection::evaluation::{AccuracyEvaluator, ComparisonReport};
use herd_projection::observations::CsvObservations;
use herd_projection::projection::write_points_csv;
use herd_projection::{
    CohortModel, ProjectionConfig, ProjectionEngine, ProjectionParameters, ProjectionPoint,
    RunStore, SqliteStore,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "herd")]
#[command(about = "Fibonacci-based cattle herd projection and validation")]
struct Cli {
    /// Run database
    #[arg(long, global = true, default_value = "herd_runs.sqlite")]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the herd forward and save the run
    Project(ProjectArgs),
    /// List saved runs, newest first
    Runs,
    /// Print a saved run
    Show {
        #[arg(long)]
        run_id: i64,
    },
    /// Compare a saved run with observed totals
    Compare {
        #[arg(long)]
        run_id: i64,
        /// CSV with Year and Actual_Total columns
        #[arg(long)]
        actual: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ProjectArgs {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    params: Option<PathBuf>,
    /// Initial breeding females
    #[arg(long)]
    b0: Option<f64>,
    /// Initial young females
    #[arg(long)]
    y0: Option<f64>,
    /// Transition coefficient
    #[arg(long)]
    c: Option<f64>,
    /// Birth coefficient (mortality rate for the survival model)
    #[arg(long)]
    m: Option<f64>,
    /// Years to project
    #[arg(long)]
    horizon: Option<u32>,
    /// fibonacci | survival_adjusted
    #[arg(long, default_value = "fibonacci")]
    model: CohortModel,
    /// Round each projected year to whole animals
    #[arg(long)]
    round: bool,
    /// Also write the projection to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print only, do not save the run
    #[arg(long)]
    no_save: bool,
}

impl ProjectArgs {
    fn parameters(&self) -> Result<ProjectionParameters> {
        let mut params = match &self.params {
            Some(path) => ProjectionParameters::from_json_file(path)
                .with_context(|| format!("reading parameters from {}", path.display()))?,
            None => ProjectionParameters::default(),
        };
        params.b0 = self.b0.unwrap_or(params.b0);
        params.y0 = self.y0.unwrap_or(params.y0);
        params.c = self.c.unwrap_or(params.c);
        params.m = self.m.unwrap_or(params.m);
        params.horizon = self.horizon.unwrap_or(params.horizon);
        Ok(params)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = SqliteStore::open(&cli.db)
        .with_context(|| format!("opening run database {}", cli.db.display()))?;

    match cli.command {
        Command::Project(args) => run_project(&mut store, &args)?,
        Command::Runs => run_list(&store)?,
        Command::Show { run_id } => {
            let run = store.load(run_id)?;
            println!("Run {} ({})", run.id, run.created_at.format("%Y-%m-%d %H:%M:%S"));
            print_parameters(&run.params, &run.config);
            print_points(&run.points);
        }
        Command::Compare { run_id, actual } => run_compare(&store, run_id, actual)?,
    }

    store.close()?;
    Ok(())
}

fn run_project(store: &mut SqliteStore, args: &ProjectArgs) -> Result<()> {
    let params = args.parameters()?;
    let config = ProjectionConfig {
        model: args.model,
        round_to_whole_animals: args.round,
    };

    let engine = ProjectionEngine::new(config);
    let points = engine.project(&params)?;

    print_parameters(&params, &config);
    print_points(&points);

    if let Some(path) = &args.output {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_points_csv(file, &points)?;
        println!("Projection written to {}", path.display());
    }

    if !args.no_save {
        let id = store.save(&params, &config, &points)?;
        println!("Saved as run {}", id);
    }
    Ok(())
}

fn run_list(store: &SqliteStore) -> Result<()> {
    let runs = store.list()?;
    if runs.is_empty() {
        println!("No projections saved yet. Run `herd project` first.");
        return Ok(());
    }

    println!("{:<6} {:<20} {:>8} {:>8} {:>6} {:>6} {:>7} {:<18}",
             "ID", "Run Date", "B0", "Y0", "C", "m", "Horizon", "Model");
    for run in &runs {
        println!("{:<6} {:<20} {:>8.1} {:>8.1} {:>6.3} {:>6.3} {:>7} {:<18}",
                 run.id,
                 run.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                 run.params.b0,
                 run.params.y0,
                 run.params.c,
                 run.params.m,
                 run.params.horizon,
                 run.config.model.as_str());
    }
    Ok(())
}

fn run_compare(store: &SqliteStore, run_id: i64, actual: PathBuf) -> Result<()> {
    let run = store.load(run_id)?;
    let evaluator = AccuracyEvaluator::new(CsvObservations::new(&actual));
    let report = evaluator
        .compare(&run.points)
        .with_context(|| format!("loading observations from {}", actual.display()))?;

    print_report(&report);
    Ok(())
}

fn print_parameters(params: &ProjectionParameters, config: &ProjectionConfig) {
    println!("B0={} Y0={} C={} m={} horizon={} model={}{}",
             params.b0, params.y0, params.c, params.m, params.horizon,
             config.model.as_str(),
             if config.round_to_whole_animals { " (whole animals)" } else { "" });
}

fn print_points(points: &[ProjectionPoint]) {
    println!("{:<6} {:>14} {:>14} {:>14}", "Year", "Breeders", "Juveniles", "Total");
    for p in points {
        println!("{:<6} {:>14.2} {:>14.2} {:>14.2}", p.period, p.breeding, p.young, p.total);
    }
}

fn print_report(report: &ComparisonReport) {
    println!("{:<6} {:>14} {:>14}", "Year", "Projected", "Actual");
    for row in &report.rows {
        let actual = row.actual.map_or("-".to_string(), |v| format!("{:.2}", v));
        println!("{:<6} {:>14.2} {:>14}", row.period, row.projected, actual);
    }
    if !report.unprojected.is_empty() {
        println!("Observed years beyond the projection (not scored): {:?}", report.unprojected);
    }

    println!();
    match &report.mae {
        Ok(mae) => println!("Mean Absolute Error (MAE):             {:.2} cows", mae),
        Err(e) => println!("Mean Absolute Error (MAE):             unavailable ({})", e),
    }
    match &report.mape {
        Ok(mape) => println!("Mean Absolute Percentage Error (MAPE): {:.2} %", mape),
        Err(e) => println!("Mean Absolute Percentage Error (MAPE): unavailable ({})", e),
    }
    println!("Comparison calculated over {} years of observed data.", report.scored_rows());
}
