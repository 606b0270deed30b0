//! u-serve CLI
//!
//! Runs ordering policies over a scenario file, or generates a synthetic
//! scenario.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use u_serve::config::SimulationConfig;
use u_serve::dispatching::PolicyKind;
use u_serve::generator::ScenarioGenerator;
use u_serve::models::Scenario;
use u_serve::scheduler::report::{write_reports, write_reports_json};
use u_serve::scheduler::ServiceReport;
use u_serve::simulation::Simulation;
use u_serve::ServeError;

#[derive(Parser, Debug)]
#[command(name = "u-serve")]
#[command(about = "Simulate single-server ordering policies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a scenario file and print one report per policy
    Run(RunArgs),
    /// Write a random scenario
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario file (`entry_turn id profit prep_time patience` per line)
    scenario: PathBuf,

    /// Policies to compare (comma-separated: fifo,lifo,maxp,spt)
    #[arg(short, long, value_delimiter = ',')]
    policy: Vec<PolicyKind>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First simulated turn
    #[arg(long)]
    first_turn: Option<u64>,

    /// Last simulated turn
    #[arg(long)]
    turn_limit: Option<u64>,

    /// Emit reports as JSON
    #[arg(long)]
    json: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of customers
    #[arg(short = 'n', long, default_value_t = 100)]
    customers: usize,

    /// Random seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Generate(args) => generate(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: RunArgs) -> Result<(), ServeError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_path(path)?,
        None => SimulationConfig::default(),
    };
    if !args.policy.is_empty() {
        config = config.with_policies(args.policy.clone());
    }
    if let Some(turn) = args.first_turn {
        config = config.with_first_turn(turn);
    }
    if let Some(turn) = args.turn_limit {
        config = config.with_turn_limit(turn);
    }

    let scenario = Scenario::from_path(&args.scenario)?;
    let simulation = Simulation::new(scenario, config)?;
    let reports: Vec<ServiceReport> = simulation
        .run_all()
        .into_iter()
        .map(|run| run.report)
        .collect();

    let writer = open_output(args.output.as_deref())?;
    if args.json {
        write_reports_json(writer, &reports)
    } else {
        write_reports(writer, &reports)
    }
}

fn generate(args: GenerateArgs) -> Result<(), ServeError> {
    let scenario = ScenarioGenerator::new(args.seed).generate(args.customers);
    let mut writer = open_output(args.output.as_deref())?;
    writer.write_all(scenario.to_records().as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ServeError> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(writer)
}
