use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use drawforge::console::{self, LevelFilter};
use drawforge::{validate_with, DrawConfig, DrawSolver, SolveOptions};

use crate::input::{AssignmentsFile, GroupFile, InputError};
use crate::output;

#[derive(Parser, Debug)]
#[command(name = "drawforge")]
#[command(about = "Gift-exchange draws with couples and exclusions", long_about = None)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a receiver for every participant of a group
    #[command(alias = "d")]
    Draw(DrawArgs),
    /// Check an existing draw against a group
    #[command(alias = "v")]
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Group file (TOML, or JSON by extension)
    pub group_file: PathBuf,

    /// Solver configuration file (TOML, or YAML by extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible draw
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Allow two participants to draw each other when nothing else works
    #[arg(long)]
    pub allow_minimal_cycles: bool,

    /// Attempt budget of the randomized phase
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Show phase details
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Group file (TOML, or JSON by extension)
    pub group_file: PathBuf,

    /// Assignments file with `giver` / `receiver` entries
    pub assignments_file: PathBuf,

    /// Accept participants who drew each other
    #[arg(long)]
    pub allow_minimal_cycles: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Whether a command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn run(self) -> Result<Outcome, InputError> {
        match self.command {
            Commands::Draw(args) => draw(args),
            Commands::Validate(args) => validate(args),
        }
    }
}

impl DrawArgs {
    /// Loads the configuration file, then applies command-line overrides.
    pub fn config(&self) -> Result<DrawConfig, InputError> {
        let mut config = match &self.config {
            Some(path) => DrawConfig::load(path)?,
            None => DrawConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_random_seed(seed);
        }
        if self.allow_minimal_cycles {
            config = config.with_minimal_cycles(true);
        }
        if let Some(max_attempts) = self.max_attempts {
            config = config.with_max_attempts(max_attempts);
        }
        config.validate()?;
        Ok(config)
    }
}

fn draw(args: DrawArgs) -> Result<Outcome, InputError> {
    let config = args.config()?;
    let group = GroupFile::load(&args.group_file)?;

    if args.verbose {
        console::init_with_level(LevelFilter::DEBUG);
    } else if !args.json {
        console::init();
    }

    match DrawSolver::from_config(&config).solve(&group.participants, &group.exclusions) {
        Ok(result) => {
            output::print_draw(&group, &result, args.json);
            Ok(Outcome::Success)
        }
        Err(err) => {
            output::print_engine_error(&err, args.json);
            Ok(Outcome::Failure)
        }
    }
}

fn validate(args: ValidateArgs) -> Result<Outcome, InputError> {
    let group = GroupFile::load(&args.group_file)?;
    let file = AssignmentsFile::load(&args.assignments_file)?;
    let options = SolveOptions::default().with_minimal_cycles(args.allow_minimal_cycles);

    match validate_with(&group.participants, &group.exclusions, &file.assignments, &options) {
        Ok(report) => {
            output::print_report(&report, args.json);
            Ok(if report.is_valid() {
                Outcome::Success
            } else {
                Outcome::Failure
            })
        }
        Err(err) => {
            output::print_engine_error(&err, args.json);
            Ok(Outcome::Failure)
        }
    }
}
