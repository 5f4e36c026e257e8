// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line front end.
//!
//! ```text
//! soroban brothers --digits 4 --steps 7 --count 10
//! soroban friends --digits 9 --only-subtraction --json
//! soroban mix --digits 6,7,8,9 --width 2 --steps 5..8 --seed 42
//! ```
//!
//! Log level comes from `RUST_LOG`, or `--verbose`; logs go to stderr.

use clap::Parser;
use soroban_gen::{
    generate_batch_with_statistics, DirectionRestriction, ExampleOutput, RuleConfig, RuleFamily,
    StepCount,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "soroban", version, about = "Generate soroban practice sequences")]
struct Args {
    /// Rule family: simple, brothers, friends or mix.
    family: RuleFamily,

    /// Trained digits, comma separated. Defaults per family.
    #[arg(short, long, value_delimiter = ',')]
    digits: Vec<u8>,

    /// Digits allowed in plain steps, comma separated.
    #[arg(long, value_delimiter = ',')]
    plain_digits: Vec<u8>,

    /// Number of digits per action.
    #[arg(short, long, default_value_t = 1)]
    width: usize,

    /// Steps per exercise, "7" or "5..9".
    #[arg(short, long)]
    steps: Option<StepCount>,

    /// Direction of composite steps: addition, subtraction or mixed.
    #[arg(long, conflicts_with_all = ["only_addition", "only_subtraction"])]
    direction: Option<DirectionRestriction>,

    #[arg(long)]
    only_addition: bool,

    #[arg(long)]
    only_subtraction: bool,

    /// Minimum number of composite steps per exercise.
    #[arg(long)]
    min_special: Option<usize>,

    /// Probability of attempting a composite step on an unforced step.
    #[arg(long)]
    special_rate: Option<f64>,

    /// Randomized attempts before falling back to directed synthesis.
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Number of exercises.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON instead of one line per exercise.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<RuleConfig, soroban_gen::ConfigError> {
        let mut builder = RuleConfig::builder(self.family)
            .action_width(self.width)
            .only_addition(self.only_addition)
            .only_subtraction(self.only_subtraction);
        if let Some(direction) = self.direction {
            builder = builder.direction(direction);
        }
        if !self.digits.is_empty() {
            builder = builder.trained_digits(self.digits.iter().copied());
        }
        if !self.plain_digits.is_empty() {
            builder = builder.plain_digits(self.plain_digits.iter().copied());
        }
        if let Some(steps) = self.steps {
            builder = builder.steps(steps);
        }
        if let Some(quota) = self.min_special {
            builder = builder.min_special(quota);
        }
        if let Some(rate) = self.special_rate {
            builder = builder.special_rate(rate);
        }
        if let Some(attempts) = self.max_attempts {
            builder = builder.max_attempts(attempts);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "soroban=info,soroban_gen=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match args.config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("soroban: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (examples, statistics) = generate_batch_with_statistics(&config, args.count);
    info!("{statistics}");

    if args.json {
        let outputs: Vec<ExampleOutput> = examples.iter().map(|e| e.to_output()).collect();
        match serde_json::to_string_pretty(&outputs) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!(%err, "failed to serialize examples");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for example in &examples {
            if example.is_best_effort() {
                println!("{example}  (best effort)");
            } else {
                println!("{example}");
            }
        }
    }
    ExitCode::SUCCESS
}
