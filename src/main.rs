use std::{fs::File, io, ops::RangeInclusive, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use raf_theory::{
    alphabet::Alphabet,
    catalysis::Uniform,
    graph::ClosureMode,
    scenario::Scenario,
    sweep::{write_sweep, SweepConfig},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catalyze one chemistry and report its maximal RAF.
    Single(SingleArgs),
    /// Sweep polymer lengths and catalysis probabilities, writing CSV.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct ChemistryArgs {
    /// Monomer symbols, e.g. "AB" or "A,B".
    #[arg(short, long, default_value = "AB")]
    alphabet: Alphabet,

    /// Every polymer no longer than this is food.
    #[arg(long, default_value_t = 2)]
    food_length: usize,

    /// Explicit food polymers; overrides --food-length.
    #[arg(long, value_delimiter = ',')]
    food: Vec<String>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = ClosureMode::Worklist)]
    closure: ClosureMode,
}

#[derive(Args, Debug)]
struct SingleArgs {
    #[command(flatten)]
    chemistry: ChemistryArgs,

    #[arg(short, long, default_value_t = 4)]
    max_length: usize,

    /// Probability that a given polymer catalyzes a given reaction.
    #[arg(short, long)]
    probability: f64,

    /// List every reaction in the RAF.
    #[arg(long)]
    list: bool,

    /// Print the RAF as a Graphviz DOT graph.
    #[arg(long)]
    dot: bool,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    chemistry: ChemistryArgs,

    #[arg(long, default_value_t = 2)]
    min_length: usize,

    #[arg(long, default_value_t = 6)]
    max_length: usize,

    #[arg(long, default_value_t = 0.00001)]
    p_start: f64,

    #[arg(long, default_value_t = 0.15)]
    p_end: f64,

    #[arg(long, default_value_t = 0.001)]
    p_step: f64,

    /// Trials per (length, probability) cell.
    #[arg(short, long, default_value_t = 1000)]
    runs: usize,

    /// CSV destination; stdout if absent.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Single(args) => single(args),
        Command::Sweep(args) => sweep(args),
    }
}

fn single(args: SingleArgs) -> Result<()> {
    let chem = args.chemistry;
    let scenario = Scenario::build(chem.alphabet, args.max_length)
        .context("Failed to build chemistry")?;

    let food = if chem.food.is_empty() {
        let ids = scenario.polymers().up_to_length(chem.food_length);
        ids.iter()
            .map(|id| scenario.polymers()[id].to_string())
            .collect()
    } else {
        chem.food
    };

    let mut rng = ChaCha8Rng::seed_from_u64(chem.seed);
    let graph = scenario
        .catalyze(&Uniform(args.probability), &food, &mut rng)
        .context("Failed to catalyze chemistry")?;
    let raf = graph.raf_with(chem.closure);
    info!(
        polymers = scenario.polymers().len(),
        reactions = scenario.reactions().len(),
        passes = raf.passes(),
        "closure done"
    );

    if args.dot {
        println!("{}", graph.info(Some(raf.reaction_set())));
        return Ok(());
    }

    println!("{}", raf.len());
    if args.list {
        for id in raf.reactions() {
            println!("{}", scenario.reactions()[id].describe(scenario.polymers()));
        }
    }
    Ok(())
}

fn sweep(args: SweepArgs) -> Result<()> {
    let chem = args.chemistry;
    if !chem.food.is_empty() {
        bail!("--food is not supported by sweep; use --food-length");
    }

    let lengths: RangeInclusive<usize> = args.min_length..=args.max_length;
    let config = SweepConfig {
        alphabet: chem.alphabet,
        lengths,
        p_start: args.p_start,
        p_end: args.p_end,
        p_step: args.p_step,
        runs: args.runs,
        food_length: chem.food_length,
        seed: chem.seed,
        mode: chem.closure,
    };

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Could not create {}", path.display()))?;
            write_sweep(&config, file)
        }
        None => write_sweep(&config, io::stdout().lock()),
    }
}
