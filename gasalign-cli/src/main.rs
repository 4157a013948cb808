use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use gasalign_core::align::{Aligner, MatchType};
use gasalign_core::io::{read_seq_lines, write_batch};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(author, version, about = "Genomic alignment of short sequences")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align query sequences against a target set and write a TSV report
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Query/read sequences, one per line, optionally gzipped
    #[arg(short, long)]
    queries: PathBuf,

    /// Target/guide sequences, one per line, optionally gzipped
    #[arg(short, long)]
    targets: PathBuf,

    /// Output to file, omit for stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum score to retain, regardless of rule penalties. A perfect
    /// match has score equal to query length
    #[arg(short = 'm', long = "minscore", default_value_t = 15)]
    minscore: i32,

    /// Rules for decreasing score based on allowed differences, e.g. MDI
    /// allows 1 base of mismatch, deletion and insertion. Repeatable
    #[arg(short = 'r', long = "rules", default_value = "M")]
    rules: Vec<String>,

    /// Try both orientations of reads
    #[arg(long = "rc", action = ArgAction::SetTrue, default_value_t = true, overrides_with = "no_rc")]
    rc: bool,

    /// Only align reads in the orientation given
    #[arg(long = "no-rc", action = ArgAction::SetTrue, overrides_with = "rc")]
    no_rc: bool,

    /// Set logging verbosity
    #[arg(short = 'l', long, default_value = "info", value_parser = ["off", "error", "warn", "info", "debug", "trace"])]
    loglevel: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(&args),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    init_logging(&args.loglevel)?;

    let targets = read_seq_lines(&args.targets)
        .with_context(|| format!("failed to load targets from {}", args.targets.display()))?;
    let queries = read_seq_lines(&args.queries)
        .with_context(|| format!("failed to load queries from {}", args.queries.display()))?;
    info!("loaded {} targets and {} queries", targets.len(), queries.len());

    let rev_comp = args.rc && !args.no_rc;
    let aligner = Aligner::new(targets, &args.rules, args.minscore, rev_comp, MatchType::Any)
        .context("invalid aligner configuration")?;
    let batch = aligner.align_queries(&queries, false);
    info!(
        "aligned {} queries: {} mapped ({:.1}%), {} unmapped",
        batch.total_reads(),
        batch.mapped.len(),
        batch.mapped_fraction() * 100.0,
        batch.unmapped.len()
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_batch(BufWriter::new(file), &batch)?;
        }
        None => {
            let stdout = io::stdout();
            write_batch(stdout.lock(), &batch)?;
        }
    }
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let level = LevelFilter::from_str(level).context("unrecognised log level")?;
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")?;
    Ok(())
}
