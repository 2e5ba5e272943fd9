//! Job Application Co-Pilot: CLI entrypoint.
//! Collects resume + job posting text (files or paste), runs the matching
//! engine and writes `packet.md`, `changes.json` and `score.json` into a fresh
//! run folder.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use job_copilot::banks::{Banks, ENV_BANKS_PATH};
use job_copilot::input::{gather_inputs, InputSource};
use job_copilot::report::{make_run_dir, write_outputs, InputStats, VERSION};
use job_copilot::Copilot;

#[derive(Parser, Debug)]
#[command(name = "job-copilot", version)]
#[command(
    about = "Job Application Co-Pilot: compare a resume with a job posting and generate a packet.",
    long_about = None
)]
struct Cli {
    /// Path to a resume .txt file (paste mode unless --job is given too).
    #[arg(long, short = 'r')]
    resume: Option<PathBuf>,

    /// Path to a job posting .txt file (paste mode unless --resume is given too).
    #[arg(long, short = 'j')]
    job: Option<PathBuf>,

    /// Output base directory; each run is saved into <out>/run_YYYYMMDD_HHMMSS/.
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// In paste mode, fall back to resume.txt / job_posting.txt when a paste is empty.
    #[arg(long)]
    fallback_default_files: bool,

    /// TOML file overriding the keyword / signal / stopword / red-flag banks.
    #[arg(long, env = ENV_BANKS_PATH)]
    banks: Option<PathBuf>,
}

/// Compact logs on stderr; RUST_LOG overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("job_copilot=info,copilot=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let banks = match &cli.banks {
        Some(path) => Banks::from_path(path)?,
        None => Banks::from_toml()?,
    };
    let copilot = Copilot::new(banks)?;

    let fallback_dir = cli.fallback_default_files.then(|| PathBuf::from("."));
    let source = InputSource::from_args(cli.resume, cli.job, fallback_dir);
    let stdin = io::stdin();
    let inputs = gather_inputs(&source, &mut stdin.lock(), &mut io::stdout())?;

    let stats = [
        InputStats::new("resume", &inputs.resume),
        InputStats::new("job", &inputs.job),
    ];

    let packet = copilot.run(&inputs.resume, &inputs.job);

    let run_dir = make_run_dir(&cli.out, chrono::Utc::now())?;
    let written = write_outputs(&packet, &run_dir, &stats)
        .with_context(|| format!("writing report into {}", run_dir.display()))?;
    info!(dir = %written.dir.display(), edits = packet.suggested_edits.len(), "packet written");

    println!("\u{2705} Done. Generated:");
    println!("- {}", written.packet.display());
    println!("- {}", written.changes.display());
    println!("- {}", written.score.display());
    println!("Version: {VERSION}");
    Ok(())
}

fn main() -> ExitCode {
    // Load .env when present (COPILOT_BANKS_PATH, COPILOT_DEV_LOG, RUST_LOG).
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "run failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
