use clap::{Parser, ValueEnum};
use squirrel_cluster::config::{
    RunConfig, DEFAULT_SEED, DEFAULT_SQUIRRELS, DEFAULT_TOTAL_NUTS,
};
use squirrel_cluster::error::{SquirrelError, EXIT_FAULT};
use squirrel_cluster::executor::executor::SquirrelExecutor;
use squirrel_cluster::report::format::{render, ReportFormat};
use squirrel_cluster::report::verify::verify_ring;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum Format {
    /// One `Белка ...` line per squirrel
    Text,
    /// One JSON object per squirrel
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// Squirrels share out nuts, weigh them, and tell their ring neighbors.
#[derive(Parser, Debug)]
#[command(name = "squirrels")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of squirrels to launch.
    #[arg(short = 'n', long, env = "SQUIRRELS_WORKERS")]
    workers: Option<usize>,

    /// Number of squirrels the run must be launched with.
    #[arg(long, env = "SQUIRRELS_EXPECTED", default_value_t = DEFAULT_SQUIRRELS)]
    expected: usize,

    /// Total number of nuts to generate.
    #[arg(long, default_value_t = DEFAULT_TOTAL_NUTS)]
    nuts: usize,

    /// Seed for nut weights and partition cuts.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig::new(self.expected, self.nuts)
            .with_launched_workers(self.workers.unwrap_or(self.expected))
            .with_seed(self.seed)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<SquirrelError>() {
            Some(err) => {
                eprintln!("{}", err);
                if err.exit_code() == EXIT_FAULT {
                    tracing::error!("Internal fault, aborting every squirrel");
                }
                ExitCode::from(err.exit_code())
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(EXIT_FAULT)
            }
        },
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.run_config();
    let executor = SquirrelExecutor::new(config.clone())?;
    tracing::info!("Run {} starting", executor.run_id().0);

    let records = executor.run().await?;

    verify_ring(&records, config.expected_workers, config.total_nuts)
        .map_err(|e| anyhow::anyhow!("report self-check failed: {}", e))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in render(&records, cli.format.into())? {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
