use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "proscale",
    about = "proscale — predictive/reactive autoscaling decision engine",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a load simulation through the decision engine.
    ///
    /// Generates a synthetic traffic pattern (or replays a JSON trace of
    /// recorded samples) and prints one decision per tick plus a final
    /// cost summary against the fixed-fleet baseline.
    Simulate {
        /// Path to proscale.toml (defaults apply if absent).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of ticks to simulate (overrides the config file).
        #[arg(long)]
        steps: Option<u64>,
        /// Traffic pattern: smooth, spike, or daily (overrides the config file).
        #[arg(long)]
        pattern: Option<String>,
        /// Replica count at tick 0 (overrides the config file).
        #[arg(long)]
        initial_replicas: Option<u32>,
        /// Replay a JSON trace instead of generating traffic.
        #[arg(long, conflicts_with_all = ["steps", "pattern"])]
        replay: Option<PathBuf>,
        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Pace the run in real time, this many milliseconds per tick.
        #[arg(long)]
        tick_ms: Option<u64>,
    },
    /// Evaluate a single tick and print the decision.
    Decide {
        /// Observed load (requests per tick).
        #[arg(long)]
        current_load: f64,
        /// Forecast load for the same tick.
        #[arg(long)]
        forecast_load: f64,
        /// Current replica count.
        #[arg(long)]
        replicas: u32,
        /// Path to proscale.toml (defaults apply if absent).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format: text or json.
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write a proscale.toml scaffold with all defaults spelled out.
    Init {
        /// Directory to write proscale.toml into.
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,proscale=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            steps,
            pattern,
            initial_replicas,
            replay,
            format,
            tick_ms,
        } => {
            commands::simulate::run(commands::simulate::SimulateArgs {
                config,
                steps,
                pattern,
                initial_replicas,
                replay,
                format,
                tick_ms,
            })
            .await
        }
        Commands::Decide {
            current_load,
            forecast_load,
            replicas,
            config,
            format,
        } => commands::decide::run(current_load, forecast_load, replicas, config, &format),
        Commands::Init { path } => commands::init::run(&path),
    }
}
