use anyhow::Result;
use clap::Parser;

use insurance_bootstrap::{run_command, AppContext, Command};
use insurance_infrastructure::CONFIG_ENV;

#[derive(Parser, Debug)]
#[command(name = "insurance-fraud")]
#[command(about = "Resolves insured item returns after raids", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Print counters in Prometheus text format after the command
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let context = AppContext::new().await?;
    run_command(&context.state, args.command).await?;
    if args.metrics {
        print!("{}", context.state.metrics.render_prometheus());
    }
    Ok(())
}
