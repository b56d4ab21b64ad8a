use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::audit::AuditArgs;
use commands::render::RenderArgs;

#[derive(Parser)]
#[command(name = "tsuki")]
#[command(about = "Dynamic security probing for deployed contracts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured probes against a scenario target and persist both
    /// report artifacts.
    Audit(AuditArgs),

    /// List the registered probes.
    Probes,

    /// Re-render a stored JSON report as markdown.
    Render(RenderArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Audit(args) => {
            let risk = commands::audit::execute(args)?;
            // HIGH risk gates CI: make the process exit status say so.
            if risk == tsuki_probes::Severity::High {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Probes => commands::probes::execute(),
        Commands::Render(args) => commands::render::execute(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
