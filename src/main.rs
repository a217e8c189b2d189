use clap::{Parser, Subcommand};
use space_services::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "space-services")]
#[command(version)]
#[command(about = "List service instances in the targeted Cloud Foundry space", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// CF config directory override (defaults to $CF_HOME, then $HOME)
    #[arg(long, global = true, env = "CF_HOME")]
    cf_home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List service instances with their resolved service and plan names
    Ss,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // DEBUG=1 mirrors the original plugin's env toggle.
    let debug = cli.verbose || std::env::var("DEBUG").as_deref() == Ok("1");
    if debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Ss => cli::ss::execute(cli.cf_home.as_deref()).await,
    };

    // Context and listing failures are fatal; per-lookup failures are
    // reported inside the command and never reach this path.
    if let Err(err) = result {
        println!("FAILED\n");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
