mod commands;
mod output;
mod templates;

use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "spotty")]
#[command(version)]
#[command(about = "Disposable spot-priced GPU/CPU instances for your project", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the instance stack and run the project container
    Run {
        /// Script to run once the instance is up (reserved)
        #[arg(value_name = "SCRIPT_NAME")]
        script_name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { script_name } => commands::run::handle(script_name.as_deref()).await,
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
