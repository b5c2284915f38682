use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use saldo_cli::run::{cmd_run, cmd_validate, RunArgs};

#[derive(Parser)]
#[command(name = "saldo", version, about = "Sales/returns profit reconciliation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline from a TOML config file
    #[command(after_help = "\
Examples:
  saldo run close.toml
  saldo run close.toml --json
  saldo run close.toml --client Alpha --from 2025-12-01 --to 2025-12-31
  saldo run close.toml --by client --status profit --output buckets.json")]
    Run {
        /// Path to the pipeline config file
        config: PathBuf,

        /// Output JSON to stdout in addition to the stderr summary
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Keep only these clients (repeatable; default all)
        #[arg(long = "client")]
        clients: Vec<String>,

        /// Keep only these products (repeatable; default all)
        #[arg(long = "product")]
        products: Vec<String>,

        /// Inclusive date range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive date range end (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Keep only buckets with this status (repeatable: profit, loss)
        #[arg(long = "status")]
        statuses: Vec<String>,

        /// Group by these dimensions (repeatable: date, client, product;
        /// default all three)
        #[arg(long = "by")]
        by: Vec<String>,
    },

    /// Validate a pipeline config without running
    #[command(after_help = "\
Examples:
  saldo validate close.toml")]
    Validate {
        /// Path to the pipeline config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            clients,
            products,
            from,
            to,
            statuses,
            by,
        } => cmd_run(RunArgs {
            config,
            json,
            output,
            clients,
            products,
            from,
            to,
            statuses,
            by,
        }),
        Commands::Validate { config } => cmd_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = &err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}
