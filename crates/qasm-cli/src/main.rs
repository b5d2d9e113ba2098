//! QASM Command-Line Interface
//!
//! Configures the target quantum computer and executes gate assembly
//! programs on the local statevector register.
//!
//! ```text
//! qasm config setup --qubits 4
//! qasm execute bell.qasm --seed 7
//! ```
//!
//! Exit status is 0 on success, 65 when the program has lexical or syntax
//! errors, 70 when execution fails and 1 for configuration or I/O errors.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{config, execute, version};

/// qasm - interpreter for a quantum gate assembly dialect
#[derive(Parser)]
#[command(name = "qasm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.qasm/config.json)
    #[arg(long, env = "QASM_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the quantum computer configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Execute a program file
    Execute {
        /// Program source file
        file: PathBuf,

        /// Grammar table (JSON) replacing the built-in one
        #[arg(short, long)]
        grammar: Option<PathBuf>,

        /// Seed for reproducible measurements
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store the number of qubits (prompts when --qubits is omitted)
    Setup {
        /// Number of qubits (1-99)
        #[arg(short, long)]
        qubits: Option<String>,
    },

    /// Print the stored configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli);

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config_path = || config::config_path(cli.config.as_deref());

    match cli.command {
        Commands::Config { action } => {
            let config_path = config_path()?;
            match action {
                ConfigAction::Setup { qubits } => {
                    config::execute_setup(&config_path, qubits.as_deref())?;
                }
                ConfigAction::Show => config::execute_show(&config_path)?,
            }
            Ok(0)
        }

        Commands::Execute {
            file,
            grammar,
            seed,
        } => execute::execute(&file, grammar.as_deref(), seed, &config_path()?),

        Commands::Version => {
            version::execute();
            Ok(0)
        }
    }
}
