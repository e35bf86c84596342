use clap::{Parser, Subcommand};
use kiln::core::format_error_with_help;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

/// Exit code for `kiln fetch` when no prebuilt binary exists
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Fetch prebuilt native libraries from GitHub releases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and unpack a prebuilt binary, if one is published
    Fetch {
        /// Path to Cargo.toml (defaults to the nearest one)
        #[arg(long)]
        manifest_path: Option<PathBuf>,
        /// Directory to unpack into (defaults to lib/ next to Cargo.toml)
        #[arg(short, long)]
        dest: Option<PathBuf>,
        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a prebuilt binary, or build it locally when none is found
    Install {
        /// Path to Cargo.toml (defaults to the nearest one)
        #[arg(long)]
        manifest_path: Option<PathBuf>,
        /// Directory to install into (defaults to lib/ next to Cargo.toml)
        #[arg(short, long)]
        dest: Option<PathBuf>,
        /// Fail instead of compiling locally
        #[arg(long)]
        no_build: bool,
    },
    /// Build the library and pack it as a release tarball
    Package {
        /// Path to Cargo.toml (defaults to the nearest one)
        #[arg(long)]
        manifest_path: Option<PathBuf>,
        /// Output directory (defaults to dist/ next to Cargo.toml)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Target platform
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Inspect user settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the current settings
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing (stderr, so --json output stays clean)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            manifest_path,
            dest,
            json,
        } => match cli::fetch::run(manifest_path, dest, json).await {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::from(EXIT_NOT_FOUND),
            Err(e) => Err(e),
        },
        Commands::Install {
            manifest_path,
            dest,
            no_build,
        } => cli::install::run(manifest_path, dest, no_build).await,
        Commands::Package {
            manifest_path,
            out,
            target,
        } => cli::package::run(manifest_path, out, target),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Path => cli::config::path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
