use clap::{Parser, Subcommand};
use repogen::core::format_error_with_help;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "repogen")]
#[command(about = "Generate repository declarations from a Go module graph")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a declaration for every module in the build list of go.mod
    Import {
        /// Path to the primary go.mod (defaults to <repo-root>/go.mod)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
        /// Repository root; every go.mod below it is snapshotted
        #[arg(short, long)]
        repo_root: Option<PathBuf>,
        /// Output format: yaml, json or starlark
        #[arg(short, long)]
        format: Option<String>,
        /// Path to the go executable
        #[arg(long)]
        go: Option<String>,
    },
    /// List every go.mod under the repository root
    Manifests {
        /// Repository root (defaults to the build workspace root)
        #[arg(short, long)]
        repo_root: Option<PathBuf>,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only declarations.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            manifest,
            repo_root,
            format,
            go,
        } => cli::import::run(cli::import::ImportOptions {
            manifest,
            repo_root,
            format,
            go,
        }),
        Commands::Manifests { repo_root } => cli::manifests::run(repo_root),
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
