//! ctxforge CLI — the main entry point.
//!
//! Commands:
//! - `pack`    — Pack prioritized sections from a TOML file into context
//! - `analyze` — Run the heuristic code scanner on a file
//! - `demo`    — Run the full context → tools → feedback workflow
//! - `tools`   — List built-in tools

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "ctxforge",
    about = "ctxforge — Context Engineering Toolkit",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack prioritized sections into a bounded context
    Pack {
        /// TOML file with [[section]] tables (title, content, priority)
        #[arg(short, long)]
        input: String,

        /// Override the configured character budget
        #[arg(short, long)]
        max_length: Option<usize>,
    },

    /// Analyze a code file for complexity and issues
    Analyze {
        /// Path to the code file
        #[arg(short, long)]
        file: String,

        /// Language of the code (python, javascript, typescript, java, cpp)
        #[arg(short, long)]
        language: String,

        /// Aspects to analyze (performance, readability, security)
        #[arg(short, long, value_delimiter = ',')]
        aspects: Vec<String>,

        /// Generate proof tests for this issue description
        #[arg(long)]
        proof: Option<String>,
    },

    /// Run the end-to-end context engineering workflow
    Demo,

    /// List built-in tools
    Tools,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Pack { input, max_length } => commands::pack::run(&input, max_length)?,
        Commands::Analyze {
            file,
            language,
            aspects,
            proof,
        } => commands::analyze::run(&file, &language, &aspects, proof.as_deref())?,
        Commands::Demo => commands::demo::run().await?,
        Commands::Tools => commands::tools_cmd::run()?,
    }

    Ok(())
}
