//! Modgraph CLI entry point

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use modgraph_render::DEFAULT_JSON_FILE;

mod commands;

#[derive(Parser)]
#[command(name = "modgraph", version)]
#[command(about = "Module dependency graphs for TypeScript and JavaScript projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    options: GraphArgs,
}

/// Options shared by every command. Command-line values override `.modgraph.toml`.
#[derive(Args, Debug, Default)]
pub struct GraphArgs {
    /// Directory short paths are relative to (defaults to the detected project root)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// tsconfig.json or jsconfig.json to read `baseUrl` and `paths` from
    #[arg(long, global = true)]
    pub tsconfig: Option<PathBuf>,

    /// Settings file (defaults to `<root>/.modgraph.toml`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Render every file at top level instead of nesting directory clusters
    #[arg(long, global = true)]
    pub no_groups: bool,

    /// Show exported symbols inside each file record
    #[arg(long, global = true)]
    pub symbols: bool,

    /// Collapse directory groups matching this regex into one node (repeatable)
    #[arg(long, value_name = "RE", global = true)]
    pub collapse: Vec<String>,

    /// Never collapse directory groups matching this regex (repeatable)
    #[arg(long, value_name = "RE", global = true)]
    pub collapse_exclude: Vec<String>,

    /// Only show paths matching one of these regexes (repeatable)
    #[arg(long, value_name = "RE", global = true)]
    pub include: Vec<String>,

    /// Hide paths matching this regex (repeatable)
    #[arg(long, value_name = "RE", global = true)]
    pub exclude: Vec<String>,

    /// Third-party package directory that is never traversed
    #[arg(long, value_name = "NAME", global = true)]
    pub package_dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the graph in Graphviz DOT format
    Dot {
        /// Entry file to start the traversal from
        entry: Option<PathBuf>,
    },
    /// Write the graph as a node/link JSON file
    Json {
        /// Entry file to start the traversal from
        entry: Option<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = DEFAULT_JSON_FILE)]
        out: PathBuf,
    },
    /// Print a Markdown report of exported symbols
    Symbols {
        /// Entry file to start the traversal from
        entry: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging. Logs go to stderr so stdout stays clean for output.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "modgraph={log_level},modgraph_core={log_level},modgraph_indexer={log_level},modgraph_render={log_level}"
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Modgraph v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Dot { entry } => commands::dot(entry, &cli.options),
        Commands::Json { entry, out } => commands::json(entry, out, &cli.options),
        Commands::Symbols { entry } => commands::symbols(entry, &cli.options),
    }
}
