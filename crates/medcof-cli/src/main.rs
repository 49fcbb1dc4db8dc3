//! medcof CLI: the study dashboard view-model in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "medcof", version, about = "Study dashboard view-model")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog TOML file (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the modules in the catalog
    Modules {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Filter submodules the way the search bar does
    Search {
        /// Search text (fewer than 2 characters browses the active module)
        query: String,

        /// Active module id
        #[arg(long)]
        module: Option<u32>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print a settled dashboard snapshot
    Show {
        /// Module to select
        #[arg(long)]
        module: Option<u32>,

        /// Submodule index to select (within --module, or the active module)
        #[arg(long)]
        submodule: Option<usize>,

        /// Search text
        #[arg(long)]
        query: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Play the stat counter animation between two modules
    Animate {
        /// Module whose counters are already displayed (default: counters start at zero)
        #[arg(long)]
        from: Option<u32>,

        /// Module to animate toward
        #[arg(long)]
        to: u32,
    },

    /// Validate a catalog TOML file
    Validate {
        /// Path to the catalog file
        #[arg(long = "file")]
        file: PathBuf,
    },

    /// Create starter config and catalog files
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medcof=info".parse().unwrap())
                .add_directive("medcof_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        catalog: cli.catalog,
    };

    let result = match cli.command {
        Commands::Modules { format } => commands::modules::execute(&global, format),
        Commands::Search {
            query,
            module,
            format,
        } => commands::search::execute(&global, query, module, format),
        Commands::Show {
            module,
            submodule,
            query,
            format,
        } => commands::show::execute(&global, module, submodule, query, format),
        Commands::Animate { from, to } => commands::animate::execute(&global, from, to).await,
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
