//! CLI frontend for the Waymark warp system.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wm",
    about = "Waymark — named warps for a shared voxel world",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List warps in the snapshot
    List {
        /// Filter by world ID (full UUID or a prefix)
        #[arg(short, long)]
        world: Option<String>,

        /// Filter by creator ID (full UUID or a prefix)
        #[arg(short, long)]
        creator: Option<String>,

        /// JSON snapshot of warp records
        #[arg(short, long, default_value = "warps.json")]
        file: PathBuf,
    },

    /// Show detailed information about a warp
    Show {
        /// Warp name (case-insensitive)
        name: String,

        /// JSON snapshot of warp records
        #[arg(short, long, default_value = "warps.json")]
        file: PathBuf,
    },

    /// Resolve a query the way in-game commands would
    Resolve {
        /// Warp name, or "random" for a random eligible warp
        query: String,

        /// RNG seed for deterministic random-mode resolution
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// JSON snapshot of warp records
        #[arg(short, long, default_value = "warps.json")]
        file: PathBuf,
    },

    /// Print completion candidates for a partial name
    Suggest {
        /// Partial warp name
        prefix: String,

        /// JSON snapshot of warp records
        #[arg(short, long, default_value = "warps.json")]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            world,
            creator,
            file,
        } => commands::list::run(&file, world.as_deref(), creator.as_deref()),
        Commands::Show { name, file } => commands::show::run(&file, &name),
        Commands::Resolve { query, seed, file } => commands::resolve::run(&file, &query, seed),
        Commands::Suggest { prefix, file } => commands::suggest::run(&file, &prefix),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
