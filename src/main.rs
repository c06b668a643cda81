use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use handlers::{
    handle_categories, handle_form, handle_listing, handle_search, ListingArgs, SearchArgs,
};
use state::AppState;

/// Listing attribute schema and two-tier search for a booking marketplace
///
/// Examples:
///   # Show every category and its groups
///   staymatch categories
///
///   # Show the form fields for one or more categories
///   staymatch form apartment house
///
///   # Validate a listing's attributes, then detach a category
///   staymatch listing --category apartment --category house --set max_guests=4 --detach house
///
///   # Split search results into perfect and location matches
///   staymatch search listings.json --filter wifi=true --filter capacity=20 --sort priceAsc
#[derive(Parser, Debug)]
#[command(name = "staymatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - --filter key=true asks for listings where the attribute is set\n  \
    - --filter key=false and empty values are ignored, they never exclude listings\n  \
    - Any other value must match exactly\n\n\
Sorting Options:\n  \
    - relevance (default), priceAsc, priceDesc, newest, ratingDesc, ratingAsc\n  \
    - Promoted listings always come first")]
struct Cli {
    /// Schema document to use instead of the built-in catalog
    #[arg(long, global = true, value_name = "FILE", env = "STAYMATCH_SCHEMA")]
    schema: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories and their attribute groups
    Categories,

    /// Show the attributes a listing with these categories can carry
    Form {
        /// Category names
        #[arg(value_name = "CATEGORY", required = true)]
        categories: Vec<String>,
    },

    /// Edit and validate a listing's attribute values
    Listing(ListingArgs),

    /// Classify and rank search results
    Search(SearchArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::load(cli.schema)?;

    match cli.command {
        Command::Categories => handle_categories(&state),
        Command::Form { categories } => handle_form(&state, &categories),
        Command::Listing(args) => handle_listing(&state, &args),
        Command::Search(args) => handle_search(&state, &args),
    }
}
