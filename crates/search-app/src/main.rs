use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use search_app::{App, AppConfig};
use search_router::{HistoryMode, Navigation};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "search-app")]
#[command(version, about = "Search front-end shell - inspect and exercise the route table", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "search-app.toml")]
    config: PathBuf,

    /// Base URL override (takes precedence over BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// History mode override: web, hash or memory
    #[arg(long)]
    history: Option<HistoryMode>,

    /// Enable the catch-all "not found" route
    #[arg(long)]
    not_found: bool,

    /// Log router activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table as JSON descriptors
    Routes,

    /// Resolve locations and print the matching route name
    Resolve {
        /// App locations, e.g. /search?q=rust
        #[arg(required = true)]
        locations: Vec<String>,

        /// Treat inputs as hrefs including the base URL
        #[arg(long)]
        href: bool,
    },

    /// Navigate to a location and print the rendered page
    Render {
        /// App location, e.g. /search?q=rust
        location: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(&cli.config)?
        .with_env_overrides()
        .with_base_url(cli.base_url.clone());
    if let Some(mode) = cli.history {
        config.routing.history = mode;
    }
    if cli.not_found {
        config.routing.not_found = true;
    }

    let app = App::new(config)?;

    match cli.command {
        Commands::Routes => {
            println!("{}", app.router().table().to_json()?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolve { locations, href } => {
            let mut all_matched = true;
            for location in &locations {
                let resolved = if href {
                    app.router().resolve_href(location)
                } else {
                    app.router().resolve(location)
                };
                match resolved {
                    Some(route) => println!("{}\t{}\t{}", location, route.name, route.href),
                    None => {
                        all_matched = false;
                        println!("{}\tunmatched", location);
                    }
                }
            }
            Ok(if all_matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Render { location } => match app.mount(&location).await? {
            Navigation::Rendered { output, .. } => {
                println!("{}", output);
                Ok(ExitCode::SUCCESS)
            }
            Navigation::Unmatched { full_path } => {
                eprintln!("No route matches {}", full_path);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
