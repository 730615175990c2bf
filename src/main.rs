//! CLI entry point for category-pages

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "category-pages")]
#[command(version)]
#[command(about = "Category pages for a blog front-end, backed by a posts API", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Load one category page and print its data
    Load {
        /// Category to load
        category: String,

        /// Page URL to resolve the posts endpoint against
        #[arg(short, long)]
        url: Option<String>,
    },

    /// List categories of the local posts
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "category_pages=debug,info"
    } else {
        "category_pages=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Server { port, ip } => {
            let site = category_pages::Site::new(&base_dir)?;
            tracing::info!("Serving posts from {:?}", site.store.path());
            category_pages::server::start(&site, &ip, port).await?;
        }

        Commands::Load { category, url } => {
            let site = category_pages::Site::new(&base_dir)?;
            category_pages::commands::load::run(&site, &category, url.as_deref()).await?;
        }

        Commands::List => {
            let site = category_pages::Site::new(&base_dir)?;
            category_pages::commands::list::run(&site).await?;
        }

        Commands::Version => {
            println!("category-pages version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
