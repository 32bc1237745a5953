//! CLI entry point for junco-site

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use junco_site::commands::list::ListArgs;

#[derive(Parser)]
#[command(name = "junco-site")]
#[command(author = "Junco TV")]
#[command(version)]
#[command(about = "News site served from a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Initialize a new site with sample content
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List one page of news articles
    List {
        /// Full-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Category name, or "all"
        #[arg(long)]
        category: Option<String>,

        /// publication_date_desc, publication_date_asc, title_asc or title_desc
        #[arg(long)]
        sort: Option<String>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Articles per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// List the featured articles
    Featured {
        /// How many articles to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "junco_site=debug,info"
    } else {
        "junco_site=info"
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
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            junco_site::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Serve { port, ip } => {
            let site = junco_site::Site::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());
            let port = port.unwrap_or(site.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            junco_site::server::start(&site, &ip, port).await?;
        }

        Commands::List {
            search,
            category,
            sort,
            page,
            page_size,
        } => {
            let site = junco_site::Site::new(&base_dir)?;
            let args = ListArgs {
                search,
                category,
                sort,
                page,
                page_size,
            };
            junco_site::commands::list::run(&site, &args).await?;
        }

        Commands::Featured { limit } => {
            let site = junco_site::Site::new(&base_dir)?;
            junco_site::commands::list::featured(&site, limit).await?;
        }

        Commands::Version => {
            println!("junco-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
