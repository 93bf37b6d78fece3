//! CLI entry point for notes-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notes-rs")]
#[command(version)]
#[command(about = "A static site generator for a personal notes blog", long_about = None)]
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
    /// Initialize a new notes site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft note
    New {
        /// Title of the new note
        title: String,

        /// Route for the note (defaults to <notes_dir>/<slug>)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Disable file watching and live reload
        #[arg(long)]
        r#static: bool,
    },

    /// Delete the public folder
    Clean,

    /// List notes with their publication status
    List {
        /// Include drafts and undated notes
        #[arg(short, long)]
        all: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "notes_rs=debug,info"
    } else {
        "notes_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

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
            notes_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized notes site in {:?}", target_dir);
        }

        Commands::New { title, path } => {
            let site = notes_rs::Site::new(&base_dir)?;
            let file = notes_rs::commands::new::create_note(&site, &title, path.as_deref())?;
            println!("Created: {:?}", file);
        }

        Commands::Generate { watch } => {
            let site = notes_rs::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                notes_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server { port, ip, r#static } => {
            let site = notes_rs::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;

            notes_rs::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = notes_rs::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { all, json } => {
            let site = notes_rs::Site::new(&base_dir)?;
            notes_rs::commands::list::run(&site, all, json)?;
        }

        Commands::Version => {
            println!("notes-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
