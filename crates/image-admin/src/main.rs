//! Image registry administration CLI.
//!
//! Operates directly on the SQLite file the bot serves from, so images can be
//! seeded, inspected and removed without going through Slack.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use image_registry::{Image, ImageStore, SqliteImageStore};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "image-admin", version, about = "Manage the Slack bot image registry")]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "REGISTRY__PATH", default_value = "images.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Store a new image
    Add {
        /// Display name used by `image <name>`
        #[arg(long)]
        name: Option<String>,

        /// Location of the image
        #[arg(long)]
        url: String,
    },

    /// Print every stored image
    List,

    /// Remove an image by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = SqliteImageStore::open(&cli.db)
        .with_context(|| format!("Failed to open image registry at {}", cli.db.display()))?;

    run(&store, cli.command).await
}

async fn run(store: &dyn ImageStore, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Add { name, url } => {
            let id = store
                .insert(name.as_deref(), &url)
                .await
                .context("Failed to add image")?;
            println!("Added image {}", id);
        }
        AdminCommand::List => {
            let images = store.list().await.context("Failed to list images")?;
            if images.is_empty() {
                println!("No images registered");
            }
            for image in &images {
                println!("{}", format_row(image));
            }
        }
        AdminCommand::Delete { id } => {
            if !store.delete(id).await.context("Failed to delete image")? {
                bail!("No image with id {}", id);
            }
            println!("Deleted image {}", id);
        }
    }

    Ok(())
}

fn format_row(image: &Image) -> String {
    format!("{}\t{}\t{}", image.id, image.display_name(), image.url)
}
