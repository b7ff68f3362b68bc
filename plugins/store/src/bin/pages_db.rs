//! Inspect and edit the notes_pages plugin store from the command line

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use notes_pages::{AppName, DATA_DIR_ENV, LocalDirs, PluginDirs, logging};
use notes_pages_store::{KeyPathStore, list_keys, storage};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pages-db", version, about = "Inspect and edit the notes_pages plugin store")]
struct Cli {
    /// Plugin data directory holding db.json
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a dot-separated key path
    Get { path: String },
    /// Store a JSON value (bare words are stored as strings)
    Set { path: String, value: String },
    /// List the keys of the object at a key path
    Keys { path: Option<String> },
    /// Manage the site icon
    Icon {
        #[command(subcommand)]
        action: IconAction,
    },
}

#[derive(Subcommand)]
enum IconAction {
    /// Copy the stored icon to a file
    Export { file: PathBuf },
    /// Store a file as the icon
    Import { file: PathBuf },
    /// Remove the stored icon
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let dirs = match cli.data_dir {
        Some(dir) => LocalDirs::new(dir, "."),
        None => LocalDirs::from_app_name(&AppName::default()),
    };
    let dirs: Arc<dyn PluginDirs> = Arc::new(dirs);
    let store = KeyPathStore::new(Arc::clone(&dirs));

    match cli.command {
        Command::Get { path } => {
            let value = store.fetch(&split_path(&path)).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&value.unwrap_or(Value::Null))?
            );
        }
        Command::Set { path, value } => {
            store.save(&split_path(&path), &parse_value(value)).await?;
        }
        Command::Keys { path } => {
            let file = storage::document_path(&dirs.data_dir().await?);
            let segments = path.as_deref().map(split_path).unwrap_or_default();
            for key in list_keys(&file, &segments).await? {
                println!("{}", key);
            }
        }
        Command::Icon { action } => match action {
            IconAction::Export { file } => {
                let Some(icon) = store.fetch_icon().await else {
                    bail!("no icon stored");
                };
                tokio::fs::write(&file, icon)
                    .await
                    .with_context(|| format!("Failed to write {}", file.display()))?;
            }
            IconAction::Import { file } => {
                let icon = tokio::fs::read(&file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                store.save_icon(Some(icon.as_slice())).await?;
            }
            IconAction::Clear => store.save_icon(None).await?,
        },
    }

    Ok(())
}

/// Key path segments of a dot-separated argument, skipping empty ones
fn split_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|segment| !segment.is_empty()).collect()
}

/// The argument as JSON, or as a plain string when it is not valid JSON
fn parse_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}
