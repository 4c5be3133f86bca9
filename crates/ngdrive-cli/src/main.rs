//! NG-Drive CLI — manage the files stored for your account.
//!
//! Configuration comes from the environment (see `Config::from_env`), with
//! `.env` support. Sign in first; every file command is gated on a session.

mod shell;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ngdrive_auth::{Credentials, LocalAuthProvider, SessionGate, SignUpOutcome};
use ngdrive_cli::{format_size, init_tracing};
use ngdrive_client::{
    DeleteOutcome, FileActionDispatcher, FileKvStore, ListingCache, PreviewOutcome, RecencyTracker,
};
use ngdrive_core::constants::HISTORY_KEY;
use ngdrive_core::{Category, Config, UploadCandidate};
use ngdrive_storage::{create_store, ListOptions};
use shell::TerminalShell;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ngdrive", about = "NG-Drive file management CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new account and sign in
    Signup {
        email: String,
        password: String,
    },
    /// Sign in with email and password
    Login {
        email: String,
        password: String,
    },
    /// Sign out of the current session
    Logout,
    /// List your files
    List {
        /// Category tab: all, pdf, docs, excel
        #[arg(long, default_value = "all")]
        category: String,
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Upload a file (overwrites an existing file of the same name)
    Upload {
        /// Path to the file to upload
        file: PathBuf,
    },
    /// Download a file
    Download {
        /// Stored file name
        name: String,
        /// Directory to save into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Preview a file (opens a URL, or downloads unsupported formats)
    Preview {
        /// Stored file name
        name: String,
    },
    /// Delete a file
    Delete {
        /// Stored file name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show recently viewed files
    History,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let provider = Arc::new(
        LocalAuthProvider::load(&config.auth_state_path)
            .await
            .context("Failed to load auth state")?,
    );
    let gate = SessionGate::new(provider);

    match cli.command {
        Commands::Signup { email, password } => {
            match gate.sign_up(Credentials::new(email, password)).await? {
                SignUpOutcome::SignedIn(session) => {
                    println!("Signup successful! Signed in as {}.", session.user.email);
                }
                SignUpOutcome::ConfirmationRequired => {
                    println!("Signup successful! Please check your email.");
                }
            }
            return Ok(());
        }
        Commands::Login { email, password } => {
            let session = gate.sign_in(Credentials::new(email, password)).await?;
            println!("Logged in as {}.", session.user.email);
            return Ok(());
        }
        Commands::Logout => {
            gate.sign_out().await?;
            println!("Signed out.");
            return Ok(());
        }
        command => {
            // Every file command is behind the session gate.
            let state = gate.resolve().await;
            if !state.is_authenticated() {
                anyhow::bail!("Not signed in. Run `ngdrive login <email> <password>` first.");
            }
            run_file_command(command, &config).await
        }
    }
}

async fn run_file_command(command: Commands, config: &Config) -> anyhow::Result<()> {
    let store = create_store(config)
        .await
        .context("Failed to initialize storage")?;

    let listing = Arc::new(ListingCache::with_options(
        store.clone(),
        String::new(),
        ListOptions {
            limit: config.list_limit,
            ..ListOptions::default()
        },
    ));
    let history = Arc::new(RecencyTracker::load_with(
        Arc::new(FileKvStore::new(&config.history_path)),
        HISTORY_KEY.to_string(),
        config.history_capacity,
    ));

    let (assume_yes, out_dir) = match &command {
        Commands::Delete { yes, .. } => (*yes, None),
        Commands::Download { out, .. } => (false, out.clone()),
        _ => (false, None),
    };
    let shell = Arc::new(TerminalShell::new(assume_yes, out_dir));

    let dispatcher = FileActionDispatcher::new(store, listing.clone(), history.clone(), shell)
        .with_viewer_base_url(config.viewer_base_url.clone());

    match command {
        Commands::List { category, search } => {
            let category: Category = category.parse()?;
            listing.refresh().await.map_err(|e| anyhow::anyhow!(e.client_message()))?;

            let visible = listing.visible(category, &search);
            if visible.is_empty() {
                println!("No matching files.");
                return Ok(());
            }

            println!("{:<40} {:>10}  {}", "NAME", "SIZE", "UPDATED");
            for object in visible {
                let updated = object
                    .updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<40} {:>10}  {}",
                    object.name,
                    format_size(object.size),
                    updated
                );
            }
        }
        Commands::Upload { file } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .context("File has no usable name")?
                .to_string();
            let content_type = mime_guess::from_path(&file)
                .first_or_octet_stream()
                .to_string();

            dispatcher.set_candidate(UploadCandidate::new(file_name.clone(), content_type, data));
            dispatcher
                .upload()
                .await
                .map_err(|e| anyhow::anyhow!("Upload failed: {}", e.client_message()))?;
            println!("File uploaded successfully: {}", file_name);
        }
        Commands::Download { name, .. } => {
            dispatcher
                .download(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Download failed: {}", e.client_message()))?;
        }
        Commands::Preview { name } => {
            match dispatcher
                .preview(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Preview failed: {}", e.client_message()))?
            {
                PreviewOutcome::Opened { .. } => {}
                PreviewOutcome::UnsupportedDownloaded => {
                    println!("Preview not supported for this file type. File was downloaded.");
                }
            }
        }
        Commands::Delete { name, .. } => {
            match dispatcher
                .delete(&name)
                .await
                .map_err(|e| anyhow::anyhow!("Delete failed: {}", e.client_message()))?
            {
                DeleteOutcome::Deleted => println!("Deleted {}.", name),
                DeleteOutcome::Declined => println!("Aborted."),
            }
        }
        Commands::History => {
            let entries = history.entries();
            if entries.is_empty() {
                println!("No recently viewed files.");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}  viewed {}",
                    entry.file_name,
                    entry.viewed_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Commands::Signup { .. } | Commands::Login { .. } | Commands::Logout => unreachable!(),
    }

    Ok(())
}
