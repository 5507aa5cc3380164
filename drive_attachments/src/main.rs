//! drive_attachments CLI - tables of contents, listings and PDF exports for a
//! Google Drive folder.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use drive_attachments::{
    build_table, export_files, extract_id, file_listing, Authenticator, DriveClient, NamePattern,
    Selection,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Operation {
    /// Print a Markdown table of contents with a view link per file.
    Table,
    /// Print the file names.
    Print,
    /// Export Docs and Slides as PDF and copy other files to the destination.
    Pdfs,
}

/// Attachments helper for Google Drive folders.
#[derive(Parser)]
#[command(name = "drive_attachments")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operation to perform.
    #[arg(value_enum)]
    operation: Operation,

    /// Source folder URL or ID.
    source_folder: String,

    /// Destination folder URL or ID (required for 'pdfs').
    destination_folder: Option<String>,

    /// Include subfolders.
    #[arg(short, long)]
    recursive: bool,

    /// Only include files whose name matches this regex from the start.
    #[arg(short = 'x', long)]
    regex: Option<String>,

    /// Print folders as well as files ('print' only).
    #[arg(short = 'd', long)]
    print_dirs: bool,

    /// Service account key or authorized-user token file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS", default_value = "token.json")]
    credentials: PathBuf,

    /// Pre-issued OAuth access token; takes precedence over --credentials.
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Shared Drive ID to scope listings to.
    #[arg(long, env = "SHARED_DRIVE_ID")]
    drive_id: Option<String>,
}

/// Folder IDs and file selection taken from a checked command line.
#[derive(Debug)]
struct Request {
    source_id: String,
    destination_id: Option<String>,
    selection: Selection,
}

const MISSING_DESTINATION: &str = "Destination folder ID is required for the 'pdfs' operation.";

/// Check everything the user typed before any credentials are touched.
fn validate(cli: &Cli) -> Result<Request> {
    let source_id = extract_id(&cli.source_folder)
        .with_context(|| format!("Invalid folder URL or ID: {}", cli.source_folder))?;

    let destination_id = match (cli.operation, &cli.destination_folder) {
        (Operation::Pdfs, None) => bail!(MISSING_DESTINATION),
        (Operation::Pdfs, Some(folder)) => Some(
            extract_id(folder).with_context(|| format!("Invalid folder URL or ID: {}", folder))?,
        ),
        _ => None,
    };

    let pattern = cli
        .regex
        .as_deref()
        .map(NamePattern::new)
        .transpose()
        .context("Invalid --regex pattern")?;

    Ok(Request {
        source_id,
        destination_id,
        selection: Selection::new(cli.recursive, pattern),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let request = validate(&cli)?;

    let auth = match cli.access_token {
        Some(token) => Authenticator::from_access_token(token),
        None => Authenticator::from_file(&cli.credentials)
            .with_context(|| format!("Failed to load credentials from {:?}", cli.credentials))?,
    };
    // Fail on bad credentials before any file operation starts.
    auth.get_access_token()
        .await
        .context("Failed to obtain an access token")?;

    let client = DriveClient::new(auth, cli.drive_id);

    let Request {
        source_id,
        destination_id,
        selection,
    } = request;

    match cli.operation {
        Operation::Table => match build_table(&client, &source_id, &selection).await {
            Some(toc) => println!("{}", toc),
            None => println!("No files found to process."),
        },

        Operation::Print => {
            let records = selection.collect(&client, &source_id).await;
            for name in file_listing(&records, cli.print_dirs) {
                println!("{}", name);
            }
        }

        Operation::Pdfs => {
            let Some(destination_id) = destination_id else {
                bail!(MISSING_DESTINATION);
            };
            let report = export_files(&client, &source_id, &destination_id, &selection).await;
            println!("Done: {}.", report);
        }
    }

    Ok(())
}
