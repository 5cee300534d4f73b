//! Leafy CLI: uploads product media through the Leafy pipeline.
//!
//! Reads LEAFY_* settings from the environment (or `.env`); flags override
//! them. Prints the batch outcome as JSON on stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use leafy_cli::{init_tracing, read_pending_file};
use leafy_core::{megabytes_to_bytes, TransportBackend, UploadConfig};
use leafy_processing::{TracingObserver, UploadPipeline};
use leafy_storage::{create_transport, UploadTransport};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "leafy", about = "Leafy media upload CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, optimize and upload one or more files
    Upload {
        /// Files to upload, processed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Upload endpoint base URL (overrides LEAFY_API_URL)
        #[arg(long)]
        api_url: Option<String>,
        /// API key sent as X-API-Key (overrides LEAFY_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
        /// Store files in this directory instead of uploading
        #[arg(long)]
        local_dir: Option<PathBuf>,
        /// Public base URL for --local-dir
        #[arg(long, default_value = "http://localhost:5000/media")]
        base_url: String,
        /// Per-file size ceiling in MB (overrides LEAFY_MAX_FILE_SIZE_MB)
        #[arg(long)]
        max_file_size_mb: Option<u64>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize outcome")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            files,
            api_url,
            api_key,
            local_dir,
            base_url,
            max_file_size_mb,
        } => {
            let mut config = UploadConfig::load_env().context("Failed to load configuration")?;

            if let Some(dir) = local_dir {
                config.transport.backend = TransportBackend::Local;
                config.transport.local_storage_path = Some(dir.to_string_lossy().to_string());
                config.transport.local_storage_base_url = Some(base_url);
            }
            if let Some(url) = api_url {
                config.transport.backend = TransportBackend::Http;
                config.transport.api_url = Some(url);
            }
            if api_key.is_some() {
                config.transport.api_key = api_key;
            }
            if let Some(mb) = max_file_size_mb {
                config.max_file_size_bytes = megabytes_to_bytes(mb)?;
            }
            config.validate()?;

            let transport = create_transport(&config.transport)
                .await
                .context("Failed to create transport")?;

            tracing::info!(
                backend = %transport.backend_type(),
                file_count = files.len(),
                "Starting upload batch"
            );

            let mut pending = Vec::with_capacity(files.len());
            for path in &files {
                pending.push(read_pending_file(path, config.max_file_size_bytes).await?);
            }

            let pipeline = UploadPipeline::new(&config, transport);
            let outcome = pipeline.run_batch(pending, &TracingObserver).await;

            print_json(&outcome)?;

            if outcome.completed_urls().is_none() {
                anyhow::bail!("No files were uploaded");
            }
        }
    }

    Ok(())
}
