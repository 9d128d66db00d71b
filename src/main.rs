use clap::Parser;
use miette::{IntoDiagnostic, Result};
use petframe::application::engine::EconomyEngine;
use petframe::application::service::PetService;
use petframe::config::PetframeConfig;
use petframe::domain::ports::PetStoreBox;
use petframe::infrastructure::in_memory::InMemoryPetStore;
use petframe::infrastructure::notifier::LogNotifier;
use petframe::interfaces::csv::pet_writer::PetWriter;
use petframe::interfaces::csv::request_reader::RequestReader;
use petframe::interfaces::frame::FrameRenderer;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input requests CSV file (fid, action, item, now)
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the frame response of every request instead of the final pet table
    #[arg(long)]
    frames: bool,

    /// Seed for pet variant draws, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn open_store(db_path: Option<PathBuf>) -> Result<PetStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = petframe::infrastructure::rocksdb::RocksDBPetStore::open(path)
                .into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryPetStore::new()))
        }
        None => Ok(Box::new(InMemoryPetStore::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PetframeConfig::from_file(path).into_diagnostic()?,
        None => PetframeConfig::default(),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let engine = EconomyEngine::new(config.economy, Arc::new(config.shop));
    let store = open_store(cli.db_path)?;
    let mut service = PetService::new(engine, store, Box::new(LogNotifier), config.service);
    if let Some(seed) = cli.seed {
        service = service.with_seed(seed);
    }
    let renderer = FrameRenderer::new(config.frame);

    let stdout = io::stdout();
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = RequestReader::new(file);
    for request in reader.requests() {
        match request {
            Ok(request) => match service.handle(request).await {
                Ok(handled) => {
                    if cli.frames {
                        let response = renderer.render(&handled.pet, service.engine().catalog());
                        writeln!(stdout.lock(), "{}", response.body).into_diagnostic()?;
                    }
                }
                Err(e) => {
                    eprintln!("Rejected request: {}", e);
                    if cli.frames {
                        let response = FrameRenderer::error(&e).into_diagnostic()?;
                        writeln!(stdout.lock(), "{}", response.body).into_diagnostic()?;
                    }
                }
            },
            Err(e) => {
                eprintln!("Error reading request: {}", e);
            }
        }
    }

    let pets = service.shutdown().await.into_diagnostic()?;

    if !cli.frames {
        let mut writer = PetWriter::new(stdout.lock());
        writer.write_pets(pets).into_diagnostic()?;
    }

    Ok(())
}
