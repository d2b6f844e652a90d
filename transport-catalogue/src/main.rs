use std::fs::File;
use std::io::{self, BufReader, Read};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transport_catalogue::cache::ServerConfig;
use transport_catalogue::requests::{
    RequestDocument, RequestError, RequestHandler, load_catalogue, process, read_document,
    write_responses,
};
use transport_catalogue::snapshot::CatalogueSnapshot;
use transport_catalogue::web::{AppState, create_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load base requests and answer stat requests from one document
    Process {
        /// Request document; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Load base requests and write a catalogue snapshot
    MakeBase {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Defaults to `serialization_settings.file` from the document
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Answer stat requests against a saved snapshot
    ProcessRequests {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Defaults to `serialization_settings.file` from the document
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Serve catalogue queries over HTTP
    Serve {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let result = match args.command {
        Commands::Process { input } => run_process(input.as_deref()),
        Commands::MakeBase { input, output } => make_base(input.as_deref(), output),
        Commands::ProcessRequests { input, snapshot } => {
            process_requests(input.as_deref(), snapshot)
        }
        Commands::Serve { snapshot, addr } => serve(&snapshot, addr).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed");
            ExitCode::FAILURE
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<RequestDocument, RequestError> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    read_document(reader)
}

/// Pick the explicit path, falling back to the document's serialization settings.
fn snapshot_path(
    explicit: Option<PathBuf>,
    document: &RequestDocument,
) -> Result<PathBuf, RequestError> {
    explicit
        .or_else(|| {
            document
                .serialization_settings
                .as_ref()
                .map(|settings| settings.file.clone())
        })
        .ok_or(RequestError::MissingSnapshotPath)
}

fn run_process(input: Option<&Path>) -> Result<(), RequestError> {
    let document = read_input(input)?;
    let responses = process(&document)?;
    write_responses(io::stdout().lock(), &responses)
}

fn make_base(input: Option<&Path>, output: Option<PathBuf>) -> Result<(), RequestError> {
    let document = read_input(input)?;
    let output = snapshot_path(output, &document)?;
    if let Some(settings) = &document.routing_settings {
        settings.validate()?;
    }

    let catalogue = load_catalogue(&document.base_requests)?;
    CatalogueSnapshot::capture(&catalogue, document.routing_settings).save(&output)?;
    Ok(())
}

fn process_requests(input: Option<&Path>, snapshot: Option<PathBuf>) -> Result<(), RequestError> {
    let document = read_input(input)?;
    let path = snapshot_path(snapshot, &document)?;

    let snapshot = CatalogueSnapshot::load(&path)?;
    let catalogue = snapshot.restore()?;
    let handler = RequestHandler::new(Arc::new(catalogue), snapshot.routing_settings)?;
    let responses = handler.answer_all(&document.stat_requests);
    write_responses(io::stdout().lock(), &responses)
}

async fn serve(snapshot: &Path, addr: SocketAddr) -> Result<(), RequestError> {
    let snapshot = CatalogueSnapshot::load(snapshot)?;
    if let Some(settings) = &snapshot.routing_settings {
        settings.validate()?;
    }
    let catalogue = Arc::new(snapshot.restore()?);

    let config = ServerConfig::default().with_addr(addr);
    let state = AppState::new(catalogue, snapshot.routing_settings, &config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
