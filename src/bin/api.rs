//! doproject API server binary.
//!
//! Creates the concrete database implementation and passes it to the API
//! server. The API layer stays agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use doproject::api::{self, ApiError, Config};
use doproject::db::{Database, DbError, SqliteDatabase};
use doproject::paths::resolve_db_path;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(doproject::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(doproject::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(doproject::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "doproject-api")]
#[command(author, version, about = "Project management API server", long_about = None)]
struct Cli {
    /// Host address to bind to [env: DOPROJECT_HOST, default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [env: DOPROJECT_PORT, default: 3000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path [env: DOPROJECT_DB, default: ~/.local/share/doproject/doproject.db]
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    api::init_tracing();

    let mut config = Config::new();
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }

    let db_path = resolve_db_path(cli.db);
    info!(path = %db_path.display(), "Opening database");

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    db.migrate().await?;
    info!("Database migrations complete");

    api::run(config, db).await?;

    Ok(())
}
