use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::config::{Config, StorageLocation};
use todo_api::{api, db};

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "CRUD backend for todo items")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Also parsed on its own when no subcommand is given.
#[derive(Parser)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP API
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// SQLite database file (defaults to $TODO_API_DATABASE, then the data directory)
    #[arg(long, conflicts_with = "in_memory")]
    database: Option<PathBuf>,

    /// Keep todos in memory only
    #[arg(long)]
    in_memory: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_api=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn connect(storage: &StorageLocation) -> anyhow::Result<db::Database> {
    let db = match storage {
        StorageLocation::File(path) => db::Database::open(path.clone())?,
        StorageLocation::Memory => db::Database::open_memory()?,
    };
    db.migrate()?;
    Ok(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::parse_from(["todo-api"]),
    };

    let config = Config::resolve(args.host, args.port, args.database, args.in_memory)?;

    let db = match connect(&config.storage) {
        Ok(db) => {
            tracing::info!("Database connected: {:?}", config.storage);
            db
        }
        Err(e) => {
            tracing::error!("Database connection error: {:#}", e);
            return Err(e);
        }
    };

    let app = api::create_router(db, config.cors_layer()?);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("todo-api listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
