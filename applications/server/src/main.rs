/// Shelf Server - library catalog web application
use clap::{Parser, Subcommand};
use shelf_importer::CatalogImporter;
use shelf_ratings::{GoodreadsClient, RatingsLookup};
use shelf_server::{
    config::ServerConfig,
    create_router,
    services::AuthService,
    state::AppState,
};
use shelf_storage::Database;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf-server")]
#[command(about = "Shelf library catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Load books from a delimited file with an `isbn,title,author,year` header
    Import {
        /// File to import
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Import { path } => import(&config, &path).await?,
    }

    Ok(())
}

async fn connect(config: &ServerConfig) -> anyhow::Result<Database> {
    let url = config
        .database_url()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let db = Database::connect(url).await?;
    tracing::info!("Database connected");
    Ok(db)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Shelf Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = connect(&config).await?;

    let auth_service = Arc::new(AuthService::new(config.auth.bcrypt_cost));

    let ratings_config = config.ratings_config();
    if ratings_config.api_key.is_none() {
        tracing::warn!("GOODREADS_KEY is not set, external ratings will show as zero");
    }
    let ratings: Arc<dyn RatingsLookup> = Arc::new(GoodreadsClient::new(ratings_config)?);

    let session_timeout = config.session_timeout()?;
    let app_state = AppState::new(db, auth_service, ratings, session_timeout);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn import(config: &ServerConfig, path: &Path) -> anyhow::Result<()> {
    let db = connect(config).await?;
    let importer = CatalogImporter::new(db.pool().clone(), config.import_config());

    match importer.import_file(path).await {
        Ok(summary) => {
            println!(
                "Imported {} books from {} in {:.2?}",
                summary.imported,
                path.display(),
                summary.duration
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Import of {} aborted: {}", path.display(), e);
            Err(e.into())
        }
    }
}
