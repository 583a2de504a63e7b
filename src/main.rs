use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use files_manager::db::MemoryCache;
use files_manager::queue::{self, PostUploadHandler, Worker};
use files_manager::{AppState, Config, ContentStore, Database, Stores, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    // Load configuration
    let config = if Path::new(CONFIG_PATH).exists() {
        match Config::load_with_env(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {CONFIG_PATH}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = files_manager::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        files_manager::logging::init_console_only(&config.logging.level);
    }

    info!("files-manager starting");

    if let Err(e) = run(config).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> files_manager::Result<()> {
    let db = Database::open(&config.database.path).await?;

    let mut stores = Stores::sqlite(&db);
    if config.session.backend == "memory" {
        stores = stores.with_cache(Arc::new(MemoryCache::new()));
    }
    info!(backend = %config.session.backend, "Session cache ready");

    let content = ContentStore::new(&config.files.storage_path);
    info!("Content stored under {}", config.files.storage_path);

    let (dispatcher, receiver) = queue::channel(config.queue.capacity);
    let handler = PostUploadHandler::new(
        stores.users.clone(),
        stores.files.clone(),
        content.clone(),
    );
    Worker::new(handler, config.queue.max_concurrent_jobs).spawn(receiver);

    let app_state = AppState::new(stores, content, dispatcher, config.session.ttl_secs);
    let server = WebServer::new(&config.server, app_state)?;
    info!("Server configured on {}", server.addr());

    server.run().await?;
    Ok(())
}
