use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use fedlease_match::config::{LoggingSettings, Settings};
use fedlease_match::core::MatchEngine;
use fedlease_match::routes::{self, AppState};
use fedlease_match::services::{InMemoryStore, ListingStore, MatchCache};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.is_pretty() {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging(&LoggingSettings::default().with_env_overrides());
            error!("Failed to load configuration: {}", e);
            return Err(io_error(format!("Configuration error: {}", e)));
        }
    };

    // LOG_LEVEL / LOG_FORMAT override the [logging] section
    init_logging(&settings.logging.clone().with_env_overrides());

    info!("Starting FedLease matching service...");
    info!("Configuration loaded successfully");

    let policy = settings.scoring_policy();
    let engine = MatchEngine::new(policy)
        .map_err(|e| {
            error!("Invalid scoring policy: {}", e);
            io_error(format!("Scoring policy error: {}", e))
        })?
        .with_parallel_threshold(settings.matching.parallel_threshold);

    info!("Match engine initialized with weights: {:?}", policy.weights);

    if let Some(threads) = settings.matching.worker_threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            warn!("Failed to size scoring pool to {} threads: {}", threads, e);
        } else {
            info!("Scoring pool sized to {} threads", threads);
        }
    }

    let store: Arc<dyn ListingStore> = match &settings.data.seed_path {
        Some(path) => match InMemoryStore::from_seed_file(path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Failed to load seed data from {} ({}), starting empty", path, e);
                Arc::new(InMemoryStore::new())
            }
        },
        None => {
            info!("No seed data configured, starting with an empty store");
            Arc::new(InMemoryStore::new())
        }
    };

    let cache = Arc::new(MatchCache::new(settings.cache.max_entries, settings.cache.ttl_secs));

    info!(
        "Match cache initialized ({} entries, TTL: {}s)",
        settings.cache.max_entries, settings.cache.ttl_secs
    );

    let app_state = AppState {
        store,
        cache,
        engine: Arc::new(engine),
        max_batch_results: settings.matching.max_batch_results,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
