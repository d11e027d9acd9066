use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use dotenv::dotenv;

use book_search::{api, config::AppConfig, state::AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    log::info!("🚀 Starting book search service...");
    log::info!("📊 Database: {}", config.mongodb_uri);

    // Connect before accepting requests
    let state = AppState::init(config).await?;
    log::info!("✅ MongoDB connected successfully");

    let host = state.config.host.clone();
    let port = state.config.port;

    if state.config.is_production() {
        log::info!("📦 Serving client bundle from {}", state.config.client_dist.display());
    }

    let server_state = state.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&server_state.config.client_origin)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .configure(|cfg| api::configure(cfg, &server_state))
    })
    .bind((host.as_str(), port))?;

    log::info!("🌐 API server running on port {}!", port);
    log::info!("📚 Use GraphQL at http://localhost:{}/graphql", port);

    server.run().await?;
    Ok(())
}
