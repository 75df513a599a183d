use actix_web::{middleware, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitlink::{handlers, AppState, Config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitlink=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting GitLink server on {}:{}", config.host, config.port);

    let server_addr = format!("{}:{}", config.host, config.port);
    let app_state = web::Data::new(AppState { config });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default().exclude("/status"))
            .wrap(middleware::Compress::default())
            // The literal liveness route must be registered before the
            // parameterized stats routes so it wins the match
            .route("/status", web::get().to(handlers::status))
            .configure(handlers::configure_stats_routes)
    })
    .bind(server_addr)?
    .run()
    .await
}
