use actix_web::{web, App, HttpServer};
use papayoo_backend::config::StoreConfig;
use papayoo_backend::middleware::cors::cors_middleware;
use papayoo_backend::routes;
use papayoo_backend::state::app_state::AppState;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let store = match StoreConfig::from_env().connect().await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to connect snapshot store: {e}");
            std::process::exit(1);
        }
    };

    println!("Starting Papayoo backend on http://{host}:{port}");

    let data = web::Data::new(AppState::new(store));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .app_data(data.clone())
            .service(web::scope("/api/games").configure(routes::games::configure_routes))
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
