mod config;
mod error;
mod handlers;
mod models;
mod services;

use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;

use services::{database::DatabaseService, user_service::UserService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::from_env().context("Failed to load configuration")?;

    // A store that cannot be reached or fails its health check aborts startup.
    let database_service = DatabaseService::connect(&config.database)
        .await
        .context("Failed to initialize database")?;

    let user_service = UserService::new(Arc::new(database_service), config.not_found_status);

    let bind_address = config.server.bind_address();
    log::info!("Starting users API on http://{}", bind_address);
    for (method, path) in handlers::ROUTES {
        log::info!("  {:<6} {}", method, path);
    }

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(handlers::cors())
            .configure(handlers::configure(user_service.clone()))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
