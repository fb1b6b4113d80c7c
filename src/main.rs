use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod leave;
mod model;
mod models;
mod routes;
mod utils;

use std::sync::Arc;

use auth::directory::{FixtureDirectory, MySqlDirectory, UserDirectory};
use config::Config;
use db::init_db;
use leave::repository::{FixtureLeaveRepository, LeaveRepository, MySqlLeaveRepository};
use leave::store::LeaveStore;

use crate::docs::ApiDoc;
use crate::utils::warmup;
use tracing::{error, info};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Leave Planner API"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // Collaborator wiring: a hosted database when configured, the in-memory
    // fixture set otherwise.
    let (repository, directory): (Arc<dyn LeaveRepository>, Arc<dyn UserDirectory>) =
        match &config.database_url {
            Some(url) => {
                let pool = init_db(url).await;
                (
                    Arc::new(MySqlLeaveRepository::new(pool.clone())),
                    Arc::new(MySqlDirectory::new(pool)),
                )
            }
            None => {
                info!("DATABASE_URL not set, serving the in-memory fixture data");
                (
                    Arc::new(FixtureLeaveRepository::seeded()),
                    Arc::new(FixtureDirectory::new()),
                )
            }
        };

    let leave_store = Data::new(LeaveStore::new());

    let warmup_repository = repository.clone();
    let warmup_store = leave_store.clone();
    actix_web::rt::spawn(async move {
        if let Err(e) = warmup::warmup_leave_store(&*warmup_repository, &warmup_store).await {
            // A collaborator failure leaves the empty collection in place.
            error!(error = %e, "Failed to load leave requests, starting empty");
        }
    });

    let repository_data: Data<dyn LeaveRepository> = Data::from(repository);
    let directory_data: Data<dyn UserDirectory> = Data::from(directory);

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(leave_store.clone())
            .app_data(repository_data.clone())
            .app_data(directory_data.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
