//! Single binary web server for the tournament organizer API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! DATA_DIR (saved projects), INACTIVITY_HOURS (in-memory cleanup).

use actix_web::{web::Data, App, HttpServer};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tournament_draw_web::api::{self, ProjectEntry, Projects};
use tournament_draw_web::{ProjectId, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} (saves in {})",
        config.host,
        config.port,
        config.data_dir.display()
    );

    let projects: Data<Projects> = Data::new(RwLock::new(HashMap::<ProjectId, ProjectEntry>::new()));

    // Background task: every 30 minutes, remove projects inactive for too long
    let projects_cleanup = projects.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let removed = api::evict_inactive(&projects_cleanup, timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive project(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(projects.clone())
            .app_data(config.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
