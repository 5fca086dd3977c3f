use crate::app::App;
use crate::config::AppConfig;
use crate::db::connection::init_db;
use crate::db::view_state::purge_older_than;
use crate::router::handle;
use astra::Server;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod db;
mod domain;
mod errors;
mod explore;
mod handlers;
mod listing;
mod responses;
mod router;
mod session;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("househunt=info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app = App::from_config(config);

    if let Err(e) = init_db(&app.db, &app.config.schema_path) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let cutoff = chrono::Utc::now().timestamp() - app.config.view_state_ttl.as_secs() as i64;
    match purge_older_than(&app.db, cutoff) {
        Ok(purged) => tracing::info!(purged, "stale view state purged"),
        Err(e) => tracing::warn!(error = %e, "view state purge failed"),
    }

    let addr = app.config.addr;
    tracing::info!(%addr, graphql = %app.config.graphql_url, "starting server");

    let server = Server::bind(&addr).max_workers(app.config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
