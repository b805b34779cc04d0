//! main file for the server

pub mod model;
mod controller;
mod domain;
mod scheduler;
mod session;
mod state;
mod upstream;
mod util;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use tokio_util::sync::CancellationToken;
use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;
use crate::server::upstream::http::HttpBackend;

/// Run the server
pub(crate) async fn run(config: ServerConfig) -> std::io::Result<()> {
    let backend = HttpBackend::new(config.backend_base_url.clone(), config.upstream_timeout)
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState::new(backend));

    let cancel_token = CancellationToken::new();
    let poller = actix_web::rt::spawn(scheduler::job::history_poller(
        state.clone(),
        config.history_poll_interval,
        cancel_token.clone(),
    ));

    info!("ordering service bound to {}, backend={}", config.addr, config.backend_base_url);
    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(controller::configure::<HttpBackend>)
    })
        .bind(config.addr)?
        .run()
        .await;

    cancel_token.cancel();
    poller.await.ok();
    result
}
