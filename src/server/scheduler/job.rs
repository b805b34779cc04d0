use std::time::Duration;
use actix_web::web;
use log::{info, warn};
use tokio::{pin, select, time};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use crate::server::state::AppState;
use crate::server::upstream::Backend;

/// Re-read every loaded table's ORDERED rows and regroup them into receipts.
async fn refresh_all<B: Backend>(state: &AppState<B>) {
    for session in state.sessions().await {
        let mut session = session.lock().await;
        if let Err(e) = session.refresh_history(state.backend()).await {
            warn!("history refresh failed for table={}, {}", session.table_id(), e);
        }
    }
}

async fn worker<B: Backend + 'static>(state: web::Data<AppState<B>>, every: Duration, cancel_token: CancellationToken) {
    let interval = time::interval(every);
    pin!(interval);
    loop {
        select! {
            _ = interval.tick() => {},
            _ = cancel_token.cancelled() => {
                info!("received cancel signal, returning gracefully");
                return;
            }
        }
        refresh_all(&state).await;
    }
}

/// Poll order history on a fixed interval until cancelled. Must run inside the actix runtime.
pub async fn history_poller<B: Backend + 'static>(
    state: web::Data<AppState<B>>,
    every: Duration,
    cancel_token: CancellationToken,
) {
    let tracker = TaskTracker::new();
    tracker.spawn_local(worker(state, every, cancel_token));
    if tracker.close() {
        tracker.wait().await;
    }
}
