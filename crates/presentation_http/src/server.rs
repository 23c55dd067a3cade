//! Serving with a bounded graceful shutdown
//!
//! Once the shutdown signal fires the listener stops accepting and open
//! connections get `drain_timeout` to finish. Whatever is still running
//! after that is dropped.

use std::{
    future::{Future, IntoFuture},
    io,
    sync::Arc,
    time::Duration,
};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// How the server stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every open connection finished in time
    Drained,
    /// Connections were still open when the drain timeout ran out
    TimedOut,
}

/// Serve `app` until `signal` resolves, then drain for at most `drain_timeout`
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> io::Result<ShutdownOutcome>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let started = Arc::clone(&draining);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("⏳ Waiting up to {:?} for connections to close...", drain_timeout);
            started.notify_one();
        })
        .into_future();

    // Starts counting only after the signal
    let deadline = async {
        draining.notified().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result.map(|()| ShutdownOutcome::Drained),
        () = deadline => {
            warn!(?drain_timeout, "Drain timeout elapsed, dropping open connections");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}
