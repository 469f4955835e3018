//! Serving the router with a bounded graceful shutdown.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Serve `app` until `shutdown` resolves.
///
/// Once `shutdown` resolves the listener stops accepting. In-flight requests
/// get at most `drain_timeout` to finish before this returns anyway.
pub async fn serve_with_drain<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, mut signalled_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.await;
        let _ = signalled_tx.send(true);
    });

    let drain_deadline = async move {
        let signalled = signalled_rx.wait_for(|signalled| *signalled).await.is_ok();
        if !signalled {
            // Sender dropped without a signal: the server already stopped.
            std::future::pending::<()>().await;
        }
        tracing::info!(
            timeout_ms = drain_timeout.as_millis() as u64,
            "Draining connections..."
        );
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server.into_future() => result,
        _ = drain_deadline => {
            tracing::warn!(
                timeout_ms = drain_timeout.as_millis() as u64,
                "Drain timeout elapsed, abandoning in-flight requests"
            );
            Ok(())
        }
    }
}
