//! Serving with bounded graceful shutdown.
//!
//! The first shutdown signal stops the listener and lets in-flight requests
//! drain. Draining is bounded by a grace period, and a second signal during
//! the drain gives up immediately. Both of those cases are reported as a
//! [`ShutdownError`] so the binary exits non-zero.

use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

/// Ways serving can end other than a clean drain.
#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("server error: {0}")]
    Serve(#[from] io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("in-flight requests did not finish within {0:?}")]
    GraceExpired(Duration),

    #[error("shutdown forced by a second signal")]
    Forced,
}

/// Serve `app` on `listener` until `signal` resolves, then drain.
///
/// `signal` is called once to wait for the shutdown request and once more to
/// watch for a forced exit while draining.
pub async fn serve<F, Fut>(
    listener: TcpListener,
    app: Router,
    mut signal: F,
    grace: Duration,
) -> Result<(), ShutdownError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let (trigger, triggered) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = triggered.await;
    });
    let mut handle = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut handle => return Ok(result??),
        _ = signal() => info!(grace_secs = grace.as_secs_f64(), "shutdown requested, draining"),
    }

    // The receiver only disappears once the server task has already ended.
    let _ = trigger.send(());

    tokio::select! {
        result = tokio::time::timeout(grace, &mut handle) => match result {
            Ok(joined) => {
                joined??;
                info!("server stopped");
                Ok(())
            }
            Err(_) => {
                handle.abort();
                error!(grace_secs = grace.as_secs_f64(), "grace period expired");
                Err(ShutdownError::GraceExpired(grace))
            }
        },
        _ = signal() => {
            handle.abort();
            error!("second shutdown signal received, forcing exit");
            Err(ShutdownError::Forced)
        }
    }
}

/// Wait for SIGINT, SIGTERM, SIGHUP or SIGQUIT.
///
/// A handler that cannot be installed is logged and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let unix_signals = async {
        use tokio::signal::unix::{signal, SignalKind};

        let streams = (
            signal(SignalKind::terminate()),
            signal(SignalKind::hangup()),
            signal(SignalKind::quit()),
        );
        match streams {
            (Ok(mut term), Ok(mut hup), Ok(mut quit)) => {
                tokio::select! {
                    _ = term.recv() => info!("received SIGTERM"),
                    _ = hup.recv() => info!("received SIGHUP"),
                    _ = quit.recv() => info!("received SIGQUIT"),
                }
            }
            _ => {
                warn!("failed to install unix signal handlers");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let unix_signals = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = unix_signals => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::routing::get;
    use tokio::sync::Notify;

    fn slow_app() -> Router {
        Router::new()
            .route("/fast", get(|| async { "ok" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "late"
                }),
            )
    }

    async fn bind() -> (TcpListener, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, addr)
    }

    type SignalFuture = std::pin::Pin<Box<dyn Future<Output = ()> + Send>>;

    fn signal_from(notify: &Arc<Notify>) -> impl FnMut() -> SignalFuture {
        let notify = notify.clone();
        move || {
            let notify = notify.clone();
            Box::pin(async move { notify.notified().await })
        }
    }

    /// Open a connection and leave a `/slow` request in flight.
    async fn start_slow_request(addr: SocketAddr) -> std::net::TcpStream {
        let mut stream = std::net::TcpStream::connect(addr).unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        stream
    }

    #[tokio::test]
    async fn idle_server_stops_cleanly() {
        let (listener, _) = bind().await;
        let notify = Arc::new(Notify::new());
        let task = tokio::spawn(serve(
            listener,
            slow_app(),
            signal_from(&notify),
            Duration::from_secs(5),
        ));

        notify.notify_one();
        let result = task.await.unwrap();
        assert!(result.is_ok(), "{result:?}");
    }

    #[tokio::test]
    async fn grace_expiry_is_an_error() {
        let (listener, addr) = bind().await;
        let notify = Arc::new(Notify::new());
        let task = tokio::spawn(serve(
            listener,
            slow_app(),
            signal_from(&notify),
            Duration::from_millis(200),
        ));

        let _stream = start_slow_request(addr).await;
        notify.notify_one();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ShutdownError::GraceExpired(_))), "{result:?}");
    }

    #[tokio::test]
    async fn second_signal_forces_exit() {
        let (listener, addr) = bind().await;
        let notify = Arc::new(Notify::new());
        let task = tokio::spawn(serve(
            listener,
            slow_app(),
            signal_from(&notify),
            Duration::from_secs(30),
        ));

        let _stream = start_slow_request(addr).await;
        notify.notify_one();
        tokio::time::sleep(Duration::from_millis(100)).await;
        notify.notify_one();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ShutdownError::Forced)), "{result:?}");
    }
}
