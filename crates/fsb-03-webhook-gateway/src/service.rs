//! Standalone webhook server.
//!
//! For applications that do not already run an axum app: binds the
//! configured address and serves [`webhook_router`] until told to stop.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handler::WebhookState;
use crate::router::webhook_router;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A bound, not yet running, webhook server.
pub struct WebhookServer {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
    shutdown_timeout: Duration,
}

impl WebhookServer {
    /// Validate `config` and bind its address.
    ///
    /// Port `0` binds an ephemeral port; read it back with
    /// [`local_addr`](Self::local_addr).
    pub async fn bind(config: &GatewayConfig, state: WebhookState) -> Result<Self, GatewayError> {
        config.validate()?;
        let router = webhook_router(state, &config.route)?;

        let addr = config.bind_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| GatewayError::Bind { addr, source })?;

        Ok(Self {
            listener,
            router,
            local_addr,
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.local_addr, "Webhook server listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
            .map_err(GatewayError::Serve)?;

        info!(addr = %self.local_addr, "Webhook server stopped");
        Ok(())
    }

    /// Run the server on a background task.
    pub fn spawn(self) -> ServerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let local_addr = self.local_addr;
        let shutdown_timeout = self.shutdown_timeout;

        let task = tokio::spawn(async move {
            let signal = async {
                let _ = shutdown_rx.await;
            };
            let result = self.serve_with_shutdown(signal).await;
            if let Err(e) = &result {
                error!(error = %e, "Webhook server error");
            }
            result
        });

        ServerHandle {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            task,
            shutdown_timeout,
        }
    }
}

/// Handle to a server started with [`WebhookServer::spawn`].
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), GatewayError>>,
    shutdown_timeout: Duration,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// Requests still running after the shutdown timeout are aborted.
    pub async fn shutdown(mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        match tokio::time::timeout(self.shutdown_timeout, &mut self.task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(GatewayError::Task(e.to_string())),
            Err(_) => {
                warn!(
                    timeout = ?self.shutdown_timeout,
                    "Webhook server did not drain in time; aborting"
                );
                self.task.abort();
                Ok(())
            }
        }
    }
}
