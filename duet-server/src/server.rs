use crate::config::RelayConfig;
use crate::signaling::{RelayService, ws_handler};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub fn router(service: RelayService) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .with_state(service)
}

/// A bound relay listener, ready to serve.
pub struct RelayServer {
    listener: TcpListener,
    service: RelayService,
}

impl RelayServer {
    pub async fn bind(config: RelayConfig) -> Result<Self> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind relay on {addr}"))?;

        Ok(Self {
            listener,
            service: RelayService::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("relay listener has no local address")
    }

    pub fn service(&self) -> RelayService {
        self.service.clone()
    }

    /// Serves until `signal` resolves, then closes every live connection.
    pub async fn run_until<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Signaling relay listening on ws://{}", self.local_addr()?);

        let service = self.service.clone();
        axum::serve(self.listener, router(self.service))
            .with_graceful_shutdown(async move {
                signal.await;
                info!("Shutting down signaling relay");
                service.shutdown();
            })
            .await
            .context("signaling relay failed")
    }
}
