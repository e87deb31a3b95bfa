//! Main webserver implementation
//!
//! Wires the roster store into the HTTP router and runs the server until a
//! shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use roster::{RosterStore, TableStore};
use shared::{Component, component_info};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{WebServerError, WebServerResult};
use crate::web::handlers::{api, websocket};

/// Roster web service
pub struct WebServer<S: TableStore + 'static> {
    roster: Arc<RosterStore<S>>,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: Option<mpsc::Receiver<()>>,
}

impl<S: TableStore + 'static> WebServer<S> {
    pub fn new(roster: Arc<RosterStore<S>>) -> Self {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Self {
            roster,
            shutdown_tx,
            shutdown_rx: Some(shutdown_rx),
        }
    }

    pub fn roster(&self) -> &Arc<RosterStore<S>> {
        &self.roster
    }

    /// Sender that stops a running server
    pub fn get_shutdown_sender(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // API routes
            .route(
                "/api/students",
                get(api::list_students::<S>).post(api::add_student::<S>),
            )
            .route("/api/students/refresh", post(api::refresh_students::<S>))
            .route("/api/filters", delete(api::reset_filters::<S>))
            .route("/api/filters/:key", put(api::set_filter::<S>))
            .route("/api/form", get(api::form_options))
            // WebSocket route
            .route("/ws", get(websocket::websocket_handler::<S>))
            // Health check
            .route("/health", get(api::health_check::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.roster.clone())
    }

    /// Bind `address` and serve until shutdown
    pub async fn run(&mut self, address: SocketAddr) -> WebServerResult<()> {
        let listener = TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartupFailed {
                address,
                message: e.to_string(),
            })?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&mut self, listener: TcpListener) -> WebServerResult<()> {
        let address = listener.local_addr()?;
        let router = self.build_router();
        let shutdown_rx = self.shutdown_rx.take();

        component_info!(Component::WebServer, "🌐 Web server listening on http://{}", address);
        component_info!(Component::WebServer, "📡 Roster updates at ws://{}/ws", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                match shutdown_rx {
                    Some(mut rx) => {
                        rx.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            })
            .await?;

        component_info!(Component::WebServer, "HTTP server stopped");
        Ok(())
    }
}
