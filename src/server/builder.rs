//! ServerBuilder for fluent API to build the HTTP server

use super::router::{build_api_routes, health_routes};
use crate::core::error::ApiError;
use crate::core::gateway::DataGateway;
use crate::handlers::AppState;
use anyhow::Result;
use axum::Router;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderName, LINK};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the club API server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_gateway(InMemoryGateway::new())
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    gateway: Option<Arc<dyn DataGateway>>,
    expose_upstream_errors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data-store gateway (required)
    pub fn with_gateway(self, gateway: impl DataGateway + 'static) -> Self {
        self.with_shared_gateway(Arc::new(gateway))
    }

    /// Set a gateway that is also held elsewhere (e.g. inspected by tests)
    pub fn with_shared_gateway(mut self, gateway: Arc<dyn DataGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Include raw gateway errors in the `data` member of 500 responses
    pub fn with_upstream_errors(mut self, expose: bool) -> Self {
        self.expose_upstream_errors = expose;
        self
    }

    /// Build the router with its middleware stack
    ///
    /// Layers, outermost first: request tracing, CORS, panic recovery.
    pub fn build(self) -> Result<Router> {
        let gateway = self
            .gateway
            .ok_or_else(|| anyhow::anyhow!("DataGateway is required. Call .with_gateway()"))?;

        let state = AppState::new(gateway).with_upstream_errors(self.expose_upstream_errors);

        Ok(build_api_routes(state)
            .merge(health_routes())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http()))
    }

    /// Build the router and serve it until Ctrl-C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("club-api listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Any origin, no credentials
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([LINK])
        .allow_credentials(false)
        .max_age(Duration::from_secs(300))
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");

    ApiError::Internal("Internal server error".to_string()).into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
