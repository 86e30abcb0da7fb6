//! HTTP server facade with Axum, plain-text error mapping, the JSON envelope
//! codec and OpenAPI support.

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use readinglist_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod error;
pub mod json;
pub mod response;
pub mod router;

pub use error::AppError;
pub use json::{read_json, write_json, Envelope};
pub use response::write_text;

use router::RouterBuilder;

/// Start the HTTP server with the given module registry.
///
/// Modules are initialized and started before binding and stopped after the
/// server has drained on shutdown.
pub async fn start_server(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<()> {
    let ctx = InitCtx::new(settings);

    registry
        .init_all(&ctx)
        .await
        .context("failed to initialize modules")?;

    let app = build_router(registry, settings);

    registry
        .start_all(&ctx)
        .await
        .context("failed to start modules")?;

    let address = settings.server.bind_address();
    tracing::info!(%address, env = %settings.environment, "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped; shutting modules down");
    registry.stop_all().await.context("failed to stop modules")?;

    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings) -> Router {
    let ctx = InitCtx::new(settings);
    let mut router_builder = RouterBuilder::new();

    for module in registry.modules() {
        let module_name = module.name();
        tracing::info!(
            module = module_name,
            "mounting module routes under {}",
            router::API_PREFIX
        );
        router_builder = router_builder.mount_module(module_name, module.routes(&ctx));
    }

    router_builder
        .with_openapi(registry, &settings.version)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(settings.server.request_timeout_ms)
        .build()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

/// Request ID generator producing time-ordered UUIDv7 values
#[derive(Clone, Copy)]
pub(crate) struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
