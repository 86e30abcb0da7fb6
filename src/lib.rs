//! Reading list application: the `books` and `healthcheck` modules plus the
//! bootstrap shared by the binaries.

pub mod modules;

use anyhow::Context;
use axum::Router;
use readinglist_kernel::{settings::Settings, ModuleRegistry};

/// Registry holding every module of the service
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}

/// Full HTTP application for the given settings, without binding a socket.
pub fn app(settings: &Settings) -> Router {
    readinglist_http::build_router(&registry(), settings)
}

/// Install telemetry and serve until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    readinglist_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = %settings.environment,
        version = %settings.version,
        "readinglist bootstrap starting"
    );

    let registry = registry();
    readinglist_http::start_server(&registry, &settings)
        .await
        .context("readinglist server terminated with an error")
}
