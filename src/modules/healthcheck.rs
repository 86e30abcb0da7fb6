use async_trait::async_trait;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use readinglist_http::{write_json, AppError};
use readinglist_kernel::{InitCtx, Module};
use serde::Serialize;

/// Service liveness report; fields are declared in key order.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub environment: String,
    pub status: &'static str,
    pub version: String,
}

#[derive(Debug, Clone)]
struct HealthState {
    environment: String,
    version: String,
}

pub struct HealthcheckModule;

#[async_trait]
impl Module for HealthcheckModule {
    fn name(&self) -> &'static str {
        "healthcheck"
    }

    fn routes(&self, ctx: &InitCtx<'_>) -> Router {
        let state = HealthState {
            environment: ctx.settings.environment.to_string(),
            version: ctx.settings.version.clone(),
        };

        Router::new()
            .route("/healthcheck", any(healthcheck))
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/healthcheck": {
                    "get": {
                        "summary": "Health check",
                        "tags": ["System"],
                        "responses": {
                            "200": {
                                "description": "Service is available",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "environment": { "type": "string" },
                                                "status": { "type": "string" },
                                                "version": { "type": "string" }
                                            }
                                        }
                                    }
                                }
                            },
                            "405": { "description": "Method Not Allowed" }
                        }
                    }
                }
            }
        }))
    }
}

async fn healthcheck(
    State(state): State<HealthState>,
    method: Method,
) -> Result<Response, AppError> {
    if method != Method::GET {
        return Err(AppError::method_not_allowed(method.as_str()));
    }

    let report = HealthStatus {
        environment: state.environment,
        status: "available",
        version: state.version,
    };

    write_json(StatusCode::OK, &report)
}

pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(HealthcheckModule)
}
