// crates/souq-server/src/server.rs
// ============================================================================
// Module: Storefront Server
// Description: Axum HTTP surface for the Souq locale pipeline.
// Purpose: Resolve, load, and render localized storefront responses.
// Dependencies: souq-core, axum, tokio
// ============================================================================

//! ## Overview
//! The storefront server wires the locale pipeline to HTTP. Requests flow
//! resolver → loader (cache-fronted) → render context → page markup. The
//! bare root path answers with the client-side navigation replace shell;
//! every other path, including unsupported-locale paths, produces zero
//! redirects. Bundle failures degrade per the documented policy and are
//! reported through the warning sink, never as a crashed request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::Html;
use axum::response::Json;
use axum::routing::get;
use serde_json::Value;
use serde_json::json;
use souq_core::BundleCache;
use souq_core::BundleLoadError;
use souq_core::BundleLoader;
use souq_core::Locale;
use souq_core::LocaleRegistry;
use souq_core::RenderContext;
use souq_core::Resolution;

use crate::config::SouqConfig;
use crate::render;
use crate::source::DirBundleSource;
use crate::telemetry::BundleLoadEvent;
use crate::telemetry::CacheOutcome;
use crate::telemetry::NoopMetrics;
use crate::telemetry::PipelineMetrics;
use crate::telemetry::ResolutionEvent;
use crate::telemetry::StderrWarnSink;
use crate::telemetry::WarnSink;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Storefront server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Server State
// ============================================================================

/// Shared state for request handlers.
pub(crate) struct ServerState {
    /// Cache-fronted bundle loader.
    loader: BundleLoader,
    /// Metrics sink for pipeline events.
    metrics: Arc<dyn PipelineMetrics>,
    /// Sink for degraded-render warnings.
    warnings: Arc<dyn WarnSink>,
}

impl ServerState {
    /// Creates state over an already-wired loader and sinks.
    pub(crate) fn new(
        loader: BundleLoader,
        metrics: Arc<dyn PipelineMetrics>,
        warnings: Arc<dyn WarnSink>,
    ) -> Self {
        Self {
            loader,
            metrics,
            warnings,
        }
    }

    /// Resolves a request path, recording the resolution event.
    fn resolve(&self, path: &str) -> Resolution {
        let resolution = self.loader.registry().resolve_path(path);
        self.metrics.record_resolution(ResolutionEvent {
            locale: resolution.locale,
            source: resolution.source,
        });
        resolution
    }

    /// Builds the render context for a locale, recording cache outcome and
    /// warning on degraded loads.
    ///
    /// # Errors
    ///
    /// Returns [`BundleLoadError`] only when the fallback bundle itself
    /// cannot be loaded.
    fn context_for(&self, locale: Locale) -> Result<RenderContext, BundleLoadError> {
        let cached = self.loader.cache().get(locale).is_some();
        match self.loader.context(locale) {
            Ok((context, degraded)) => {
                let outcome = if degraded.is_some() {
                    CacheOutcome::LoadError
                } else if cached {
                    CacheOutcome::Hit
                } else {
                    CacheOutcome::Miss
                };
                self.metrics.record_bundle_load(BundleLoadEvent {
                    locale,
                    outcome,
                });
                if let Some(err) = degraded {
                    self.warnings.warn(&format!(
                        "bundle for locale {locale} unavailable, rendering with fallback: {err}"
                    ));
                }
                Ok(context)
            }
            Err(err) => {
                self.metrics.record_bundle_load(BundleLoadEvent {
                    locale,
                    outcome: CacheOutcome::LoadError,
                });
                self.warnings.warn(&format!("fallback bundle unavailable: {err}"));
                Err(err)
            }
        }
    }

}

// ============================================================================
// SECTION: Storefront Server
// ============================================================================

/// Storefront server instance.
pub struct StorefrontServer {
    /// Validated configuration.
    config: SouqConfig,
    /// Shared handler state.
    state: Arc<ServerState>,
}

impl StorefrontServer {
    /// Builds a server from configuration with the default sinks.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid.
    pub fn from_config(config: SouqConfig) -> Result<Self, ServerError> {
        Self::with_sinks(config, Arc::new(NoopMetrics), Arc::new(StderrWarnSink))
    }

    /// Builds a server from configuration with explicit sinks.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the configuration is invalid.
    pub fn with_sinks(
        config: SouqConfig,
        metrics: Arc<dyn PipelineMetrics>,
        warnings: Arc<dyn WarnSink>,
    ) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let fallback =
            config.fallback_locale().map_err(|err| ServerError::Config(err.to_string()))?;
        let registry = LocaleRegistry::new(fallback);
        let cache = Arc::new(BundleCache::new());
        let source = Arc::new(DirBundleSource::new(
            config.locales.bundle_dir.clone(),
            config.locales.max_bundle_bytes,
        ));
        let loader = BundleLoader::new(registry, cache, source);
        let state = Arc::new(ServerState::new(loader, metrics, warnings));
        Ok(Self {
            config,
            state,
        })
    }

    /// Serves requests on the configured bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr: SocketAddr = self
            .config
            .server
            .bind
            .parse()
            .map_err(|_| ServerError::Config("invalid bind address".to_string()))?;
        let app = build_router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|_| ServerError::Transport("http server failed".to_string()))
    }
}

/// Builds the storefront router over shared state.
fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/healthz", get(handle_health))
        .route("/api/context/{locale}", get(handle_context))
        .route("/{*path}", get(handle_page))
        .with_state(state)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Handles the bare root path with the client-side navigation replace shell.
///
/// This is the only route that ever redirects; the guard is the route match
/// on the literal root, so a loop is impossible.
async fn handle_root(State(state): State<Arc<ServerState>>) -> Html<String> {
    let resolution = state.resolve("/");
    Html(render::redirect_shell(resolution.locale))
}

/// Handles the liveness endpoint.
async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handles the message-context API for the rendering layer.
async fn handle_context(
    State(state): State<Arc<ServerState>>,
    Path(code): Path<String>,
) -> (StatusCode, Json<Value>) {
    let Some(locale) = Locale::from_code(&code) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unsupported locale: {code}") })),
        );
    };
    match state.context_for(locale) {
        Ok(context) => (StatusCode::OK, Json(context.to_value())),
        Err(err) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": err.to_string() })))
        }
    }
}

/// Handles every storefront page path.
///
/// Paths with a registered locale segment render the localized page.
/// Unlocalized paths render the fallback-locale not-found page with no
/// redirect (the redirect controller covers only the literal root).
async fn handle_page(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let path = uri.path();
    let resolution = state.resolve(path);
    let status =
        if resolution.had_locale_segment() { StatusCode::OK } else { StatusCode::NOT_FOUND };
    match state.context_for(resolution.locale) {
        Ok(context) => {
            let body = if resolution.had_locale_segment() {
                render::page(&context, path)
            } else {
                render::not_found(&context, path)
            };
            (status, Html(body))
        }
        // No bundle at all: neutral placeholder, never a failed render.
        Err(_) => (status, Html(render::placeholder(resolution.locale))),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
