// crates/souq-server/src/lib.rs
// ============================================================================
// Module: Souq Server Library
// Description: HTTP storefront surface for the Souq locale pipeline.
// Purpose: Expose configuration, bundle storage, rendering, and the server.
// Dependencies: crate::{config, render, server, source, telemetry}
// ============================================================================

//! ## Overview
//! The Souq server renders localized storefront pages over HTTP. Every
//! request is resolved to a supported locale, its message bundle is served
//! through the process-wide cache, and the resolved context is threaded
//! explicitly into the render functions. The bare root path answers with a
//! client-side navigation replace to the fallback locale's prefix.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod render;
pub mod server;
pub mod source;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::LocalesConfig;
pub use config::ServerConfig;
pub use config::SouqConfig;
pub use server::ServerError;
pub use server::StorefrontServer;
pub use source::DirBundleSource;
pub use telemetry::BundleLoadEvent;
pub use telemetry::CacheOutcome;
pub use telemetry::NoopMetrics;
pub use telemetry::PipelineMetrics;
pub use telemetry::ResolutionEvent;
pub use telemetry::StderrWarnSink;
pub use telemetry::WarnSink;
