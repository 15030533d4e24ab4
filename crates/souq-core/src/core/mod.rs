// crates/souq-core/src/core/mod.rs
// ============================================================================
// Module: Souq Core Types
// Description: Locale pipeline types for the Souq storefront.
// Purpose: Provide stable types for locale resolution and bundle delivery.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the supported locale set, request-path resolution,
//! message bundles, the process-wide bundle cache, the bundle loader, and the
//! per-request render context. These types are the canonical source of truth
//! for any derived surfaces (HTTP handlers or CLI tooling).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod bundle;
pub mod cache;
pub mod context;
pub mod loader;
pub mod locale;
pub mod resolve;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleLoadError;
pub use bundle::Message;
pub use bundle::MessageBundle;
pub use cache::BundleCache;
pub use context::RenderContext;
pub use loader::BundleLoader;
pub use loader::DegradedLoad;
pub use locale::Locale;
pub use locale::LocaleRegistry;
pub use locale::SUPPORTED_LOCALES;
pub use locale::TextDirection;
pub use resolve::Resolution;
pub use resolve::ResolutionSource;
