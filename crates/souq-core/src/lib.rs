// crates/souq-core/src/lib.rs
// ============================================================================
// Module: Souq Core Library
// Description: Public API surface for the Souq locale pipeline core.
// Purpose: Expose locale resolution, bundle loading, and render context types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Souq core implements the storefront locale pipeline: resolving a request
//! path to a supported locale, loading and caching per-locale message
//! bundles, and packaging both into an explicit per-request render context.
//! It is transport-agnostic and integrates through the [`BundleSource`]
//! interface rather than embedding into any web framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::BundleSource;
pub use interfaces::SourceError;
pub use interfaces::StaticBundleSource;
