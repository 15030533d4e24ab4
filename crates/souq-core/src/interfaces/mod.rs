// crates/souq-core/src/interfaces/mod.rs
// ============================================================================
// Module: Souq Interfaces
// Description: Storage-agnostic interface for translation resources.
// Purpose: Define the seam between the bundle loader and resource storage.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! A [`BundleSource`] hands the loader one raw translation resource per
//! locale. The core stays agnostic about where resources live; the server
//! reads them from a bundle directory and tests serve them from memory.
//! Implementations must fail closed on missing or unreadable resources.
//!
//! ## Invariants
//! - Fetching the same locale twice yields identical content; resources are
//!   static build-time artifacts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::locale::Locale;

// ============================================================================
// SECTION: Source Errors
// ============================================================================

/// Errors emitted by bundle sources.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No resource exists for the locale.
    #[error("no bundle resource for locale {0}")]
    NotFound(Locale),
    /// The resource exists but could not be read.
    #[error("bundle resource read failed for locale {locale}: {detail}")]
    Io {
        /// Locale whose resource failed to read.
        locale: Locale,
        /// Underlying read failure detail.
        detail: String,
    },
    /// The resource exceeded the source's size cap.
    #[error("bundle resource for locale {locale} exceeds size limit ({actual_bytes} > {max_bytes})")]
    TooLarge {
        /// Locale whose resource is oversized.
        locale: Locale,
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual resource size in bytes.
        actual_bytes: usize,
    },
}

// ============================================================================
// SECTION: Source Trait
// ============================================================================

/// Resolves a locale into its raw translation resource.
pub trait BundleSource: Send + Sync {
    /// Fetches the raw resource text for the locale.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the resource is absent or unreadable.
    fn fetch(&self, locale: Locale) -> Result<String, SourceError>;
}

// ============================================================================
// SECTION: Static Source
// ============================================================================

/// In-memory bundle source for tests and embedded deployments.
///
/// # Invariants
/// - Resources are fixed at construction; fetches never perform I/O.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleSource {
    /// Raw resources keyed by locale.
    resources: BTreeMap<Locale, String>,
}

impl StaticBundleSource {
    /// Creates an empty static source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw resource for the locale, replacing any previous one.
    #[must_use]
    pub fn resource(mut self, locale: Locale, raw: impl Into<String>) -> Self {
        self.resources.insert(locale, raw.into());
        self
    }
}

impl BundleSource for StaticBundleSource {
    fn fetch(&self, locale: Locale) -> Result<String, SourceError> {
        self.resources.get(&locale).cloned().ok_or(SourceError::NotFound(locale))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
