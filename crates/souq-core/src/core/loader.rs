// crates/souq-core/src/core/loader.rs
// ============================================================================
// Module: Bundle Loader
// Description: Cache-fronted loading of per-locale message bundles.
// Purpose: Turn a resolved locale into a parsed bundle with one-time I/O.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The loader owns the pipeline from resolved locale to parsed bundle: check
//! the injected [`BundleCache`], fetch the raw resource from the injected
//! [`BundleSource`] on a miss, parse, cache, return. Bundle resources are
//! static build-time artifacts, so no retries are warranted.
//!
//! The degraded path is explicit: [`BundleLoader::load_or_fallback`] serves
//! the fallback locale's bundle when a non-default load fails, surfacing the
//! original error alongside so the caller can log it. A failure loading the
//! fallback bundle itself always propagates.
//!
//! ## Invariants
//! - A cache hit performs no source I/O.
//! - Load failures never panic; every path returns `Result`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::bundle::BundleLoadError;
use crate::core::bundle::MessageBundle;
use crate::core::cache::BundleCache;
use crate::core::context::RenderContext;
use crate::core::locale::Locale;
use crate::core::locale::LocaleRegistry;
use crate::interfaces::BundleSource;
use crate::interfaces::SourceError;

// ============================================================================
// SECTION: Degraded Load
// ============================================================================

/// Outcome of a load that is allowed to degrade to the fallback bundle.
///
/// # Invariants
/// - `degraded` is `Some` exactly when `bundle` belongs to the fallback
///   locale instead of the requested one.
#[derive(Debug)]
pub struct DegradedLoad {
    /// The bundle to render with.
    pub bundle: Arc<MessageBundle>,
    /// The original load failure when the fallback bundle was substituted.
    pub degraded: Option<BundleLoadError>,
}

// ============================================================================
// SECTION: Bundle Loader
// ============================================================================

/// Cache-fronted bundle loader.
pub struct BundleLoader {
    /// Registry supplying the fallback locale.
    registry: LocaleRegistry,
    /// Process-wide cache, constructed at startup and injected.
    cache: Arc<BundleCache>,
    /// Storage seam for raw translation resources.
    source: Arc<dyn BundleSource>,
}

impl BundleLoader {
    /// Creates a loader over the given registry, cache, and source.
    #[must_use]
    pub fn new(
        registry: LocaleRegistry,
        cache: Arc<BundleCache>,
        source: Arc<dyn BundleSource>,
    ) -> Self {
        Self {
            registry,
            cache,
            source,
        }
    }

    /// Returns the locale registry backing this loader.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Returns the injected bundle cache.
    #[must_use]
    pub fn cache(&self) -> &BundleCache {
        &self.cache
    }

    /// Loads the bundle for a locale, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`BundleLoadError`] when the resource for the locale is
    /// missing, unreadable, or malformed.
    pub fn load(&self, locale: Locale) -> Result<Arc<MessageBundle>, BundleLoadError> {
        if let Some(bundle) = self.cache.get(locale) {
            return Ok(bundle);
        }
        let raw = self.source.fetch(locale).map_err(source_error)?;
        let bundle = MessageBundle::from_json_str(locale, &raw)?;
        Ok(self.cache.insert(locale, bundle))
    }

    /// Loads the bundle for a locale, degrading to the fallback bundle when
    /// the requested locale is not the fallback and its load fails.
    ///
    /// # Errors
    ///
    /// Returns [`BundleLoadError`] only when the fallback bundle itself
    /// cannot be loaded.
    pub fn load_or_fallback(&self, locale: Locale) -> Result<DegradedLoad, BundleLoadError> {
        let fallback = self.registry.fallback();
        match self.load(locale) {
            Ok(bundle) => Ok(DegradedLoad {
                bundle,
                degraded: None,
            }),
            Err(err) if locale != fallback => {
                let bundle = self.load(fallback)?;
                Ok(DegradedLoad {
                    bundle,
                    degraded: Some(err),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Builds the per-request render context for a locale.
    ///
    /// The context carries the requested bundle plus the fallback bundle for
    /// key-level fallback. When the requested bundle cannot be loaded the
    /// context degrades to the fallback bundle and the original failure is
    /// returned alongside for logging.
    ///
    /// # Errors
    ///
    /// Returns [`BundleLoadError`] only when the fallback bundle itself
    /// cannot be loaded.
    pub fn context(
        &self,
        locale: Locale,
    ) -> Result<(RenderContext, Option<BundleLoadError>), BundleLoadError> {
        let fallback = self.registry.fallback();
        let loaded = self.load_or_fallback(locale)?;
        if loaded.degraded.is_some() || locale == fallback {
            let context = RenderContext::new(locale, Arc::clone(&loaded.bundle), None);
            return Ok((context, loaded.degraded));
        }
        // Key-level fallback wants the default bundle even when the requested
        // bundle loaded cleanly. Its own load failure is non-fatal here.
        let fallback_bundle = self.load(fallback).ok();
        let context = RenderContext::new(locale, loaded.bundle, fallback_bundle);
        Ok((context, None))
    }
}

/// Maps a source failure into the loader's error space.
fn source_error(err: SourceError) -> BundleLoadError {
    match err {
        SourceError::NotFound(locale) => BundleLoadError::Missing {
            locale,
        },
        SourceError::Io {
            locale,
            detail,
        } => BundleLoadError::Read {
            locale,
            detail,
        },
        SourceError::TooLarge {
            locale,
            max_bytes,
            actual_bytes,
        } => BundleLoadError::Read {
            locale,
            detail: format!("resource exceeds size limit ({actual_bytes} > {max_bytes})"),
        },
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
