// crates/souq-core/src/core/resolve.rs
// ============================================================================
// Module: Locale Resolution
// Description: Request-path locale resolution with fallback signaling.
// Purpose: Map an inbound path to a supported locale, never failing.
// Dependencies: crate::core::locale
// ============================================================================

//! ## Overview
//! Resolution inspects the first path segment of an inbound request. A
//! segment that exactly matches a registered locale code resolves to that
//! locale; anything else (root path, unsupported code, malformed input)
//! degrades to the registry fallback. The outcome records where the locale
//! came from so the redirect controller can distinguish "no locale segment"
//! from "resolved from path".
//!
//! ## Invariants
//! - Resolution is total: every input yields a registered locale.
//! - Path matching is exact on lowercase codes; tolerant parsing is reserved
//!   for configuration input ([`Locale::parse`]).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::locale::Locale;
use crate::core::locale::LocaleRegistry;

// ============================================================================
// SECTION: Resolution Types
// ============================================================================

/// Where a resolved locale came from.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The first path segment matched a registered locale code.
    PathSegment,
    /// No registered locale was present; the registry fallback applied.
    Fallback,
}

impl ResolutionSource {
    /// Returns a stable label for the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathSegment => "path_segment",
            Self::Fallback => "fallback",
        }
    }
}

/// Outcome of resolving a request path to a locale.
///
/// # Invariants
/// - `locale` is always registered in the resolving registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The effective locale for the request.
    pub locale: Locale,
    /// Where the locale came from.
    pub source: ResolutionSource,
}

impl Resolution {
    /// Returns whether the path carried an explicit locale segment.
    #[must_use]
    pub const fn had_locale_segment(&self) -> bool {
        matches!(self.source, ResolutionSource::PathSegment)
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

impl LocaleRegistry {
    /// Resolves a request path to a locale.
    ///
    /// The first non-empty path segment is matched exactly against the
    /// registered codes. Unresolvable or malformed paths degrade to the
    /// fallback locale; there is no error condition.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Resolution {
        let segment = path.split('/').find(|segment| !segment.is_empty());
        let matched = segment
            .and_then(Locale::from_code)
            .filter(|locale| self.is_registered(*locale));
        matched.map_or(
            Resolution {
                locale: self.fallback(),
                source: ResolutionSource::Fallback,
            },
            |locale| Resolution {
                locale,
                source: ResolutionSource::PathSegment,
            },
        )
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
