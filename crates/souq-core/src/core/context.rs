// crates/souq-core/src/core/context.rs
// ============================================================================
// Module: Render Context
// Description: Per-request pairing of a resolved locale with its bundle.
// Purpose: Thread locale and messages explicitly through the render chain.
// Dependencies: crate::core::{bundle, locale}, serde_json
// ============================================================================

//! ## Overview
//! A render context pairs one resolved locale with its message bundle for
//! the lifetime of a single request. It is created per request, threaded as
//! an explicit parameter through the render call chain, and discarded with
//! the response; there is no ambient provider state.
//!
//! Missing-key policy (applied consistently everywhere): the requested
//! bundle is consulted first, then the fallback bundle, and finally the
//! dotted key itself is returned as a marker. Lookup never panics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;

use crate::core::bundle::MessageBundle;
use crate::core::locale::Locale;
use crate::core::locale::TextDirection;

// ============================================================================
// SECTION: Render Context
// ============================================================================

/// Resolved locale plus message bundle for one request or render pass.
///
/// # Invariants
/// - Owned exclusively by the request's render pipeline; never stored
///   beyond the response.
/// - `fallback` is present only when it differs from the primary bundle.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The effective locale for this request.
    locale: Locale,
    /// Bundle used for primary lookups.
    bundle: Arc<MessageBundle>,
    /// Default-locale bundle consulted when a key is absent.
    fallback: Option<Arc<MessageBundle>>,
}

impl RenderContext {
    /// Creates a context for one request.
    #[must_use]
    pub const fn new(
        locale: Locale,
        bundle: Arc<MessageBundle>,
        fallback: Option<Arc<MessageBundle>>,
    ) -> Self {
        Self {
            locale,
            bundle,
            fallback,
        }
    }

    /// Returns the effective locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the text direction for the effective locale.
    #[must_use]
    pub const fn direction(&self) -> TextDirection {
        self.locale.direction()
    }

    /// Returns the bundle used for primary lookups.
    #[must_use]
    pub const fn bundle(&self) -> &Arc<MessageBundle> {
        &self.bundle
    }

    /// Resolves a dotted translation key.
    ///
    /// Applies the documented chain: primary bundle, then fallback bundle,
    /// then the key itself as an explicit missing-key marker.
    #[must_use]
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.bundle
            .lookup(key)
            .or_else(|| self.fallback.as_ref().and_then(|bundle| bundle.lookup(key)))
            .unwrap_or(key)
    }

    /// Serializes the context the way the rendering layer consumes it:
    /// `{ "locale": ..., "messages": ... }`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "locale": self.locale,
            "messages": self.bundle.messages(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
