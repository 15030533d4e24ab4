// crates/souq-core/src/core/locale.rs
// ============================================================================
// Module: Souq Locales
// Description: Supported locale codes and the immutable locale registry.
// Purpose: Provide the closed locale set with a single designated fallback.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The storefront ships translations for a fixed, build-time-known set of
//! locales. [`Locale`] is the closed enumeration of those codes and
//! [`LocaleRegistry`] pairs the set with the one designated fallback locale.
//!
//! ## Invariants
//! - The supported set is immutable at runtime.
//! - Exactly one locale is the registry fallback, and it is always a member
//!   of the supported set (enforced by construction).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Supported storefront locales.
///
/// # Invariants
/// - Variants are stable for wire serialization and path matching.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    En,
    /// Arabic.
    Ar,
    /// Urdu.
    Ur,
    /// Chinese.
    Zh,
    /// Turkish.
    Tr,
    /// Malay.
    Ms,
    /// Indonesian.
    Id,
}

/// Ordered list of supported locales.
///
/// # Invariants
/// - Ordering is stable for deterministic presentation and bundle discovery.
pub const SUPPORTED_LOCALES: &[Locale] =
    &[Locale::En, Locale::Ar, Locale::Ur, Locale::Zh, Locale::Tr, Locale::Ms, Locale::Id];

impl Locale {
    /// Returns the canonical lowercase locale code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
            Self::Ur => "ur",
            Self::Zh => "zh",
            Self::Tr => "tr",
            Self::Ms => "ms",
            Self::Id => "id",
        }
    }

    /// Matches an exact lowercase locale code, as it appears in request
    /// paths and bundle filenames.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "ar" => Some(Self::Ar),
            "ur" => Some(Self::Ur),
            "zh" => Some(Self::Zh),
            "tr" => Some(Self::Tr),
            "ms" => Some(Self::Ms),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Attempts to parse a locale value tolerantly (case-insensitive,
    /// tolerant of region tags such as `en-US` or `ar_EG`).
    ///
    /// Path-segment matching must use [`Locale::from_code`] instead; the
    /// tolerant form is for configuration and CLI input only.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        Self::from_code(lang)
    }

    /// Returns the text direction used when rendering this locale.
    #[must_use]
    pub const fn direction(self) -> TextDirection {
        match self {
            Self::Ar | Self::Ur => TextDirection::Rtl,
            Self::En | Self::Zh | Self::Tr | Self::Ms | Self::Id => TextDirection::Ltr,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Text Direction
// ============================================================================

/// Rendering direction for a locale.
///
/// # Invariants
/// - Variants are stable for template attribute emission.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    /// Left-to-right text.
    Ltr,
    /// Right-to-left text.
    Rtl,
}

impl TextDirection {
    /// Returns the HTML `dir` attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

// ============================================================================
// SECTION: Locale Registry
// ============================================================================

/// Immutable registry of supported locales plus the designated fallback.
///
/// # Invariants
/// - The supported set is fixed at construction and never mutated.
/// - The fallback locale is always a member of the supported set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    /// Supported locales in stable presentation order.
    locales: &'static [Locale],
    /// Fallback locale applied when resolution finds no match.
    fallback: Locale,
}

impl LocaleRegistry {
    /// Creates a registry over the full supported set with the given
    /// fallback locale.
    #[must_use]
    pub const fn new(fallback: Locale) -> Self {
        Self {
            locales: SUPPORTED_LOCALES,
            fallback,
        }
    }

    /// Returns the fallback locale.
    #[must_use]
    pub const fn fallback(&self) -> Locale {
        self.fallback
    }

    /// Returns the supported locales in stable order.
    #[must_use]
    pub const fn locales(&self) -> &'static [Locale] {
        self.locales
    }

    /// Returns whether the locale is registered.
    #[must_use]
    pub fn is_registered(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
