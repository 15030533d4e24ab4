// crates/souq-core/src/core/bundle.rs
// ============================================================================
// Module: Message Bundles
// Description: Nested translation mappings parsed from per-locale resources.
// Purpose: Provide dotted-key lookup over build-time translation content.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A message bundle is the parsed form of one locale's translation resource:
//! a mapping from keys to localized strings or further nested mappings, at
//! arbitrary depth. Keys are addressed in dotted form (`home.welcome`).
//! Non-default bundles are tolerated to be incomplete; key fallback is the
//! render context's concern, not the bundle's.
//!
//! ## Invariants
//! - Bundles are immutable after parsing.
//! - Lookup never panics; absent or non-leaf keys yield `None`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::locale::Locale;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading a bundle resource for a registered locale.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum BundleLoadError {
    /// The bundle resource for the locale does not exist.
    #[error("bundle resource missing for locale {locale}")]
    Missing {
        /// Locale whose resource is absent.
        locale: Locale,
    },
    /// The bundle resource could not be read.
    #[error("bundle read failed for locale {locale}: {detail}")]
    Read {
        /// Locale whose resource failed to read.
        locale: Locale,
        /// Underlying read failure detail.
        detail: String,
    },
    /// The bundle resource is not valid structured data.
    #[error("bundle parse failed for locale {locale}: {detail}")]
    Parse {
        /// Locale whose resource failed to parse.
        locale: Locale,
        /// Underlying parse failure detail.
        detail: String,
    },
}

// ============================================================================
// SECTION: Message Tree
// ============================================================================

/// One node of a bundle's translation tree.
///
/// # Invariants
/// - Leaves are localized strings; groups nest to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A localized string.
    Text(String),
    /// A nested mapping of keys to further messages.
    Group(BTreeMap<String, Message>),
}

/// Parsed translation bundle for a single locale.
///
/// # Invariants
/// - The locale tag matches the resource the bundle was parsed from.
/// - Content is immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBundle {
    /// Locale this bundle translates.
    locale: Locale,
    /// Root of the translation tree.
    messages: BTreeMap<String, Message>,
}

impl MessageBundle {
    /// Builds a bundle from an already-parsed translation tree.
    #[must_use]
    pub const fn new(locale: Locale, messages: BTreeMap<String, Message>) -> Self {
        Self {
            locale,
            messages,
        }
    }

    /// Parses a bundle from a raw JSON resource.
    ///
    /// # Errors
    ///
    /// Returns [`BundleLoadError::Parse`] when the resource is not valid JSON
    /// or its root is not an object of strings and nested objects.
    pub fn from_json_str(locale: Locale, raw: &str) -> Result<Self, BundleLoadError> {
        let messages: BTreeMap<String, Message> =
            serde_json::from_str(raw).map_err(|err| BundleLoadError::Parse {
                locale,
                detail: err.to_string(),
            })?;
        Ok(Self {
            locale,
            messages,
        })
    }

    /// Returns the locale this bundle translates.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the root translation tree.
    #[must_use]
    pub const fn messages(&self) -> &BTreeMap<String, Message> {
        &self.messages
    }

    /// Looks up a localized string by dotted key.
    ///
    /// Returns `None` when any segment is absent or when the key addresses a
    /// group rather than a leaf.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.messages.get(first)?;
        for segment in segments {
            match node {
                Message::Group(children) => node = children.get(segment)?,
                Message::Text(_) => return None,
            }
        }
        match node {
            Message::Text(text) => Some(text),
            Message::Group(_) => None,
        }
    }

    /// Returns every dotted leaf key in the bundle, in stable order.
    #[must_use]
    pub fn flattened_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.messages, None, &mut keys);
        keys
    }

    /// Returns the number of leaf messages in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        count_leaves(&self.messages)
    }

    /// Returns whether the bundle contains no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Accumulates dotted leaf keys from a translation subtree.
fn collect_keys(tree: &BTreeMap<String, Message>, prefix: Option<&str>, keys: &mut Vec<String>) {
    for (name, node) in tree {
        let dotted = prefix.map_or_else(|| name.clone(), |prefix| format!("{prefix}.{name}"));
        match node {
            Message::Text(_) => keys.push(dotted),
            Message::Group(children) => collect_keys(children, Some(&dotted), keys),
        }
    }
}

/// Counts leaf messages in a translation subtree.
fn count_leaves(tree: &BTreeMap<String, Message>) -> usize {
    tree.values()
        .map(|node| match node {
            Message::Text(_) => 1,
            Message::Group(children) => count_leaves(children),
        })
        .sum()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions."
    )]

    use super::BundleLoadError;
    use super::MessageBundle;
    use crate::core::locale::Locale;

    fn sample() -> MessageBundle {
        MessageBundle::from_json_str(
            Locale::En,
            r#"{
                "home": { "welcome": "Hi", "tagline": "Fresh goods daily" },
                "nav": { "cart": { "label": "Cart", "empty": "Your cart is empty" } },
                "brand": "Souq"
            }"#,
        )
        .expect("sample bundle parses")
    }

    #[test]
    fn nested_round_trip_resolves_dotted_keys() {
        let bundle = sample();
        assert_eq!(bundle.lookup("home.welcome"), Some("Hi"));
        assert_eq!(bundle.lookup("nav.cart.empty"), Some("Your cart is empty"));
        assert_eq!(bundle.lookup("brand"), Some("Souq"));
    }

    #[test]
    fn lookup_misses_are_none_not_panics() {
        let bundle = sample();
        assert_eq!(bundle.lookup("home.missing"), None);
        assert_eq!(bundle.lookup("nav.cart"), None);
        assert_eq!(bundle.lookup("home.welcome.extra"), None);
        assert_eq!(bundle.lookup(""), None);
        assert_eq!(bundle.lookup("..."), None);
    }

    #[test]
    fn flattened_keys_cover_all_leaves_in_order() {
        let bundle = sample();
        assert_eq!(
            bundle.flattened_keys(),
            vec![
                "brand".to_string(),
                "home.tagline".to_string(),
                "home.welcome".to_string(),
                "nav.cart.empty".to_string(),
                "nav.cart.label".to_string(),
            ]
        );
        assert_eq!(bundle.len(), 5);
        assert!(!bundle.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MessageBundle::from_json_str(Locale::Tr, "{ not json").expect_err("parse fails");
        assert!(matches!(err, BundleLoadError::Parse { locale: Locale::Tr, .. }));
    }

    #[test]
    fn non_object_root_is_a_parse_error() {
        let err = MessageBundle::from_json_str(Locale::Ms, "[1, 2]").expect_err("parse fails");
        assert!(matches!(err, BundleLoadError::Parse { .. }));
    }
}
