// crates/souq-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalogs and translation utilities for the CLI.
// Purpose: Centralize user-facing strings with locale selection support.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Souq CLI stores user-facing strings in small translation catalogs to
//! enforce consistent messaging. English is the complete fallback catalog; an
//! Arabic catalog overlays it, selected through `SOUQ_LANG`. All runtime
//! output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - Catalogs are initialized once and read-only thereafter.
//! - Missing keys fall back to the English catalog, then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output locale for CLI messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Locale {
    /// English (complete fallback catalog).
    #[default]
    En,
    /// Arabic.
    Ar,
}

impl Locale {
    /// Parses a locale selector from `SOUQ_LANG`-style input.
    ///
    /// Case-insensitive, tolerant of region tags (`ar_EG`, `en-US`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ar") => Some(Self::Ar),
            _ => None,
        }
    }
}

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Currently selected output locale (0 = en, 1 = ar).
static CURRENT_LOCALE: AtomicU8 = AtomicU8::new(0);

/// Selects the output locale for subsequent [`translate`] calls.
pub fn set_locale(locale: Locale) {
    let tag = match locale {
        Locale::En => 0,
        Locale::Ar => 1,
    };
    CURRENT_LOCALE.store(tag, Ordering::Relaxed);
}

/// Returns the currently selected output locale.
#[must_use]
pub fn current_locale() -> Locale {
    match CURRENT_LOCALE.load(Ordering::Relaxed) {
        1 => Locale::Ar,
        _ => Locale::En,
    }
}

// ============================================================================
// SECTION: Catalogs
// ============================================================================

/// English catalog entries; every key the CLI emits appears here.
const EN_CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "souq {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("serve.config.load_failed", "Failed to load config: {error}"),
    ("serve.init_failed", "Failed to initialize storefront server: {error}"),
    ("serve.failed", "Storefront server failed: {error}"),
    ("serve.listening", "Serving storefront on {bind} (bundles from {dir})"),
    ("resolve.result", "path {path} -> locale={locale} source={source} dir={dir}"),
    ("bundles.ok", "{locale}: ok ({count} messages)"),
    ("bundles.missing", "{locale}: missing ({path})"),
    ("bundles.error", "{locale}: error: {error}"),
    ("bundles.missing_keys", "{locale}: {count} untranslated keys: {keys}"),
    ("bundles.summary", "{ok} ok, {missing} missing, {broken} broken"),
    ("bundles.fallback_required", "The fallback locale {locale} must have a loadable bundle."),
];

/// Arabic catalog entries; keys absent here fall back to English.
const AR_CATALOG_ITEMS: &[(&str, &str)] = &[
    ("output.write_failed", "تعذرت الكتابة إلى {stream}: {error}"),
    ("config.load_failed", "تعذر تحميل الإعدادات: {error}"),
    ("config.validate.ok", "الإعدادات صالحة."),
    ("serve.config.load_failed", "تعذر تحميل الإعدادات: {error}"),
    ("serve.init_failed", "تعذرت تهيئة خادم المتجر: {error}"),
    ("serve.failed", "تعطل خادم المتجر: {error}"),
    ("serve.listening", "يعمل المتجر على {bind} (الحزم من {dir})"),
    ("bundles.ok", "{locale}: سليم ({count} رسالة)"),
    ("bundles.missing", "{locale}: مفقود ({path})"),
    ("bundles.error", "{locale}: خطأ: {error}"),
    ("bundles.missing_keys", "{locale}: {count} مفاتيح غير مترجمة: {keys}"),
    ("bundles.summary", "{ok} سليم، {missing} مفقود، {broken} معطوب"),
    ("bundles.fallback_required", "يجب أن تتوفر حزمة قابلة للتحميل للغة الاحتياطية {locale}."),
];

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` for the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = match current_locale() {
        Locale::En => None,
        Locale::Ar => ar_catalog().get(key).copied(),
    };
    let template = template.or_else(|| en_catalog().get(key).copied()).unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

/// Returns the static English catalog used by the CLI.
fn en_catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| EN_CATALOG_ITEMS.iter().copied().collect())
}

/// Returns the static Arabic catalog used by the CLI.
fn ar_catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| AR_CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
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
        reason = "Test-only assertions."
    )]

    use super::Locale;
    use super::MessageArg;
    use super::translate;

    #[test]
    fn known_key_substitutes_placeholders() {
        let message = translate("config.load_failed", vec![MessageArg::new("error", "boom")]);
        assert_eq!(message, "Failed to load config: boom");
    }

    #[test]
    fn missing_key_falls_back_to_the_key_itself() {
        assert_eq!(translate("no.such.key", Vec::new()), "no.such.key");
    }

    #[test]
    fn macro_forwards_named_arguments() {
        let message = crate::t!("bundles.ok", locale = "tr", count = 12);
        assert_eq!(message, "tr: ok (12 messages)");
    }

    #[test]
    fn locale_parse_tolerates_region_tags() {
        assert_eq!(Locale::parse("AR"), Some(Locale::Ar));
        assert_eq!(Locale::parse("ar_EG"), Some(Locale::Ar));
        assert_eq!(Locale::parse("en-US"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn arabic_catalog_covers_its_keys_and_english_covers_the_rest() {
        for (key, _) in super::AR_CATALOG_ITEMS {
            assert!(
                super::en_catalog().contains_key(key),
                "ar key {key} missing from the en catalog"
            );
        }
    }
}
