// crates/souq-server/src/source.rs
// ============================================================================
// Module: Directory Bundle Source
// Description: Filesystem-backed source for translation resources.
// Purpose: Read per-locale bundle files from the configured directory.
// Dependencies: souq-core, std
// ============================================================================

//! ## Overview
//! `DirBundleSource` resolves a locale into the file `<dir>/<code>.json` and
//! reads it under a size cap. Bundle files are build-time artifacts placed by
//! the deployment, so reads fail closed on anything unexpected: a missing
//! file, an oversized file, or an I/O failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::ErrorKind;
use std::io::Read;
use std::path::PathBuf;

use souq_core::BundleSource;
use souq_core::Locale;
use souq_core::SourceError;

// ============================================================================
// SECTION: Directory Source
// ============================================================================

/// Filesystem bundle source rooted at a bundle directory.
///
/// # Invariants
/// - Resource paths are always `<root>/<code>.json` with a registry-supplied
///   code; no caller-controlled path segments are interpolated.
#[derive(Debug, Clone)]
pub struct DirBundleSource {
    /// Directory holding one resource file per locale.
    root: PathBuf,
    /// Maximum accepted resource size in bytes.
    max_bytes: usize,
}

impl DirBundleSource {
    /// Creates a source over the given bundle directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Returns the resource path for a locale.
    #[must_use]
    pub fn resource_path(&self, locale: Locale) -> PathBuf {
        self.root.join(format!("{}.json", locale.as_str()))
    }
}

impl BundleSource for DirBundleSource {
    fn fetch(&self, locale: Locale) -> Result<String, SourceError> {
        let path = self.resource_path(locale);
        let file = std::fs::File::open(&path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SourceError::NotFound(locale)
            } else {
                SourceError::Io {
                    locale,
                    detail: err.to_string(),
                }
            }
        })?;
        let mut limited = file.take(self.max_bytes.saturating_add(1) as u64);
        let mut raw = String::new();
        limited.read_to_string(&mut raw).map_err(|err| SourceError::Io {
            locale,
            detail: err.to_string(),
        })?;
        if raw.len() > self.max_bytes {
            return Err(SourceError::TooLarge {
                locale,
                max_bytes: self.max_bytes,
                actual_bytes: raw.len(),
            });
        }
        Ok(raw)
    }
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

    use std::fs;

    use souq_core::BundleSource;
    use souq_core::Locale;
    use souq_core::SourceError;

    use super::DirBundleSource;

    #[test]
    fn reads_the_locale_resource_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("ms.json"), r#"{"brand":"Souq"}"#).expect("write bundle");
        let source = DirBundleSource::new(dir.path(), 1024);
        let raw = source.fetch(Locale::Ms).expect("resource present");
        assert_eq!(raw, r#"{"brand":"Souq"}"#);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = DirBundleSource::new(dir.path(), 1024);
        let err = source.fetch(Locale::Zh).expect_err("resource absent");
        assert!(matches!(err, SourceError::NotFound(Locale::Zh)));
    }

    #[test]
    fn oversized_file_fails_closed() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("en.json"), "x".repeat(64)).expect("write bundle");
        let source = DirBundleSource::new(dir.path(), 16);
        let err = source.fetch(Locale::En).expect_err("oversized resource");
        assert!(matches!(err, SourceError::TooLarge { locale: Locale::En, .. }));
    }
}
