// crates/souq-server/src/telemetry.rs
// ============================================================================
// Module: Pipeline Telemetry
// Description: Observability hooks for locale resolution and bundle loading.
// Purpose: Provide metric events and warnings without hard dependencies.
// Dependencies: souq-core
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for resolution counters and
//! bundle-load outcomes. It is intentionally dependency-light so deployments
//! can plug in Prometheus or OpenTelemetry without redesign; the default
//! sinks discard metrics and write degraded-render warnings to stderr.

// ============================================================================
// SECTION: Imports
// ============================================================================

use souq_core::Locale;
use souq_core::ResolutionSource;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Bundle cache outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CacheOutcome {
    /// Bundle served from the cache with no resource I/O.
    Hit,
    /// Bundle loaded from its resource and cached.
    Miss,
    /// Bundle resource was missing or malformed.
    LoadError,
}

impl CacheOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::LoadError => "load_error",
        }
    }
}

/// Locale resolution metric event payload.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionEvent {
    /// The resolved locale.
    pub locale: Locale,
    /// Where the locale came from.
    pub source: ResolutionSource,
}

/// Bundle load metric event payload.
#[derive(Debug, Clone, Copy)]
pub struct BundleLoadEvent {
    /// The locale whose bundle was requested.
    pub locale: Locale,
    /// Cache outcome for the request.
    pub outcome: CacheOutcome,
}

// ============================================================================
// SECTION: Traits
// ============================================================================

/// Metrics sink for the locale pipeline.
pub trait PipelineMetrics: Send + Sync {
    /// Records a resolution event.
    fn record_resolution(&self, event: ResolutionEvent);
    /// Records a bundle load event.
    fn record_bundle_load(&self, event: BundleLoadEvent);
}

/// No-op metrics sink.
///
/// # Invariants
/// - Metrics are intentionally discarded.
pub struct NoopMetrics;

impl PipelineMetrics for NoopMetrics {
    fn record_resolution(&self, _event: ResolutionEvent) {}

    fn record_bundle_load(&self, _event: BundleLoadEvent) {}
}

/// Sink for degraded-render warnings.
pub trait WarnSink: Send + Sync {
    /// Emits one warning line.
    fn warn(&self, message: &str);
}

/// Warning sink writing to stderr.
pub struct StderrWarnSink;

impl WarnSink for StderrWarnSink {
    #[allow(clippy::print_stderr, reason = "Stderr is this sink's delivery channel.")]
    fn warn(&self, message: &str) {
        eprintln!("souq-server: WARNING: {message}");
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

    use souq_core::Locale;
    use souq_core::ResolutionSource;

    use super::BundleLoadEvent;
    use super::CacheOutcome;
    use super::NoopMetrics;
    use super::PipelineMetrics;
    use super::ResolutionEvent;

    #[test]
    fn labels_are_stable() {
        assert_eq!(CacheOutcome::Hit.as_str(), "hit");
        assert_eq!(CacheOutcome::Miss.as_str(), "miss");
        assert_eq!(CacheOutcome::LoadError.as_str(), "load_error");
    }

    #[test]
    fn noop_sink_accepts_events() {
        let metrics = NoopMetrics;
        metrics.record_resolution(ResolutionEvent {
            locale: Locale::En,
            source: ResolutionSource::Fallback,
        });
        metrics.record_bundle_load(BundleLoadEvent {
            locale: Locale::En,
            outcome: CacheOutcome::Miss,
        });
    }
}
