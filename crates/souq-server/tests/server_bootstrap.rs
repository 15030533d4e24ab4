//! Server bootstrap tests for souq-server.
// crates/souq-server/tests/server_bootstrap.rs
// =============================================================================
// Module: Server Bootstrap Tests
// Description: Validate storefront server construction and the file-backed
//              locale pipeline.
// Purpose: Ensure invalid configuration fails closed at startup and bundle
//          files flow through the loader exactly once.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only setup assertions."
)]

use std::fs;
use std::sync::Arc;

use souq_core::BundleCache;
use souq_core::BundleLoader;
use souq_core::BundleSource;
use souq_core::Locale;
use souq_core::LocaleRegistry;
use souq_server::DirBundleSource;
use souq_server::ServerError;
use souq_server::SouqConfig;
use souq_server::StorefrontServer;

fn config_for(dir: &std::path::Path) -> SouqConfig {
    let mut config = SouqConfig::default();
    config.locales.bundle_dir = dir.to_path_buf();
    config
}

#[test]
fn server_builds_from_a_valid_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("en.json"), r#"{"home":{"welcome":"Welcome"}}"#)
        .expect("write bundle");
    StorefrontServer::from_config(config_for(dir.path())).expect("server builds");
}

#[test]
fn invalid_config_is_rejected_at_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_for(dir.path());
    config.server.bind = "no-port".to_string();
    let Err(err) = StorefrontServer::from_config(config) else {
        panic!("expected config rejection");
    };
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn file_backed_pipeline_serves_and_caches_bundles() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("en.json"),
        r#"{"home":{"welcome":"Welcome to Souq","tagline":"Fresh goods"}}"#,
    )
    .expect("write en bundle");
    fs::write(dir.path().join("ar.json"), r#"{"home":{"welcome":"أهلاً بكم في السوق"}}"#)
        .expect("write ar bundle");

    let source = DirBundleSource::new(dir.path(), 1024 * 1024);
    let loader = BundleLoader::new(
        LocaleRegistry::default(),
        Arc::new(BundleCache::new()),
        Arc::new(source) as Arc<dyn BundleSource>,
    );

    let (context, degraded) = loader.context(Locale::Ar).expect("arabic context");
    assert!(degraded.is_none());
    assert_eq!(context.message("home.welcome"), "أهلاً بكم في السوق");
    // Key absent from the Arabic bundle falls back to the default bundle.
    assert_eq!(context.message("home.tagline"), "Fresh goods");

    // Both bundles are now cached; deleting the files proves later loads
    // never touch the directory again.
    fs::remove_file(dir.path().join("en.json")).expect("remove en");
    fs::remove_file(dir.path().join("ar.json")).expect("remove ar");
    let (context, degraded) = loader.context(Locale::Ar).expect("cached context");
    assert!(degraded.is_none());
    assert_eq!(context.message("home.welcome"), "أهلاً بكم في السوق");
}

#[test]
fn missing_bundle_file_degrades_to_the_fallback_bundle() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("en.json"), r#"{"home":{"welcome":"Welcome"}}"#)
        .expect("write en bundle");

    let source = DirBundleSource::new(dir.path(), 1024 * 1024);
    let loader = BundleLoader::new(
        LocaleRegistry::default(),
        Arc::new(BundleCache::new()),
        Arc::new(source) as Arc<dyn BundleSource>,
    );

    let (context, degraded) = loader.context(Locale::Zh).expect("degraded context");
    assert!(degraded.is_some());
    assert_eq!(context.message("home.welcome"), "Welcome");
}
