// crates/souq-cli/src/main.rs
// ============================================================================
// Module: Souq CLI Entry Point
// Description: Command dispatcher for the Souq storefront workflows.
// Purpose: Provide a safe, localized CLI for serving and bundle maintenance.
// Dependencies: clap, souq-core, souq-server, tokio.
// ============================================================================

//! ## Overview
//! The Souq CLI starts the storefront server and offers offline maintenance
//! commands for the locale pipeline: bundle health checks, path resolution
//! dry runs, and configuration validation. All user-facing strings are
//! routed through the i18n catalog to prepare for future localization.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use souq_cli::i18n::set_locale;
use souq_cli::t;
use souq_core::BundleCache;
use souq_core::BundleLoadError;
use souq_core::BundleLoader;
use souq_core::BundleSource;
use souq_core::Locale;
use souq_core::LocaleRegistry;
use souq_core::Resolution;
use souq_core::SUPPORTED_LOCALES;
use souq_server::DirBundleSource;
use souq_server::SouqConfig;
use souq_server::StorefrontServer;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "SOUQ_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "souq", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Souq storefront server.
    Serve(ServeCommand),
    /// Check every supported locale's bundle resource.
    CheckBundles(CheckBundlesCommand),
    /// Resolve a request path to a locale without serving.
    Resolve(ResolveCommand),
    /// Validate a Souq configuration file.
    ValidateConfig(ValidateConfigCommand),
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to souq.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `check-bundles` command.
#[derive(Args, Debug)]
struct CheckBundlesCommand {
    /// Optional config file path (defaults to souq.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `resolve` command.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Request path to resolve (e.g. `/ar/products`).
    #[arg(value_name = "PATH")]
    path: String,
    /// Optional config file path (defaults to souq.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Configuration for the `validate-config` command.
#[derive(Args, Debug)]
struct ValidateConfigCommand {
    /// Config file path to validate.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a localized message.
#[derive(Debug)]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    if let Some(locale) = env_lang.as_deref().and_then(souq_cli::i18n::Locale::parse) {
        set_locale(locale);
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::CheckBundles(command) => command_check_bundles(&command),
        Commands::Resolve(command) => command_resolve(&command),
        Commands::ValidateConfig(command) => command_validate_config(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = SouqConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("serve.config.load_failed", error = err)))?;
    let bind = config.server.bind.clone();
    let dir = config.locales.bundle_dir.display().to_string();
    let server = StorefrontServer::from_config(config)
        .map_err(|err| CliError::new(t!("serve.init_failed", error = err)))?;
    write_stderr_line(&t!("serve.listening", bind = bind, dir = dir))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    server.serve().await.map_err(|err| CliError::new(t!("serve.failed", error = err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Bundle Check Command
// ============================================================================

/// Health of one locale's bundle resource.
#[derive(Debug)]
enum BundleStatus {
    /// The bundle loaded.
    Ok {
        /// Leaf message count.
        count: usize,
        /// Fallback-bundle keys this bundle does not translate.
        missing_keys: Vec<String>,
    },
    /// No resource file exists for the locale.
    Missing(PathBuf),
    /// The resource exists but failed to read or parse.
    Broken(String),
}

/// Per-locale bundle health report.
#[derive(Debug)]
struct BundleReport {
    /// Status per supported locale, in registry order.
    entries: Vec<(Locale, BundleStatus)>,
    /// The fallback locale the report was built against.
    fallback: Locale,
}

impl BundleReport {
    /// Returns true when every locale the storefront depends on is usable:
    /// the fallback bundle must load, other locales may be absent, and
    /// untranslated keys only degrade per key at render time.
    fn is_healthy(&self) -> bool {
        self.entries.iter().all(|(locale, status)| match status {
            BundleStatus::Ok {
                ..
            } => true,
            BundleStatus::Missing(_) => *locale != self.fallback,
            BundleStatus::Broken(_) => false,
        })
    }
}

/// Builds the bundle health report for a configuration.
///
/// Each loadable bundle's flattened key set is diffed against the fallback
/// bundle's, so translators can see exactly which keys will degrade.
fn bundle_report(config: &SouqConfig, fallback: Locale) -> BundleReport {
    let source =
        DirBundleSource::new(config.locales.bundle_dir.clone(), config.locales.max_bundle_bytes);
    let loader = BundleLoader::new(
        LocaleRegistry::new(fallback),
        Arc::new(BundleCache::new()),
        Arc::new(source.clone()) as Arc<dyn BundleSource>,
    );
    let fallback_keys =
        loader.load(fallback).map(|bundle| bundle.flattened_keys()).unwrap_or_default();
    let entries = SUPPORTED_LOCALES
        .iter()
        .map(|locale| {
            let status = match loader.load(*locale) {
                Ok(bundle) => {
                    let missing_keys = if *locale == fallback {
                        Vec::new()
                    } else {
                        fallback_keys
                            .iter()
                            .filter(|key| bundle.lookup(key).is_none())
                            .cloned()
                            .collect()
                    };
                    BundleStatus::Ok {
                        count: bundle.len(),
                        missing_keys,
                    }
                }
                Err(BundleLoadError::Missing {
                    ..
                }) => BundleStatus::Missing(source.resource_path(*locale)),
                Err(err) => BundleStatus::Broken(err.to_string()),
            };
            (*locale, status)
        })
        .collect();
    BundleReport {
        entries,
        fallback,
    }
}

/// Executes the `check-bundles` command.
fn command_check_bundles(command: &CheckBundlesCommand) -> CliResult<ExitCode> {
    let config = SouqConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let fallback = config
        .fallback_locale()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let report = bundle_report(&config, fallback);

    let mut ok = 0_usize;
    let mut missing = 0_usize;
    let mut broken = 0_usize;
    for (locale, status) in &report.entries {
        let line = match status {
            BundleStatus::Ok {
                count,
                missing_keys,
            } => {
                ok += 1;
                if !missing_keys.is_empty() {
                    write_stdout_line(&t!(
                        "bundles.missing_keys",
                        locale = locale,
                        count = missing_keys.len(),
                        keys = missing_keys.join(", "),
                    ))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
                }
                t!("bundles.ok", locale = locale, count = count)
            }
            BundleStatus::Missing(path) => {
                missing += 1;
                t!("bundles.missing", locale = locale, path = path.display())
            }
            BundleStatus::Broken(detail) => {
                broken += 1;
                t!("bundles.error", locale = locale, error = detail)
            }
        };
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    write_stdout_line(&t!("bundles.summary", ok = ok, missing = missing, broken = broken))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    if report.is_healthy() {
        Ok(ExitCode::SUCCESS)
    } else {
        write_stderr_line(&t!("bundles.fallback_required", locale = report.fallback))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Formats the resolution line for a request path.
fn resolve_line(registry: &LocaleRegistry, path: &str) -> String {
    let Resolution {
        locale,
        source,
    } = registry.resolve_path(path);
    t!(
        "resolve.result",
        path = path,
        locale = locale,
        source = source.as_str(),
        dir = locale.direction().as_str(),
    )
}

/// Executes the `resolve` command.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let config = SouqConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let fallback = config
        .fallback_locale()
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let registry = LocaleRegistry::new(fallback);
    write_stdout_line(&resolve_line(&registry, &command.path))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Command
// ============================================================================

/// Executes the `validate-config` command.
fn command_validate_config(command: &ValidateConfigCommand) -> CliResult<ExitCode> {
    SouqConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
