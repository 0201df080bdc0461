//! Headless client entry point.
//!
//! Runs one scripted session at a fixed timestep and prints a summary.
mod autopilot;
mod config;
mod report;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use game_content::{ContentBundle, ContentFactory};
use runtime::{FilePreferenceStore, Session, SessionConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use autopilot::Autopilot;
use config::CliConfig;
use report::RunReport;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let content = load_content(&config)?;
    let mut session = build_session(&config, content)?;
    let mut autopilot = Autopilot::new(config.autopilot.clone(), &session);
    let mut report = RunReport::new(&session);

    let steps = config.steps();
    tracing::info!(steps, dt = config.dt, "simulation started");
    for _ in 0..steps {
        autopilot.step(&mut session, config.dt);
        session.tick(config.dt);
        report.collect();
        if session.is_over() {
            break;
        }
    }
    tracing::info!(elapsed = session.elapsed(), over = session.is_over(), "simulation finished");

    println!("{}", report.summary(&session));
    Ok(())
}

fn load_content(config: &CliConfig) -> Result<ContentBundle> {
    match &config.data_dir {
        Some(dir) => ContentFactory::load_dir(dir)
            .with_context(|| format!("loading content from {}", dir.display())),
        None => ContentBundle::builtin().context("parsing built-in content"),
    }
}

fn build_session(config: &CliConfig, content: ContentBundle) -> Result<Session> {
    let session_config = SessionConfig {
        archetype: config.archetype,
        difficulty: config.difficulty,
        seed: config.seed,
        ..SessionConfig::default()
    };
    let builder = Session::builder().config(session_config).content(content);

    // Fall back to the in-memory store when the config dir is unusable.
    let builder = if config.enable_persistence {
        match FilePreferenceStore::default_location() {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "preferences file");
                builder.store(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "preferences will not be saved");
                builder
            }
        }
    } else {
        builder
    };

    builder.build().context("building session")
}

/// Setup logging to a per-session file.
///
/// The returned guard flushes the non-blocking writer on drop.
fn setup_logging(config: &CliConfig) -> Result<WorkerGuard> {
    let log_dir = config.log_dir.clone().unwrap_or_else(default_log_directory);

    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("creating log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // stdout is reserved for the summary
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/client.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory for logs, or the temp dir when there is no home.
fn default_log_directory() -> PathBuf {
    ProjectDirs::from("", "", "erosion")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("erosion").join("logs"))
}
