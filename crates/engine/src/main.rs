//! English Quest - command-line entry point.
//!
//! Loads the active profile, normalises it, and prints the recent history
//! together with a progress report.

use std::sync::Arc;

use anyhow::Context;
use english_quest_domain::{ProgressReport, SessionRecord};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use english_quest_engine::infrastructure::{
    clock::SystemClock,
    config::{resolve_language, resolve_player_id, AppConfig, ProfileFile},
    ports::ClockPort,
    sqlite_store::SqliteStore,
};
use english_quest_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root when run through cargo.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "english_quest_engine=info,english_quest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting English Quest");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let profile_file = ProfileFile::default_path();
    let player_id = resolve_player_id(config.profile_id, profile_file.as_deref())
        .context("failed to resolve the active profile")?;
    let language = resolve_language(config.language, profile_file.as_deref());

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    tracing::info!(db_path = %config.db_path, "Opening database");
    let store = Arc::new(
        SqliteStore::new(&config.db_path, clock.clone())
            .await
            .with_context(|| format!("failed to open database at {}", config.db_path))?,
    );

    let app = App::new(&config, player_id, store.clone(), store, clock);
    let stats = app.start().await.context("failed to load profile")?;
    tracing::info!(
        player_id = %player_id,
        language = language.as_str(),
        "{}",
        stats.status_line()
    );

    let history = app
        .history
        .recent(player_id, app.history_limit)
        .await
        .context("failed to load session history")?;
    print_history(&history, config.questions_per_session);

    let report = app
        .use_cases
        .progress
        .analyze
        .execute(player_id, &stats)
        .await
        .context("failed to analyze progress")?;
    print_report(&report);

    Ok(())
}

fn print_history(history: &[SessionRecord], questions_per_session: i32) {
    println!("Recent sessions");
    if history.is_empty() {
        println!("  (none yet)");
        return;
    }
    for record in history {
        let mut line = format!(
            "  {}  {:<20} {:>5}  EXP +{}",
            record.ended_at.format("%Y-%m-%d %H:%M"),
            record.mode.display_name(),
            record.score_label(questions_per_session),
            record.exp_gained
        );
        if record.fainted {
            line.push_str(&format!(" -{} (fainted)", record.exp_lost));
        }
        if record.leveled_up {
            line.push_str("  LEVEL UP");
        }
        println!("{line}");
    }
}

fn print_report(report: &ProgressReport) {
    println!();
    println!("Progress report");
    println!("  {}", report.summary);
    println!("  {}", report.recommendation);
    for insight in &report.weak_points {
        println!("  weak    {:<20} {}", insight.mode.display_name(), insight.description);
    }
    for insight in &report.strengths {
        println!("  strong  {:<20} {}", insight.mode.display_name(), insight.description);
    }
    for action in &report.action_plan {
        println!("  [{}] {}: {}", action.priority, action.title, action.description);
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
