//! Advisory commands: `adapt` and `reflect`.
//!
//! Both calls are best-effort -- the core client substitutes fixed
//! defaults on any failure, so these commands always succeed.

use chrono::{Local, Timelike};
use vibesync_core::storage::{Config, Database};
use vibesync_core::{AdvisoryClient, Mood, Playlist, TaskList};

const TASKS_KEY: &str = "tasks";
const MOOD_KEY: &str = "mood";

fn load_mood(db: &Database) -> Mood {
    db.kv_get(MOOD_KEY)
        .ok()
        .flatten()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn load_tasks(db: &Database) -> TaskList {
    db.kv_get(TASKS_KEY)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn client(config: &Config) -> AdvisoryClient {
    AdvisoryClient::new(config.advisory_api_key(), config.advisory.model.clone())
}

/// Ask for a theme/music pairing and apply it to the configuration.
pub fn run_adapt(mood_override: Option<Mood>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    let db = Database::open()?;

    let mood = match mood_override {
        Some(mood) => {
            db.kv_set(MOOD_KEY, mood.as_str())?;
            mood
        }
        None => load_mood(&db),
    };
    let tasks = load_tasks(&db);
    let hour = Local::now().hour();

    let runtime = tokio::runtime::Runtime::new()?;
    let suggestion = runtime.block_on(client(&config).suggest_mood(
        tasks.completed_count(),
        tasks.len(),
        hour,
        mood,
    ));

    config.ui.theme = suggestion.theme;
    let mut playlist = Playlist::builtin();
    if let Some(track) = playlist.select_by_title(&suggestion.music) {
        config.ambience.track = track.title.clone();
    }
    config.save()?;

    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}

/// Turn a free-text reflection into a summary and mantra.
pub fn run_reflect(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let tasks = load_tasks(&db);

    // Fold the day's numbers into the reflection, as the reflection
    // dialog does.
    let daily_summary = format!(
        "Today I completed {} tasks and achieved a flow score of {}. I felt: {}",
        tasks.completed_count(),
        db.total_flow_score()?,
        text
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let reflection = runtime.block_on(client(&config).reflect(&daily_summary));

    println!("{}", serde_json::to_string_pretty(&reflection)?);
    Ok(())
}
