//! Application configuration

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use english_quest_domain::PlayerId;
use serde::{Deserialize, Serialize};

const DEFAULT_DB_PATH: &str = "./db.sqlite";
const DEFAULT_QUESTIONS_PER_SESSION: i32 = 5;
const MAX_QUESTIONS_PER_SESSION: i32 = 50;
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Language used for prompts and explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Anything other than a recognised code falls back to English.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ja" => Language::Ja,
            _ => Language::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: String,
    /// Explicit profile; when unset the profile file decides
    pub profile_id: Option<PlayerId>,
    pub questions_per_session: i32,
    /// Explicit language; when unset the profile file decides
    pub language: Option<Language>,
    /// Sessions loaded for the history view and the progress report
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            profile_id: None,
            questions_per_session: DEFAULT_QUESTIONS_PER_SESSION,
            language: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let profile_id = non_empty("PROFILE_ID")
            .map(|value| PlayerId::parse(&value))
            .transpose()
            .context("PROFILE_ID must be a valid UUID")?;

        let questions_per_session = non_empty("QUESTIONS_PER_SESSION")
            .map(|value| value.trim().parse::<i32>())
            .transpose()
            .context("QUESTIONS_PER_SESSION must be a whole number")?
            .unwrap_or(defaults.questions_per_session)
            .clamp(1, MAX_QUESTIONS_PER_SESSION);

        let history_limit = non_empty("HISTORY_LIMIT")
            .map(|value| value.trim().parse::<usize>())
            .transpose()
            .context("HISTORY_LIMIT must be a non-negative number")?
            .unwrap_or(defaults.history_limit);

        Ok(Self {
            db_path: non_empty("DB_PATH").unwrap_or(defaults.db_path),
            profile_id,
            questions_per_session,
            language: non_empty("LANG_PREF").map(|value| Language::parse_or_default(&value)),
            history_limit,
        })
    }
}

/// Preferences remembered between runs, stored as JSON in the platform
/// config directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profile_id: Option<PlayerId>,
    #[serde(default)]
    pub lang_pref: Language,
}

impl ProfileFile {
    /// `<config dir>/english-quest/config.json`, or `None` when the platform
    /// has no home directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "english-quest", "english-quest")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Read the file; a missing or unreadable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(file) => file,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse profile file");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read profile file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self).context("failed to encode profile file")?;
        fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Pick the active profile.
///
/// An explicit ID wins. Otherwise the profile file is consulted, and when it
/// has none a fresh ID is generated and written back so the next run finds
/// the same profile.
pub fn resolve_player_id(configured: Option<PlayerId>, profile_file: Option<&Path>) -> Result<PlayerId> {
    if let Some(player_id) = configured {
        return Ok(player_id);
    }
    let Some(path) = profile_file else {
        tracing::warn!("No config directory available; using a temporary profile");
        return Ok(PlayerId::new());
    };

    let mut file = ProfileFile::load(path);
    if let Some(player_id) = file.profile_id {
        return Ok(player_id);
    }

    let player_id = PlayerId::new();
    file.profile_id = Some(player_id);
    file.save(path)?;
    tracing::info!(player_id = %player_id, path = %path.display(), "Created new profile id");
    Ok(player_id)
}

/// Pick the display language: `LANG_PREF` first, then the profile file.
pub fn resolve_language(configured: Option<Language>, profile_file: Option<&Path>) -> Language {
    configured
        .or_else(|| profile_file.map(|path| ProfileFile::load(path).lang_pref))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    mod app_config {
        use super::*;

        #[test]
        fn defaults_when_nothing_is_set() {
            let config = AppConfig::from_lookup(lookup(&[])).unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.db_path, "./db.sqlite");
            assert_eq!(config.questions_per_session, 5);
        }

        #[test]
        fn reads_every_variable() {
            let id = PlayerId::new();
            let id_text = id.to_string();
            let config = AppConfig::from_lookup(lookup(&[
                ("DB_PATH", "/tmp/quest.sqlite"),
                ("PROFILE_ID", &id_text),
                ("QUESTIONS_PER_SESSION", "10"),
                ("LANG_PREF", "JA"),
                ("HISTORY_LIMIT", "50"),
            ]))
            .unwrap();

            assert_eq!(config.db_path, "/tmp/quest.sqlite");
            assert_eq!(config.profile_id, Some(id));
            assert_eq!(config.questions_per_session, 10);
            assert_eq!(config.language, Some(Language::Ja));
            assert_eq!(config.history_limit, 50);
        }

        #[test]
        fn question_count_is_clamped() {
            let config =
                AppConfig::from_lookup(lookup(&[("QUESTIONS_PER_SESSION", "500")])).unwrap();
            assert_eq!(config.questions_per_session, 50);
            let config = AppConfig::from_lookup(lookup(&[("QUESTIONS_PER_SESSION", "0")])).unwrap();
            assert_eq!(config.questions_per_session, 1);
        }

        #[test]
        fn unknown_language_falls_back_to_english() {
            let config = AppConfig::from_lookup(lookup(&[("LANG_PREF", "both")])).unwrap();
            assert_eq!(config.language, Some(Language::En));
        }

        #[test]
        fn malformed_values_are_errors() {
            assert!(AppConfig::from_lookup(lookup(&[("PROFILE_ID", "nope")])).is_err());
            assert!(AppConfig::from_lookup(lookup(&[("HISTORY_LIMIT", "-1")])).is_err());
        }
    }

    mod profile_file {
        use super::*;

        #[test]
        fn explicit_id_wins() {
            let id = PlayerId::new();
            assert_eq!(resolve_player_id(Some(id), None).unwrap(), id);
        }

        #[test]
        fn generated_id_is_persisted_and_reused() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("nested").join("config.json");

            let first = resolve_player_id(None, Some(&path)).unwrap();
            let second = resolve_player_id(None, Some(&path)).unwrap();

            assert_eq!(first, second);
            assert_eq!(ProfileFile::load(&path).profile_id, Some(first));
        }

        #[test]
        fn corrupt_file_is_replaced() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, "{not json").unwrap();

            let id = resolve_player_id(None, Some(&path)).unwrap();
            assert_eq!(ProfileFile::load(&path).profile_id, Some(id));
        }

        #[test]
        fn file_keeps_language_preference() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, r#"{"lang_pref":"ja"}"#).unwrap();

            let id = resolve_player_id(None, Some(&path)).unwrap();
            assert_eq!(ProfileFile::load(&path).profile_id, Some(id));
            assert_eq!(resolve_language(None, Some(&path)), Language::Ja);
        }

        #[test]
        fn configured_language_beats_the_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.json");
            fs::write(&path, r#"{"lang_pref":"ja"}"#).unwrap();

            assert_eq!(resolve_language(Some(Language::En), Some(&path)), Language::En);
        }

        #[test]
        fn language_defaults_to_english_without_a_file() {
            assert_eq!(resolve_language(None, None), Language::En);
            let dir = tempfile::tempdir().unwrap();
            let missing = dir.path().join("config.json");
            assert_eq!(resolve_language(None, Some(&missing)), Language::En);
        }
    }
}
