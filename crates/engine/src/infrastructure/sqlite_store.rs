//! SQLite-backed profile and session history storage.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use english_quest_domain::{GameMode, PlayerId, PlayerStats, SessionId, SessionRecord};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, ProfileRepo, RepoError, SessionRepo};

/// SQLite implementation of both storage ports.
///
/// `profiles` holds one row per player and is upserted on every save.
/// `sessions` is append-only and read newest first.
pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteStore {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("open", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                class TEXT NOT NULL,
                level INTEGER NOT NULL,
                exp INTEGER NOT NULL,
                next_level_exp INTEGER NOT NULL,
                hp INTEGER NOT NULL,
                max_hp INTEGER NOT NULL,
                attack REAL NOT NULL,
                defense REAL NOT NULL,
                combo INTEGER NOT NULL,
                streak_days INTEGER NOT NULL,
                gold INTEGER NOT NULL,
                exp_boost REAL NOT NULL DEFAULT 0,
                damage_reduction REAL NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_profiles", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                player_id TEXT NOT NULL,
                mode TEXT NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT NOT NULL,
                question_set_id TEXT,
                correct_count INTEGER NOT NULL,
                best_combo INTEGER NOT NULL,
                exp_gained INTEGER NOT NULL,
                exp_lost INTEGER NOT NULL,
                hp_delta INTEGER NOT NULL,
                gold_delta INTEGER NOT NULL,
                defense_delta REAL NOT NULL,
                fainted INTEGER NOT NULL,
                leveled_up INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_sessions", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_player_ended ON sessions (player_id, ended_at)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_sessions", e))?;

        Ok(Self { pool, clock })
    }
}

/// Fixed-width UTC form so text ordering matches time ordering.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("timestamp {value}: {e}")))
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("{name}: {e}")))
}

fn stats_from_row(row: &SqliteRow) -> Result<PlayerStats, RepoError> {
    Ok(PlayerStats {
        name: column(row, "name")?,
        class: column(row, "class")?,
        level: column(row, "level")?,
        exp: column(row, "exp")?,
        next: column(row, "next_level_exp")?,
        hp: column(row, "hp")?,
        max_hp: column(row, "max_hp")?,
        attack: column(row, "attack")?,
        defense: column(row, "defense")?,
        combo: column(row, "combo")?,
        streak: column(row, "streak_days")?,
        gold: column(row, "gold")?,
        exp_boost: column(row, "exp_boost")?,
        damage_reduction: column(row, "damage_reduction")?,
    })
}

fn record_from_row(row: &SqliteRow) -> Result<SessionRecord, RepoError> {
    let id: String = column(row, "id")?;
    let player_id: String = column(row, "player_id")?;
    let mode: String = column(row, "mode")?;
    let started_at: String = column(row, "started_at")?;
    let ended_at: String = column(row, "ended_at")?;

    Ok(SessionRecord {
        id: SessionId::parse(&id).map_err(RepoError::serialization)?,
        player_id: PlayerId::parse(&player_id).map_err(RepoError::serialization)?,
        mode: mode
            .parse::<GameMode>()
            .map_err(RepoError::serialization)?,
        started_at: parse_timestamp(&started_at)?,
        ended_at: parse_timestamp(&ended_at)?,
        question_set_id: column(row, "question_set_id")?,
        correct_count: column(row, "correct_count")?,
        best_combo: column(row, "best_combo")?,
        exp_gained: column(row, "exp_gained")?,
        exp_lost: column(row, "exp_lost")?,
        hp_delta: column(row, "hp_delta")?,
        gold_delta: column(row, "gold_delta")?,
        defense_delta: column(row, "defense_delta")?,
        fainted: column(row, "fainted")?,
        leveled_up: column(row, "leveled_up")?,
    })
}

#[async_trait]
impl ProfileRepo for SqliteStore {
    async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerStats>, RepoError> {
        let row = sqlx::query(
            r#"
            SELECT name, class, level, exp, next_level_exp, hp, max_hp, attack, defense,
                   combo, streak_days, gold, exp_boost, damage_reduction
            FROM profiles
            WHERE id = ?
            "#,
        )
        .bind(player_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("load_profile", e))?;

        row.as_ref().map(stats_from_row).transpose()
    }

    async fn save(&self, player_id: PlayerId, stats: &PlayerStats) -> Result<(), RepoError> {
        let now = timestamp(self.clock.now());

        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, name, class, level, exp, next_level_exp, hp, max_hp, attack, defense,
                combo, streak_days, gold, exp_boost, damage_reduction, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                class = excluded.class,
                level = excluded.level,
                exp = excluded.exp,
                next_level_exp = excluded.next_level_exp,
                hp = excluded.hp,
                max_hp = excluded.max_hp,
                attack = excluded.attack,
                defense = excluded.defense,
                combo = excluded.combo,
                streak_days = excluded.streak_days,
                gold = excluded.gold,
                exp_boost = excluded.exp_boost,
                damage_reduction = excluded.damage_reduction,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(player_id.to_string())
        .bind(&stats.name)
        .bind(&stats.class)
        .bind(stats.level)
        .bind(stats.exp)
        .bind(stats.next)
        .bind(stats.hp)
        .bind(stats.max_hp)
        .bind(stats.attack)
        .bind(stats.defense)
        .bind(stats.combo)
        .bind(stats.streak)
        .bind(stats.gold)
        .bind(stats.exp_boost)
        .bind(stats.damage_reduction)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_profile", e))?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepo for SqliteStore {
    async fn save(&self, record: &SessionRecord) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                id, player_id, mode, started_at, ended_at, question_set_id, correct_count,
                best_combo, exp_gained, exp_lost, hp_delta, gold_delta, defense_delta,
                fainted, leveled_up
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.player_id.to_string())
        .bind(record.mode.as_str())
        .bind(timestamp(record.started_at))
        .bind(timestamp(record.ended_at))
        .bind(record.question_set_id.as_deref())
        .bind(record.correct_count)
        .bind(record.best_combo)
        .bind(record.exp_gained)
        .bind(record.exp_lost)
        .bind(record.hp_delta)
        .bind(record.gold_delta)
        .bind(record.defense_delta)
        .bind(record.fainted)
        .bind(record.leveled_up)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_session", e))?;

        Ok(())
    }

    async fn list_for_player(
        &self,
        player_id: PlayerId,
        limit: usize,
    ) -> Result<Vec<SessionRecord>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, player_id, mode, started_at, ended_at, question_set_id, correct_count,
                   best_combo, exp_gained, exp_lost, hp_delta, gold_delta, defense_delta,
                   fainted, leveled_up
            FROM sessions
            WHERE player_id = ?
            ORDER BY ended_at DESC
            LIMIT ?
            "#,
        )
        .bind(player_id.to_string())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_sessions", e))?;

        rows.iter().map(record_from_row).collect()
    }
}
