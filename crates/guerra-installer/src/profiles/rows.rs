use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use guerra_core::ProfileDefaults;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use super::{ProfileChange, ProfileRequest};

const INSERT_PROFILE_SQL: &str = "INSERT INTO profiles (
    path, install_stage, name, icon_path, game_version, mod_loader, mod_loader_version,
    groups, linked_project_id, linked_version_id, locked, created, modified, last_played,
    submitted_time_played, recent_time_played, override_java_path,
    override_extra_launch_args, override_custom_env_vars, override_mc_memory_max,
    override_mc_force_fullscreen, override_mc_game_resolution_x,
    override_mc_game_resolution_y, override_hook_pre_launch, override_hook_wrapper,
    override_hook_post_exit, protocol_version, launcher_feature_version
) VALUES (
    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
    ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28
)";

/// Inserts the profile row keyed by display name, or bumps `modified` on an
/// existing one. The database must already exist; it is never created here.
pub fn upsert_row_profile(
    db_path: &Path,
    request: &ProfileRequest,
    defaults: &ProfileDefaults,
    now: DateTime<Utc>,
) -> Result<ProfileChange> {
    if !db_path.is_file() {
        bail!("launcher database not found: {}", db_path.display());
    }

    let mut conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_WRITE)
        .with_context(|| format!("failed to open launcher database {}", db_path.display()))?;
    let tx = conn
        .transaction()
        .context("failed to start profile transaction")?;

    let key = request.display_name.as_str();
    let existing: Option<String> = tx
        .query_row(
            "SELECT path FROM profiles WHERE path = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .context("failed to query launcher profiles")?;

    let timestamp = now.timestamp();
    let change = if existing.is_some() {
        tx.execute(
            "UPDATE profiles SET modified = ?1 WHERE path = ?2",
            params![timestamp, key],
        )
        .context("failed to update launcher profile")?;
        ProfileChange::Updated
    } else {
        tx.execute(
            INSERT_PROFILE_SQL,
            params![
                key,
                "installed",
                key,
                None::<String>,
                defaults.game_version,
                defaults.mod_loader,
                defaults.mod_loader_version,
                defaults.groups,
                None::<String>,
                None::<String>,
                None::<i64>,
                timestamp,
                timestamp,
                None::<i64>,
                0_i64,
                0_i64,
                None::<String>,
                0_i64,
                0_i64,
                None::<i64>,
                None::<i64>,
                None::<i64>,
                None::<i64>,
                None::<String>,
                None::<String>,
                None::<String>,
                defaults.protocol_version,
                defaults.launcher_feature_version,
            ],
        )
        .context("failed to insert launcher profile")?;
        ProfileChange::Created
    };

    tx.commit().context("failed to commit launcher profile")?;
    Ok(change)
}
