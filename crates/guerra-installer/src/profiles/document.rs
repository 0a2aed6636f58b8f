use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use guerra_core::ProfileDefaults;
use serde_json::{json, Map, Value};

use super::{ProfileChange, ProfileRequest};
use crate::fs_utils::write_replacing;

const PROFILES_KEY: &str = "profiles";

/// Inserts or refreshes the tier's entry in a launcher profile document.
///
/// A missing or unparsable document is replaced by a fresh one. Top-level
/// keys, other profiles and unknown keys of the entry itself are kept;
/// `created` is only written for new entries.
pub fn upsert_document_profile(
    path: &Path,
    request: &ProfileRequest,
    defaults: &ProfileDefaults,
    now: DateTime<Utc>,
) -> Result<ProfileChange> {
    let mut document = read_document(path)?;
    let mut profiles = match document.remove(PROFILES_KEY) {
        Some(Value::Object(profiles)) => profiles,
        Some(_) => {
            log::warn!(
                "replacing non-object launcher profiles at {}",
                path.display()
            );
            Map::new()
        }
        None => Map::new(),
    };
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let id = ProfileDefaults::document_profile_id(request.version);

    let fields = json!({
        "name": request.display_name,
        "gameDir": request.game_dir.to_string_lossy(),
        "lastVersionId": defaults.last_version_id,
        "resolution": {
            "width": defaults.resolution.width,
            "height": defaults.resolution.height,
            "fullscreen": defaults.resolution.fullscreen,
        },
        "type": defaults.profile_type,
        "lastUsed": timestamp,
    });
    let Value::Object(fields) = fields else {
        anyhow::bail!("launcher profile fields must serialize to an object");
    };

    let change = match profiles.get_mut(id) {
        Some(Value::Object(existing)) => {
            existing.extend(fields);
            existing
                .entry("created")
                .or_insert_with(|| Value::String(timestamp.clone()));
            ProfileChange::Updated
        }
        _ => {
            let mut entry = fields;
            entry.insert("created".to_string(), Value::String(timestamp.clone()));
            profiles.insert(id.to_string(), Value::Object(entry));
            ProfileChange::Created
        }
    };

    document.insert(PROFILES_KEY.to_string(), Value::Object(profiles));
    let rendered = serde_json::to_vec_pretty(&Value::Object(document))
        .context("failed to serialize launcher profiles")?;
    write_replacing(path, &rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(change)
}

fn read_document(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) | Err(_) => {
            log::warn!(
                "replacing unreadable launcher profiles at {}",
                path.display()
            );
            Ok(Map::new())
        }
    }
}
