mod document;
mod rows;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use guerra_core::{LauncherFamily, PlatformDirs, ProfileDefaults, VersionTier};

pub use document::upsert_document_profile;
pub use rows::upsert_row_profile;

/// Where a launcher keeps its profile list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileStore {
    /// JSON file holding a `profiles` object keyed by profile id.
    Document(PathBuf),
    /// SQLite database with a `profiles` table keyed by display name.
    Rows(PathBuf),
}

impl ProfileStore {
    /// Launchers without a store get no profile registration.
    pub fn for_family(family: LauncherFamily, dirs: &PlatformDirs) -> Option<Self> {
        match family {
            LauncherFamily::Sklauncher => Some(Self::Document(dirs.launcher_profiles_path())),
            LauncherFamily::Modrinth => Some(Self::Rows(dirs.modrinth_database_path())),
            LauncherFamily::Tlauncher | LauncherFamily::Curseforge | LauncherFamily::Manual => {
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Document(path) | Self::Rows(path) => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Document(_) => "profile document",
            Self::Rows(_) => "profile database",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    pub version: VersionTier,
    pub display_name: String,
    pub game_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileChange {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied(ProfileChange),
    /// Carries the diagnostic; the install itself still counts as done.
    Failed(String),
}

impl ReconcileOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Registers the installed directory with the launcher. Never fails the
/// caller: store errors are logged and folded into the outcome.
pub fn reconcile_profile(
    store: &ProfileStore,
    request: &ProfileRequest,
    defaults: &ProfileDefaults,
    now: DateTime<Utc>,
) -> ReconcileOutcome {
    let result = match store {
        ProfileStore::Document(path) => upsert_document_profile(path, request, defaults, now),
        ProfileStore::Rows(path) => upsert_row_profile(path, request, defaults, now),
    };

    match result {
        Ok(change) => {
            log::info!(
                "{} {:?} profile '{}' in {}",
                store.kind(),
                change,
                request.display_name,
                store.path().display()
            );
            ReconcileOutcome::Applied(change)
        }
        Err(err) => {
            let diagnostic = format!("{err:#}");
            log::warn!(
                "failed to update {} {}: {diagnostic}",
                store.kind(),
                store.path().display()
            );
            ReconcileOutcome::Failed(diagnostic)
        }
    }
}
