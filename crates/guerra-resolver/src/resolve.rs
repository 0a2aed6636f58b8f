use std::path::PathBuf;

use guerra_core::{
    DownloadSource, DownloadSpec, InstallSelection, Launcher, LauncherFamily, PlatformDirs,
    UrlCatalog, VersionTier, PROFILE_BASE_NAME,
};

/// Maps a selection onto the archive to fetch and the directory to fill.
///
/// Pure: no filesystem access. A manual selection must already have been
/// validated; its path is used verbatim.
pub fn resolve(
    selection: &InstallSelection,
    catalog: &UrlCatalog,
    dirs: &PlatformDirs,
) -> DownloadSpec {
    DownloadSpec {
        source: resolve_source(catalog, selection.launcher.family(), selection.version),
        target_dir: resolve_target_dir(&selection.launcher, selection.version, dirs),
    }
}

pub fn resolve_target_dir(
    launcher: &Launcher,
    version: VersionTier,
    dirs: &PlatformDirs,
) -> PathBuf {
    match launcher {
        Launcher::Manual(path) => path.clone(),
        Launcher::Tlauncher => dirs.tlauncher_versions_dir().join(folder_name(version)),
        Launcher::Sklauncher => dirs.sklauncher_instances_dir().join(folder_name(version)),
        Launcher::Modrinth => dirs
            .modrinth_profiles_dir()
            .join(profile_display_name(version)),
        Launcher::Curseforge => dirs
            .curseforge_instances_dir()
            .join(profile_display_name(version)),
    }
}

/// Missing and placeholder links both resolve to simulation mode.
pub fn resolve_source(
    catalog: &UrlCatalog,
    family: LauncherFamily,
    version: VersionTier,
) -> DownloadSource {
    match catalog.lookup(family, version) {
        Some(url) => DownloadSource::Archive(url.trim().to_string()),
        None => DownloadSource::Unconfigured,
    }
}

pub fn profile_display_name(version: VersionTier) -> String {
    format!("{PROFILE_BASE_NAME} {}", version.label())
}

pub fn folder_name(version: VersionTier) -> String {
    format!("{PROFILE_BASE_NAME} {}", version.label())
}
