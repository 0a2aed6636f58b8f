mod catalog;
mod download;
mod layout;
mod profile;
mod progress;
mod selection;

pub use catalog::{is_placeholder_url, UrlCatalog};
pub use download::{DownloadSource, DownloadSpec};
pub use layout::PlatformDirs;
pub use profile::{ProfileDefaults, ProfileResolution, PROFILE_BASE_NAME};
pub use progress::ProgressEvent;
pub use selection::{InstallSelection, Launcher, LauncherFamily, LicenseTier, VersionTier};

#[cfg(test)]
mod tests;
