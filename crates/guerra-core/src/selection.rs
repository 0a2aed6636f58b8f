use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LicenseTier {
    Original,
    Alternative,
}

impl LicenseTier {
    pub const ALL: [Self; 2] = [Self::Original, Self::Alternative];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Alternative => "alternative",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "original" | "premium" => Some(Self::Original),
            "alternative" | "pirata" => Some(Self::Alternative),
            _ => None,
        }
    }

    /// Launchers the wizard offers for this license tier.
    pub fn offered_launchers(self) -> &'static [LauncherFamily] {
        match self {
            Self::Original => &[
                LauncherFamily::Modrinth,
                LauncherFamily::Curseforge,
                LauncherFamily::Manual,
            ],
            Self::Alternative => &[
                LauncherFamily::Tlauncher,
                LauncherFamily::Sklauncher,
                LauncherFamily::Manual,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VersionTier {
    Full,
    Intermediate,
    Lightweight,
}

impl VersionTier {
    pub const ALL: [Self; 3] = [Self::Full, Self::Intermediate, Self::Lightweight];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Intermediate => "intermediate",
            Self::Lightweight => "lightweight",
        }
    }

    /// Label embedded in folder and profile names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Intermediate => "Intermediate",
            Self::Lightweight => "Lightweight",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "full" => Some(Self::Full),
            "intermediate" => Some(Self::Intermediate),
            "lightweight" | "light" => Some(Self::Lightweight),
            _ => None,
        }
    }
}

/// Launcher identity without the data a [`Launcher`] may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LauncherFamily {
    Tlauncher,
    Sklauncher,
    Modrinth,
    Curseforge,
    Manual,
}

impl LauncherFamily {
    pub const ALL: [Self; 5] = [
        Self::Tlauncher,
        Self::Sklauncher,
        Self::Modrinth,
        Self::Curseforge,
        Self::Manual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tlauncher => "tlauncher",
            Self::Sklauncher => "sklauncher",
            Self::Modrinth => "modrinth",
            Self::Curseforge => "curseforge",
            Self::Manual => "manual",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tlauncher => "TLauncher",
            Self::Sklauncher => "SKLauncher",
            Self::Modrinth => "Modrinth App",
            Self::Curseforge => "CurseForge",
            Self::Manual => "Manual",
        }
    }

    /// Parses a launcher token. Qualified manual tokens such as
    /// `manual_pirata` collapse onto [`LauncherFamily::Manual`].
    pub fn parse(input: &str) -> Option<Self> {
        let token = input.trim().to_ascii_lowercase();
        match token.as_str() {
            "tlauncher" => Some(Self::Tlauncher),
            "sklauncher" => Some(Self::Sklauncher),
            "modrinth" => Some(Self::Modrinth),
            "curseforge" => Some(Self::Curseforge),
            "manual" => Some(Self::Manual),
            _ => token
                .strip_prefix("manual_")
                .filter(|qualifier| !qualifier.is_empty())
                .map(|_| Self::Manual),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    Tlauncher,
    Sklauncher,
    Modrinth,
    Curseforge,
    Manual(PathBuf),
}

impl Launcher {
    pub fn family(&self) -> LauncherFamily {
        match self {
            Self::Tlauncher => LauncherFamily::Tlauncher,
            Self::Sklauncher => LauncherFamily::Sklauncher,
            Self::Modrinth => LauncherFamily::Modrinth,
            Self::Curseforge => LauncherFamily::Curseforge,
            Self::Manual(_) => LauncherFamily::Manual,
        }
    }

    pub fn from_family(family: LauncherFamily, manual_path: Option<PathBuf>) -> Result<Self> {
        match family {
            LauncherFamily::Tlauncher => Ok(Self::Tlauncher),
            LauncherFamily::Sklauncher => Ok(Self::Sklauncher),
            LauncherFamily::Modrinth => Ok(Self::Modrinth),
            LauncherFamily::Curseforge => Ok(Self::Curseforge),
            LauncherFamily::Manual => manual_path
                .map(Self::Manual)
                .ok_or_else(|| anyhow!("manual installs require an install directory")),
        }
    }

    pub fn manual_path(&self) -> Option<&Path> {
        match self {
            Self::Manual(path) => Some(path),
            _ => None,
        }
    }
}

/// Snapshot of the choices collected by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSelection {
    pub license: LicenseTier,
    pub launcher: Launcher,
    pub version: VersionTier,
}

impl InstallSelection {
    pub fn new(license: LicenseTier, launcher: Launcher, version: VersionTier) -> Self {
        Self {
            license,
            launcher,
            version,
        }
    }

    /// Checks the selection is complete enough to start an install run.
    pub fn validate(&self) -> Result<()> {
        let family = self.launcher.family();
        if !self.license.offered_launchers().contains(&family) {
            return Err(anyhow!(
                "launcher '{}' is not offered for {} installs",
                family.as_str(),
                self.license.as_str()
            ));
        }

        if let Some(path) = self.launcher.manual_path() {
            validate_manual_directory(path)?;
        }

        Ok(())
    }
}

fn validate_manual_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(anyhow!("manual installs require an install directory"));
    }

    let metadata = fs::metadata(path)
        .with_context(|| format!("manual install directory is not accessible: {}", path.display()))?;
    if !metadata.is_dir() {
        return Err(anyhow!(
            "manual install path is not a directory: {}",
            path.display()
        ));
    }
    tempfile::tempfile_in(path)
        .with_context(|| format!("manual install directory is not writable: {}", path.display()))?;

    Ok(())
}
