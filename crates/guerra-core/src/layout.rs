use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Per-user roots that launcher directories hang off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    config_dir: PathBuf,
    home_dir: PathBuf,
}

impl PlatformDirs {
    pub fn new(config_dir: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            home_dir: home_dir.into(),
        }
    }

    /// Roaming config dir (`%APPDATA%` on Windows) and the user's home.
    pub fn detect() -> Result<Self> {
        let base = BaseDirs::new().context("cannot resolve user directories for this platform")?;
        Ok(Self::new(base.config_dir(), base.home_dir()))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn minecraft_dir(&self) -> PathBuf {
        self.config_dir.join(".minecraft")
    }

    pub fn tlauncher_versions_dir(&self) -> PathBuf {
        self.minecraft_dir().join("versions")
    }

    pub fn sklauncher_instances_dir(&self) -> PathBuf {
        self.minecraft_dir().join("instances")
    }

    pub fn launcher_profiles_path(&self) -> PathBuf {
        self.minecraft_dir().join("launcher_profiles.json")
    }

    pub fn modrinth_dir(&self) -> PathBuf {
        self.config_dir.join("ModrinthApp")
    }

    pub fn modrinth_profiles_dir(&self) -> PathBuf {
        self.modrinth_dir().join("profiles")
    }

    pub fn modrinth_database_path(&self) -> PathBuf {
        self.modrinth_dir().join("app.db")
    }

    pub fn curseforge_instances_dir(&self) -> PathBuf {
        self.home_dir
            .join("curseforge")
            .join("minecraft")
            .join("Instances")
    }
}
