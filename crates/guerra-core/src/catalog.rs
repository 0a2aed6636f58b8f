use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::selection::{LauncherFamily, VersionTier};

const DOWNLOAD_HOST: &str = "https://api.bloodmoonbr.com/downloads";

/// Download URL per launcher family and version tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlCatalog {
    entries: BTreeMap<(LauncherFamily, VersionTier), String>,
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawCatalog(BTreeMap<String, BTreeMap<String, String>>);

impl UrlCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published archives; every launcher currently shares one archive per tier.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for family in LauncherFamily::ALL {
            for version in VersionTier::ALL {
                let file = match version {
                    VersionTier::Full => "Guerra-2-Full.zip",
                    VersionTier::Intermediate => "Guerra-2-Intermediate.zip",
                    VersionTier::Lightweight => "Guerra-2-Light.zip",
                };
                catalog.insert(family, version, format!("{DOWNLOAD_HOST}/{file}"));
            }
        }
        catalog
    }

    pub fn with_url(
        mut self,
        family: LauncherFamily,
        version: VersionTier,
        url: impl Into<String>,
    ) -> Self {
        self.insert(family, version, url);
        self
    }

    pub fn insert(&mut self, family: LauncherFamily, version: VersionTier, url: impl Into<String>) {
        self.entries.insert((family, version), url.into());
    }

    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let raw: RawCatalog = toml::from_str(input).context("failed to parse url catalog")?;

        let mut catalog = Self::new();
        for (launcher_key, versions) in raw.0 {
            let family = LauncherFamily::parse(&launcher_key)
                .ok_or_else(|| anyhow!("unknown launcher in url catalog: {launcher_key}"))?;
            for (version_key, url) in versions {
                let version = VersionTier::parse(&version_key).ok_or_else(|| {
                    anyhow!("unknown version '{version_key}' for launcher '{launcher_key}'")
                })?;
                if catalog.entries.contains_key(&(family, version)) {
                    return Err(anyhow!(
                        "duplicate url for launcher '{}' version '{}' in url catalog",
                        family.as_str(),
                        version.as_str()
                    ));
                }
                catalog.insert(family, version, url);
            }
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read url catalog: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid url catalog: {}", path.display()))
    }

    /// Raw entry, placeholders included.
    pub fn get(&self, family: LauncherFamily, version: VersionTier) -> Option<&str> {
        self.entries.get(&(family, version)).map(String::as_str)
    }

    /// Entry usable for a real download.
    pub fn lookup(&self, family: LauncherFamily, version: VersionTier) -> Option<&str> {
        self.get(family, version).filter(|url| !is_placeholder_url(url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True for unconfigured links: blank, `LINK_*` markers, or example.com hosts.
pub fn is_placeholder_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.contains("LINK_") {
        return true;
    }

    let lower = trimmed.to_ascii_lowercase();
    let without_scheme = lower.split_once("://").map_or(lower.as_str(), |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);

    host == "example.com" || host.ends_with(".example.com")
}
