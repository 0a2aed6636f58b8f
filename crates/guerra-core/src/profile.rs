use crate::selection::VersionTier;

pub const PROFILE_BASE_NAME: &str = "Minecraft Guerra 2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileResolution {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

/// Values written into launcher profile stores for the supported runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub last_version_id: String,
    pub profile_type: String,
    pub resolution: ProfileResolution,
    pub game_version: String,
    pub mod_loader: String,
    pub mod_loader_version: String,
    pub groups: String,
    pub protocol_version: i64,
    pub launcher_feature_version: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            last_version_id: "1.20.1-forge-47.4.6".to_string(),
            profile_type: "custom".to_string(),
            resolution: ProfileResolution {
                width: 854,
                height: 480,
                fullscreen: false,
            },
            game_version: "1.20.1".to_string(),
            mod_loader: "forge".to_string(),
            mod_loader_version: "47.4.6".to_string(),
            groups: "11".to_string(),
            protocol_version: 763,
            launcher_feature_version: "migrated_launch_hooks".to_string(),
        }
    }
}

impl ProfileDefaults {
    /// Fixed document-store key for a tier; reinstalls hit the same entry.
    pub fn document_profile_id(version: VersionTier) -> &'static str {
        match version {
            VersionTier::Full => "686d1a5248c548dca11bfc1d256b1784",
            VersionTier::Intermediate => "786d1a5248c548dca11bfc1d256b1785",
            VersionTier::Lightweight => "886d1a5248c548dca11bfc1d256b1786",
        }
    }
}
