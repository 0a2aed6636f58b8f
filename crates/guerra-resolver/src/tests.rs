use std::collections::BTreeSet;
use std::path::PathBuf;

use guerra_core::{
    DownloadSource, InstallSelection, Launcher, LauncherFamily, LicenseTier, PlatformDirs,
    UrlCatalog, VersionTier,
};

use super::*;

fn dirs() -> PlatformDirs {
    PlatformDirs::new("/cfg", "/home/player")
}

fn non_manual_launchers() -> Vec<Launcher> {
    vec![
        Launcher::Tlauncher,
        Launcher::Sklauncher,
        Launcher::Modrinth,
        Launcher::Curseforge,
    ]
}

fn selection(launcher: Launcher, version: VersionTier) -> InstallSelection {
    InstallSelection::new(LicenseTier::Original, launcher, version)
}

#[test]
fn resolves_launcher_specific_roots() {
    let dirs = dirs();
    let cases = [
        (
            Launcher::Tlauncher,
            "/cfg/.minecraft/versions/Minecraft Guerra 2 Full",
        ),
        (
            Launcher::Sklauncher,
            "/cfg/.minecraft/instances/Minecraft Guerra 2 Full",
        ),
        (
            Launcher::Modrinth,
            "/cfg/ModrinthApp/profiles/Minecraft Guerra 2 Full",
        ),
        (
            Launcher::Curseforge,
            "/home/player/curseforge/minecraft/Instances/Minecraft Guerra 2 Full",
        ),
    ];

    for (launcher, expected) in cases {
        let spec = resolve(
            &selection(launcher.clone(), VersionTier::Full),
            &UrlCatalog::builtin(),
            &dirs,
        );
        assert_eq!(spec.target_dir, PathBuf::from(expected), "launcher {launcher:?}");
    }
}

#[test]
fn final_segment_embeds_version_label_for_every_combination() {
    let dirs = dirs();
    for launcher in non_manual_launchers() {
        for version in VersionTier::ALL {
            let target = resolve_target_dir(&launcher, version, &dirs);
            let last = target
                .file_name()
                .and_then(|name| name.to_str())
                .expect("target must have a final segment");
            assert!(
                last.ends_with(version.label()),
                "{launcher:?}/{version:?} resolved to {}",
                target.display()
            );
        }
    }
}

#[test]
fn version_tiers_never_share_a_directory() {
    let dirs = dirs();
    for launcher in non_manual_launchers() {
        let targets = VersionTier::ALL
            .iter()
            .map(|version| resolve_target_dir(&launcher, *version, &dirs))
            .collect::<BTreeSet<_>>();
        assert_eq!(targets.len(), VersionTier::ALL.len(), "launcher {launcher:?}");
    }
}

#[test]
fn manual_path_is_used_verbatim() {
    let spec = resolve(
        &InstallSelection::new(
            LicenseTier::Alternative,
            Launcher::Manual(PathBuf::from("/tmp/x")),
            VersionTier::Lightweight,
        ),
        &UrlCatalog::builtin(),
        &dirs(),
    );
    assert_eq!(spec.target_dir, PathBuf::from("/tmp/x"));
}

#[test]
fn manual_qualifiers_resolve_to_canonical_manual_url() {
    let catalog = UrlCatalog::from_toml_str(
        r#"
[manual]
full = "https://mirror.test/full.zip"
intermediate = "https://mirror.test/intermediate.zip"
lightweight = "https://mirror.test/light.zip"
"#,
    )
    .expect("catalog must parse");

    for token in ["manual_pirata", "manual_original", "manual"] {
        let family = LauncherFamily::parse(token).expect("manual token must parse");
        for version in VersionTier::ALL {
            assert_eq!(
                resolve_source(&catalog, family, version),
                resolve_source(&catalog, LauncherFamily::Manual, version),
                "token {token}"
            );
        }
    }
    assert_eq!(
        resolve_source(&catalog, LauncherFamily::Manual, VersionTier::Full),
        DownloadSource::Archive("https://mirror.test/full.zip".to_string())
    );
}

#[test]
fn placeholder_and_missing_urls_resolve_to_simulation() {
    let catalog = UrlCatalog::new().with_url(
        LauncherFamily::Sklauncher,
        VersionTier::Full,
        "LINK_SKLAUNCHER_FULL",
    );

    assert_eq!(
        resolve_source(&catalog, LauncherFamily::Sklauncher, VersionTier::Full),
        DownloadSource::Unconfigured
    );
    assert_eq!(
        resolve_source(&catalog, LauncherFamily::Modrinth, VersionTier::Full),
        DownloadSource::Unconfigured
    );
}

#[test]
fn configured_url_is_trimmed() {
    let catalog = UrlCatalog::new().with_url(
        LauncherFamily::Tlauncher,
        VersionTier::Intermediate,
        "  https://mirror.test/intermediate.zip \n",
    );
    let spec = resolve(
        &selection(Launcher::Tlauncher, VersionTier::Intermediate),
        &catalog,
        &dirs(),
    );
    assert_eq!(spec.url(), Some("https://mirror.test/intermediate.zip"));
}

#[test]
fn display_and_folder_names_embed_label() {
    assert_eq!(
        profile_display_name(VersionTier::Lightweight),
        "Minecraft Guerra 2 Lightweight"
    );
    assert_eq!(folder_name(VersionTier::Full), "Minecraft Guerra 2 Full");
}
