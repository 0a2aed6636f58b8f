use super::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "guerra-core-tests-{}-{}-{}",
        std::process::id(),
        nanos,
        TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    path
}

#[test]
fn parse_manual_qualifiers_collapse_to_manual_family() {
    assert_eq!(
        LauncherFamily::parse("manual_pirata"),
        Some(LauncherFamily::Manual)
    );
    assert_eq!(
        LauncherFamily::parse("manual_original"),
        Some(LauncherFamily::Manual)
    );
    assert_eq!(LauncherFamily::parse(" Manual "), Some(LauncherFamily::Manual));
    assert_eq!(LauncherFamily::parse("manual_"), None);
    assert_eq!(LauncherFamily::parse("official"), None);
}

#[test]
fn parse_license_accepts_pirata_alias() {
    assert_eq!(LicenseTier::parse("pirata"), Some(LicenseTier::Alternative));
    assert_eq!(LicenseTier::parse("ORIGINAL"), Some(LicenseTier::Original));
    assert_eq!(LicenseTier::parse("cracked"), None);
}

#[test]
fn version_tier_labels_are_distinct() {
    let labels = VersionTier::ALL
        .iter()
        .map(|version| version.label())
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(labels.len(), VersionTier::ALL.len());
    assert_eq!(VersionTier::parse("light"), Some(VersionTier::Lightweight));
}

#[test]
fn launcher_from_family_requires_manual_path() {
    let err = Launcher::from_family(LauncherFamily::Manual, None)
        .expect_err("manual launcher without a path must fail");
    assert!(err.to_string().contains("install directory"));

    let launcher = Launcher::from_family(LauncherFamily::Manual, Some(PathBuf::from("/tmp/x")))
        .expect("manual launcher with a path");
    assert_eq!(launcher.manual_path(), Some(Path::new("/tmp/x")));
    assert_eq!(launcher.family(), LauncherFamily::Manual);
}

#[test]
fn validate_rejects_launcher_not_offered_for_license() {
    let selection = InstallSelection::new(
        LicenseTier::Original,
        Launcher::Sklauncher,
        VersionTier::Full,
    );
    let err = selection
        .validate()
        .expect_err("sklauncher is not offered for original installs");
    assert!(err.to_string().contains("not offered"), "unexpected: {err}");
}

#[test]
fn validate_rejects_empty_manual_path() {
    let selection = InstallSelection::new(
        LicenseTier::Alternative,
        Launcher::Manual(PathBuf::new()),
        VersionTier::Lightweight,
    );
    let err = selection.validate().expect_err("empty manual path must fail");
    assert!(err.to_string().contains("install directory"));
}

#[test]
fn validate_rejects_missing_manual_directory() {
    let missing = test_dir().join("does-not-exist");
    let selection = InstallSelection::new(
        LicenseTier::Original,
        Launcher::Manual(missing),
        VersionTier::Full,
    );
    let err = selection
        .validate()
        .expect_err("missing manual directory must fail");
    assert!(err.to_string().contains("not accessible"), "unexpected: {err}");
}

#[test]
fn validate_rejects_manual_path_that_is_a_file() {
    let root = test_dir();
    std::fs::create_dir_all(&root).expect("must create test dir");
    let file = root.join("not-a-dir.txt");
    std::fs::write(&file, b"x").expect("must write fixture");

    let selection = InstallSelection::new(
        LicenseTier::Alternative,
        Launcher::Manual(file),
        VersionTier::Full,
    );
    let err = selection.validate().expect_err("file path must fail");
    assert!(err.to_string().contains("not a directory"), "unexpected: {err}");

    let _ = std::fs::remove_dir_all(&root);
}

#[cfg(unix)]
#[test]
fn validate_rejects_manual_directory_without_write_access() {
    use std::os::unix::fs::PermissionsExt;

    let root = test_dir();
    std::fs::create_dir_all(&root).expect("must create test dir");
    std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o555))
        .expect("must drop write access");

    // Privileged users write through permission bits; nothing to assert then.
    let privileged = std::fs::File::create(root.join("write-check")).is_ok();
    let result = InstallSelection::new(
        LicenseTier::Alternative,
        Launcher::Manual(root.clone()),
        VersionTier::Lightweight,
    )
    .validate();

    std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755))
        .expect("must restore write access");
    let _ = std::fs::remove_dir_all(&root);

    if privileged {
        return;
    }
    let err = result.expect_err("read-only directory must fail");
    assert!(err.to_string().contains("not writable"), "unexpected: {err}");
}

#[test]
fn validate_accepts_existing_manual_directory() {
    let root = test_dir();
    std::fs::create_dir_all(&root).expect("must create test dir");

    let selection = InstallSelection::new(
        LicenseTier::Alternative,
        Launcher::Manual(root.clone()),
        VersionTier::Intermediate,
    );
    selection.validate().expect("existing directory must validate");

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn builtin_catalog_covers_every_family_and_tier() {
    let catalog = UrlCatalog::builtin();
    assert_eq!(
        catalog.len(),
        LauncherFamily::ALL.len() * VersionTier::ALL.len()
    );
    assert_eq!(
        catalog.lookup(LauncherFamily::Modrinth, VersionTier::Lightweight),
        Some("https://api.bloodmoonbr.com/downloads/Guerra-2-Light.zip")
    );
}

#[test]
fn catalog_from_toml_maps_manual_qualifiers_to_manual_key() {
    let catalog = UrlCatalog::from_toml_str(
        r#"
[manual_pirata]
full = "https://mirror.test/full.zip"

[sklauncher]
intermediate = "https://mirror.test/intermediate.zip"
"#,
    )
    .expect("catalog must parse");

    assert_eq!(
        catalog.get(LauncherFamily::Manual, VersionTier::Full),
        Some("https://mirror.test/full.zip")
    );
    assert_eq!(
        catalog.get(LauncherFamily::Sklauncher, VersionTier::Intermediate),
        Some("https://mirror.test/intermediate.zip")
    );
    assert_eq!(catalog.get(LauncherFamily::Sklauncher, VersionTier::Full), None);
}

#[test]
fn catalog_from_toml_rejects_unknown_launcher() {
    let err = UrlCatalog::from_toml_str(
        r#"
[official]
full = "https://mirror.test/full.zip"
"#,
    )
    .expect_err("unknown launcher must fail");
    assert!(err.to_string().contains("unknown launcher"), "unexpected: {err}");
}

#[test]
fn catalog_from_toml_rejects_unknown_version() {
    let err = UrlCatalog::from_toml_str(
        r#"
[modrinth]
ultra = "https://mirror.test/ultra.zip"
"#,
    )
    .expect_err("unknown version must fail");
    assert!(err.to_string().contains("unknown version 'ultra'"), "unexpected: {err}");
}

#[test]
fn catalog_from_toml_rejects_duplicate_manual_entries() {
    let err = UrlCatalog::from_toml_str(
        r#"
[manual]
full = "https://mirror.test/a.zip"

[manual_pirata]
full = "https://mirror.test/b.zip"
"#,
    )
    .expect_err("two urls for the same launcher and version must fail");
    assert!(
        err.to_string().contains("duplicate url for launcher 'manual' version 'full'"),
        "unexpected: {err}"
    );
}

#[test]
fn catalog_lookup_hides_placeholders_but_get_keeps_them() {
    let catalog = UrlCatalog::new()
        .with_url(LauncherFamily::Tlauncher, VersionTier::Full, "LINK_FULL")
        .with_url(LauncherFamily::Modrinth, VersionTier::Full, "http://example.com");

    assert_eq!(catalog.lookup(LauncherFamily::Tlauncher, VersionTier::Full), None);
    assert_eq!(catalog.lookup(LauncherFamily::Modrinth, VersionTier::Full), None);
    assert_eq!(
        catalog.get(LauncherFamily::Tlauncher, VersionTier::Full),
        Some("LINK_FULL")
    );
}

#[test]
fn placeholder_detection_matches_hosts_not_substrings() {
    assert!(is_placeholder_url(""));
    assert!(is_placeholder_url("   "));
    assert!(is_placeholder_url("https://LINK_TO_FULL"));
    assert!(is_placeholder_url("http://example.com"));
    assert!(is_placeholder_url("https://cdn.example.com/pack.zip"));
    assert!(is_placeholder_url("http://EXAMPLE.com:8080/pack.zip"));
    assert!(!is_placeholder_url("https://example.test/pack.zip"));
    assert!(!is_placeholder_url("http://127.0.0.1:4000/pack.zip"));
    assert!(!is_placeholder_url(
        "https://api.bloodmoonbr.com/downloads/Guerra-2-Full.zip"
    ));
}

#[test]
fn platform_dirs_derive_launcher_locations() {
    let dirs = PlatformDirs::new("/cfg", "/home/player");
    assert_eq!(dirs.minecraft_dir(), PathBuf::from("/cfg/.minecraft"));
    assert_eq!(
        dirs.launcher_profiles_path(),
        PathBuf::from("/cfg/.minecraft/launcher_profiles.json")
    );
    assert_eq!(
        dirs.modrinth_database_path(),
        PathBuf::from("/cfg/ModrinthApp/app.db")
    );
    assert_eq!(
        dirs.curseforge_instances_dir(),
        PathBuf::from("/home/player/curseforge/minecraft/Instances")
    );
}

#[test]
fn document_profile_ids_are_stable_and_distinct() {
    let ids = VersionTier::ALL
        .iter()
        .map(|version| ProfileDefaults::document_profile_id(*version))
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(ids.len(), 3);
    assert_eq!(
        ProfileDefaults::document_profile_id(VersionTier::Full),
        "686d1a5248c548dca11bfc1d256b1784"
    );
}

#[test]
fn progress_event_clamps_percent() {
    assert_eq!(ProgressEvent::new("x", 140.0).percent, 100.0);
    assert_eq!(ProgressEvent::new("x", -3.0).percent, 0.0);
    assert_eq!(ProgressEvent::new("x", f64::NAN).percent, 0.0);
    assert_eq!(ProgressEvent::new("x", 42.9).whole_percent(), 42);
}

#[test]
fn download_spec_reports_simulation_for_unconfigured_source() {
    let spec = DownloadSpec {
        source: DownloadSource::Unconfigured,
        target_dir: PathBuf::from("/tmp/x"),
    };
    assert!(spec.is_simulation());
    assert_eq!(spec.url(), None);
}
