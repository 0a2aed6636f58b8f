use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::CommandFactory;
use guerra_core::{
    DownloadSpec, InstallSelection, Launcher, LauncherFamily, PlatformDirs, UrlCatalog,
};
use guerra_installer::{
    spawn_install, InstallMode, InstallOutcome, Installer, InstallerOptions, ProfileChange,
    ProfileStore, ReconcileOutcome,
};

use crate::render::{render_status_line, OutputStyle, TerminalRenderer};
use crate::{Cli, Commands, SelectionArgs};

const REMEDIATION_HINT: &str = "Check your connection and try again.";

pub(crate) fn run_cli(cli: Cli, style: OutputStyle) -> Result<ExitCode> {
    match cli.command {
        Commands::Install {
            selection,
            no_kill,
            settle_ms,
        } => run_install(&selection, no_kill, settle_ms, style),
        Commands::Resolve { selection } => {
            let install = build_selection(&selection)?;
            let catalog = load_catalog(selection.urls.as_deref())?;
            let dirs = PlatformDirs::detect()?;
            let spec = guerra_resolver::resolve(&install, &catalog, &dirs);
            let store = ProfileStore::for_family(install.launcher.family(), &dirs);
            TerminalRenderer::from_style(style)
                .print_lines(&format_resolve_lines(&spec, store.as_ref(), style));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Paths => {
            let dirs = PlatformDirs::detect()?;
            TerminalRenderer::from_style(style).print_lines(&format_paths_lines(&dirs));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_completions(shell, &mut handle)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_install(
    args: &SelectionArgs,
    no_kill: bool,
    settle_ms: u64,
    style: OutputStyle,
) -> Result<ExitCode> {
    let selection = build_selection(args)?;
    let catalog = load_catalog(args.urls.as_deref())?;
    let dirs = PlatformDirs::detect()?;
    let installer = Installer::new(catalog, dirs)?.with_options(InstallerOptions {
        settle_delay: Duration::from_millis(settle_ms),
        terminate_processes: !no_kill,
        ..InstallerOptions::default()
    });

    let renderer = TerminalRenderer::from_style(style);
    renderer.print_section(&format!(
        "Installing Guerra 2 {} for {}",
        selection.version.label(),
        selection.launcher.family().display_name()
    ));

    let handle = spawn_install(installer, selection)?;
    let mut progress = renderer.start_progress();
    let outcome = handle.wait_with(|event| progress.update(&event));
    progress.finish(outcome.is_success());

    renderer.print_lines(&format_outcome_lines(&outcome, style));
    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

pub(crate) fn build_selection(args: &SelectionArgs) -> Result<InstallSelection> {
    if args.path.is_some() && args.launcher != LauncherFamily::Manual {
        return Err(anyhow!(
            "--path is only used with the manual launcher, not '{}'",
            args.launcher.as_str()
        ));
    }

    let launcher = Launcher::from_family(args.launcher, args.path.clone())?;
    let selection = InstallSelection::new(args.license, launcher, args.version);
    selection.validate()?;
    Ok(selection)
}

fn load_catalog(path: Option<&Path>) -> Result<UrlCatalog> {
    match path {
        Some(path) => {
            log::info!("loading download links from {}", path.display());
            UrlCatalog::load(path)
        }
        None => Ok(UrlCatalog::builtin()),
    }
}

pub(crate) fn format_outcome_lines(outcome: &InstallOutcome, style: OutputStyle) -> Vec<String> {
    let report = match outcome {
        InstallOutcome::Succeeded(report) => report,
        InstallOutcome::Failed(failure) => {
            return vec![
                render_status_line(
                    style,
                    "error",
                    &format!("installation failed: {}", failure.error),
                ),
                render_status_line(style, "step", REMEDIATION_HINT),
            ];
        }
    };

    let mut lines = vec![render_status_line(
        style,
        "ok",
        &format!("installed to {}", report.target_dir.display()),
    )];
    match &report.mode {
        InstallMode::Downloaded { bytes, sha256, .. } => lines.push(render_status_line(
            style,
            "step",
            &format!("archive: {bytes} bytes sha256={sha256}"),
        )),
        InstallMode::Simulated => lines.push(render_status_line(
            style,
            "step",
            "archive: simulation (no live download links)",
        )),
    }
    if let Some(ReconcileOutcome::Applied(change)) = &report.profile {
        let verb = match change {
            ProfileChange::Created => "created",
            ProfileChange::Updated => "updated",
        };
        lines.push(render_status_line(
            style,
            "step",
            &format!("launcher profile: {verb}"),
        ));
    }
    for warning in &report.warnings {
        lines.push(render_status_line(
            style,
            "warn",
            &format!("warning: {warning}"),
        ));
    }

    lines
}

pub(crate) fn format_resolve_lines(
    spec: &DownloadSpec,
    store: Option<&ProfileStore>,
    style: OutputStyle,
) -> Vec<String> {
    let source = spec.url().unwrap_or("simulation");
    let store = match store {
        Some(store) => format!("{} {}", store.kind(), store.path().display()),
        None => "none".to_string(),
    };
    vec![
        render_status_line(
            style,
            "step",
            &format!("target: {}", spec.target_dir().display()),
        ),
        render_status_line(style, "step", &format!("source: {source}")),
        render_status_line(style, "step", &format!("profile store: {store}")),
    ]
}

pub(crate) fn format_paths_lines(dirs: &PlatformDirs) -> Vec<String> {
    vec![
        format!("config: {}", dirs.config_dir().display()),
        format!("home: {}", dirs.home_dir().display()),
        format!("tlauncher: {}", dirs.tlauncher_versions_dir().display()),
        format!("sklauncher: {}", dirs.sklauncher_instances_dir().display()),
        format!("sklauncher profiles: {}", dirs.launcher_profiles_path().display()),
        format!("modrinth: {}", dirs.modrinth_profiles_dir().display()),
        format!("modrinth database: {}", dirs.modrinth_database_path().display()),
        format!("curseforge: {}", dirs.curseforge_instances_dir().display()),
    ]
}

pub(crate) fn write_completions<W: Write>(shell: clap_complete::Shell, writer: &mut W) -> Result<()> {
    let mut command = Cli::command();
    let mut generated = Vec::new();
    clap_complete::generate(shell, &mut command, "guerra", &mut generated);
    writer
        .write_all(&generated)
        .with_context(|| "failed writing generated completion script")?;
    Ok(())
}
