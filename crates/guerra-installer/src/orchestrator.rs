use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use guerra_core::{
    DownloadSpec, InstallSelection, PlatformDirs, ProfileDefaults, ProgressEvent, UrlCatalog,
};
use guerra_resolver::{profile_display_name, resolve};
use reqwest::blocking::Client;

use crate::pipeline::run_pipeline_stages;
use crate::{
    reconcile_profile, CancelFlag, ChannelReporter, ProcessTerminator, ProfileRequest,
    ProfileStore, ProgressReporter, ReconcileOutcome, SystemProcessTerminator, DEFAULT_KILL_LIST,
};

const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    Idle,
    TerminatingProcesses,
    Resolving,
    Downloading,
    Extracting,
    SimulatingInstall,
    ReconcilingProfile,
    Finished,
}

impl InstallStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TerminatingProcesses => "terminating-processes",
            Self::Resolving => "resolving",
            Self::Downloading => "downloading",
            Self::Extracting => "extracting",
            Self::SimulatingInstall => "simulating-install",
            Self::ReconcilingProfile => "reconciling-profile",
            Self::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerOptions {
    /// Pause after the kill step so file handles are released.
    pub settle_delay: Duration,
    pub terminate_processes: bool,
    pub kill_list: Vec<String>,
    /// Parent of the scratch download directory; system temp when unset.
    pub temp_root: Option<PathBuf>,
}

impl Default for InstallerOptions {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            terminate_processes: true,
            kill_list: DEFAULT_KILL_LIST.iter().map(|name| name.to_string()).collect(),
            temp_root: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallMode {
    Downloaded {
        url: String,
        bytes: u64,
        sha256: String,
        members: usize,
    },
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub target_dir: PathBuf,
    pub mode: InstallMode,
    /// `None` when the launcher has no profile store.
    pub profile: Option<ReconcileOutcome>,
    pub warnings: Vec<String>,
    pub stages: Vec<InstallStage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallFailure {
    pub stage: InstallStage,
    pub error: String,
    pub target_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Succeeded(InstallReport),
    Failed(InstallFailure),
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    pub fn target_dir(&self) -> Option<&Path> {
        match self {
            Self::Succeeded(report) => Some(&report.target_dir),
            Self::Failed(failure) => failure.target_dir.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstallMessage {
    Progress(ProgressEvent),
    Finished(InstallOutcome),
}

struct StageLog {
    visited: Vec<InstallStage>,
}

impl StageLog {
    fn new() -> Self {
        Self {
            visited: vec![InstallStage::Idle],
        }
    }

    fn enter(&mut self, stage: InstallStage) {
        log::info!("install stage: {}", stage.as_str());
        self.visited.push(stage);
    }

    fn current(&self) -> InstallStage {
        self.visited.last().copied().unwrap_or(InstallStage::Idle)
    }

    fn fail(&self, error: String, target_dir: Option<PathBuf>) -> InstallOutcome {
        log::warn!("install failed while {}: {error}", self.current().as_str());
        InstallOutcome::Failed(InstallFailure {
            stage: self.current(),
            error,
            target_dir,
        })
    }
}

/// Runs one installation from process shutdown through profile registration.
pub struct Installer {
    catalog: UrlCatalog,
    dirs: PlatformDirs,
    defaults: ProfileDefaults,
    options: InstallerOptions,
    terminator: Box<dyn ProcessTerminator>,
    client: Client,
}

impl Installer {
    pub fn new(catalog: UrlCatalog, dirs: PlatformDirs) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("guerra-installer/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            catalog,
            dirs,
            defaults: ProfileDefaults::default(),
            options: InstallerOptions::default(),
            terminator: Box::new(SystemProcessTerminator),
            client,
        })
    }

    pub fn with_defaults(mut self, defaults: ProfileDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_options(mut self, options: InstallerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_terminator(mut self, terminator: impl ProcessTerminator + 'static) -> Self {
        self.terminator = Box::new(terminator);
        self
    }

    pub fn dirs(&self) -> &PlatformDirs {
        &self.dirs
    }

    pub fn options(&self) -> &InstallerOptions {
        &self.options
    }

    pub fn plan(&self, selection: &InstallSelection) -> DownloadSpec {
        resolve(selection, &self.catalog, &self.dirs)
    }

    pub fn profile_store(&self, selection: &InstallSelection) -> Option<ProfileStore> {
        ProfileStore::for_family(selection.launcher.family(), &self.dirs)
    }

    /// Blocking; call from a worker thread or use [`spawn_install`].
    pub fn run(
        &self,
        selection: &InstallSelection,
        reporter: &dyn ProgressReporter,
        cancel: &CancelFlag,
    ) -> InstallOutcome {
        let mut stages = StageLog::new();

        stages.enter(InstallStage::TerminatingProcesses);
        reporter.status("Closing launchers and Minecraft...", 5.0);
        if self.options.terminate_processes {
            self.terminator
                .terminate_processes_by_name(&self.options.kill_list);
        }
        if !self.options.settle_delay.is_zero() {
            thread::sleep(self.options.settle_delay);
        }

        stages.enter(InstallStage::Resolving);
        let spec = self.plan(selection);
        let target_dir = spec.target_dir.clone();
        log::info!(
            "installing {} for {} into {}",
            selection.version.as_str(),
            selection.launcher.family().as_str(),
            target_dir.display()
        );

        if cancel.is_cancelled() {
            return stages.fail("installation cancelled".to_string(), None);
        }

        let mode = match spec.url() {
            None => {
                stages.enter(InstallStage::SimulatingInstall);
                reporter.status("Simulation mode (no live download links)...", 50.0);
                if let Err(err) = fs::create_dir_all(&target_dir) {
                    return stages.fail(
                        format!("failed to create {}: {err}", target_dir.display()),
                        None,
                    );
                }
                InstallMode::Simulated
            }
            Some(url) => {
                reporter.status(
                    &format!("Downloading {}...", selection.version.label()),
                    0.0,
                );
                let result = run_pipeline_stages(
                    &self.client,
                    url,
                    &target_dir,
                    self.options.temp_root.as_deref(),
                    reporter,
                    cancel,
                    |stage| stages.enter(stage),
                );
                match result {
                    Ok(summary) => InstallMode::Downloaded {
                        url: url.to_string(),
                        bytes: summary.download.bytes_written,
                        sha256: summary.download.sha256,
                        members: summary.members,
                    },
                    Err(err) => {
                        let touched = target_dir.exists().then(|| target_dir.clone());
                        return stages.fail(err.diagnostic(), touched);
                    }
                }
            }
        };

        let mut warnings = Vec::new();
        let profile = self.profile_store(selection).map(|store| {
            stages.enter(InstallStage::ReconcilingProfile);
            let label = match mode {
                InstallMode::Simulated => format!(
                    "Configuring {} profile...",
                    selection.launcher.family().display_name()
                ),
                InstallMode::Downloaded { .. } => "Updating launcher profiles...".to_string(),
            };
            let percent = match mode {
                InstallMode::Simulated => 90.0,
                InstallMode::Downloaded { .. } => 100.0,
            };
            reporter.status(&label, percent);

            let request = ProfileRequest {
                version: selection.version,
                display_name: profile_display_name(selection.version),
                game_dir: target_dir.clone(),
            };
            reconcile_profile(&store, &request, &self.defaults, Utc::now())
        });
        if let Some(ReconcileOutcome::Failed(diagnostic)) = &profile {
            warnings.push(format!("launcher profile was not updated: {diagnostic}"));
        }

        stages.enter(InstallStage::Finished);
        reporter.status("Installation complete", 100.0);
        InstallOutcome::Succeeded(InstallReport {
            target_dir,
            mode,
            profile,
            warnings,
            stages: stages.visited,
        })
    }
}

/// A running installation owned by the presentation thread.
pub struct InstallHandle {
    receiver: Receiver<InstallMessage>,
    cancel: CancelFlag,
    worker: JoinHandle<()>,
}

impl InstallHandle {
    pub fn messages(&self) -> &Receiver<InstallMessage> {
        &self.receiver
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Drains progress into `on_progress` until the worker reports its outcome.
    pub fn wait_with(self, mut on_progress: impl FnMut(ProgressEvent)) -> InstallOutcome {
        let mut outcome = None;
        for message in self.receiver.iter() {
            match message {
                InstallMessage::Progress(event) => on_progress(event),
                InstallMessage::Finished(finished) => {
                    outcome = Some(finished);
                    break;
                }
            }
        }
        if self.worker.join().is_err() {
            log::error!("install worker panicked");
        }

        outcome.unwrap_or_else(|| {
            InstallOutcome::Failed(InstallFailure {
                stage: InstallStage::Idle,
                error: "install worker stopped before reporting a result".to_string(),
                target_dir: None,
            })
        })
    }
}

/// Runs `installer` on a dedicated worker thread; every event and the final
/// outcome arrive on the handle's channel.
pub fn spawn_install(installer: Installer, selection: InstallSelection) -> Result<InstallHandle> {
    let (sender, receiver) = mpsc::channel();
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();

    let worker = thread::Builder::new()
        .name("guerra-install".to_string())
        .spawn(move || {
            let reporter = ChannelReporter::new(sender.clone());
            let outcome = installer.run(&selection, &reporter, &worker_cancel);
            let _ = sender.send(InstallMessage::Finished(outcome));
        })
        .context("failed to start install worker")?;

    Ok(InstallHandle {
        receiver,
        cancel,
        worker,
    })
}
