mod cancel;
mod download;
mod error;
mod extract;
mod fs_utils;
mod orchestrator;
mod pipeline;
mod processes;
mod profiles;
mod progress;

pub use cancel::CancelFlag;
pub use download::{
    download_archive, DownloadSummary, DOWNLOAD_CHUNK_SIZE, DOWNLOAD_REPORT_INTERVAL,
};
pub use error::PipelineError;
pub use extract::{extract_archive, EXTRACT_REPORT_EVERY};
pub use orchestrator::{
    spawn_install, InstallFailure, InstallHandle, InstallMessage, InstallMode, InstallOutcome,
    InstallReport, InstallStage, Installer, InstallerOptions,
};
pub use pipeline::{run_pipeline, PipelineSummary};
pub use processes::{NoopTerminator, ProcessTerminator, SystemProcessTerminator, DEFAULT_KILL_LIST};
pub use profiles::{
    reconcile_profile, upsert_document_profile, upsert_row_profile, ProfileChange,
    ProfileRequest, ProfileStore, ReconcileOutcome,
};
pub use progress::{ChannelReporter, FnReporter, NoopReporter, ProgressReporter};
