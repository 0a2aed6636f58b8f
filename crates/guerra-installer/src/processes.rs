use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};

/// Launcher and game processes closed before files are replaced.
pub const DEFAULT_KILL_LIST: &[&str] = &[
    "Modrinth App.exe",
    "minecraft.exe",
    "CurseForge.exe",
    "java.exe",
    "javaw.exe",
];

/// Best-effort termination of running processes by image name.
pub trait ProcessTerminator: Send + Sync {
    /// Must not fail: names that match nothing are ignored.
    fn terminate_processes_by_name(&self, names: &[String]);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessTerminator;

impl ProcessTerminator for SystemProcessTerminator {
    fn terminate_processes_by_name(&self, names: &[String]) {
        for name in names {
            let mut command = terminate_command(name);
            if let Err(err) = run_quiet(&mut command) {
                log::debug!("ignoring termination result for {name}: {err:#}");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTerminator;

impl ProcessTerminator for NoopTerminator {
    fn terminate_processes_by_name(&self, _names: &[String]) {}
}

pub(crate) fn terminate_command(name: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("taskkill");
        command.arg("/F").arg("/IM").arg(name);
        command
    } else {
        let mut command = Command::new("pkill");
        command.arg("-x").arg(process_stem(name));
        command
    }
}

fn process_stem(name: &str) -> &str {
    name.strip_suffix(".exe").unwrap_or(name)
}

fn run_quiet(command: &mut Command) -> Result<()> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("command failed to start")?;
    if status.success() {
        return Ok(());
    }
    Err(anyhow!("command exited with {status}"))
}
