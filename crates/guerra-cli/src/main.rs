mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use guerra_core::{LauncherFamily, LicenseTier, VersionTier};

use crate::render::{render_status_line, resolve_output_style};

#[derive(Parser, Debug)]
#[command(name = "guerra")]
#[command(about = "Installs the Minecraft Guerra 2 modpack into a launcher", long_about = None)]
struct Cli {
    /// Print plain status lines instead of progress bars.
    #[arg(long, global = true)]
    plain: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// original or alternative (alias: pirata).
    #[arg(long, value_parser = parse_license)]
    license: LicenseTier,
    #[arg(long, value_parser = parse_launcher)]
    launcher: LauncherFamily,
    /// full, intermediate or lightweight.
    #[arg(long = "version", value_parser = parse_version)]
    version: VersionTier,
    /// Install directory for the manual launcher.
    #[arg(long)]
    path: Option<PathBuf>,
    /// TOML file overriding the built-in download links.
    #[arg(long)]
    urls: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Install {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Leave running launchers and Minecraft alone.
        #[arg(long)]
        no_kill: bool,
        #[arg(long, default_value_t = 2000)]
        settle_ms: u64,
    },
    Resolve {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    Paths,
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_license(value: &str) -> Result<LicenseTier, String> {
    LicenseTier::parse(value).ok_or_else(|| format!("unknown license '{value}'"))
}

fn parse_launcher(value: &str) -> Result<LauncherFamily, String> {
    LauncherFamily::parse(value).ok_or_else(|| format!("unknown launcher '{value}'"))
}

fn parse_version(value: &str) -> Result<VersionTier, String> {
    VersionTier::parse(value).ok_or_else(|| format!("unknown version '{value}'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let style = resolve_output_style(
        cli.plain,
        std::env::var("GUERRA_OUTPUT").ok().as_deref(),
        std::io::stdout().is_terminal(),
    );

    match commands::run_cli(cli, style) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", render_status_line(style, "error", &format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}
