use std::time::{Duration, Instant};

use anstyle::{AnsiColor, Effects, Style};
use guerra_core::ProgressEvent;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn resolve_output_style(
    plain_flag: bool,
    env_value: Option<&str>,
    stdout_is_tty: bool,
) -> OutputStyle {
    let env_plain = env_value.is_some_and(|value| value.trim().eq_ignore_ascii_case("plain"));
    if plain_flag || env_plain || !stdout_is_tty {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

pub(crate) struct TerminalProgress {
    style: OutputStyle,
    progress_bar: Option<ProgressBar>,
    last_line: Option<String>,
    started_at: Instant,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub(crate) fn print_section(self, title: &str) {
        if self.style == OutputStyle::Plain {
            return;
        }
        println!();
        println!("{}", colorize(section_style(), &format!("== {title} ==")));
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    pub(crate) fn start_progress(self) -> TerminalProgress {
        let progress_bar = if self.style == OutputStyle::Rich {
            let progress_bar = ProgressBar::new(100);
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.cyan.bold} [{bar:24.cyan/blue}] {pos:>3}% {wide_msg}",
            ) {
                progress_bar.set_style(style.tick_chars(".oO@* ").progress_chars("=>-"));
            }
            progress_bar.enable_steady_tick(Duration::from_millis(80));
            Some(progress_bar)
        } else {
            None
        };

        TerminalProgress {
            style: self.style,
            progress_bar,
            last_line: None,
            started_at: Instant::now(),
        }
    }
}

impl TerminalProgress {
    pub(crate) fn update(&mut self, event: &ProgressEvent) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_position(event.whole_percent());
            progress_bar.set_message(event.label.clone());
            return;
        }

        let line = render_progress_event(event);
        if self.last_line.as_deref() != Some(line.as_str()) {
            println!("{line}");
            self.last_line = Some(line);
        }
    }

    pub(crate) fn finish(mut self, succeeded: bool) {
        let Some(progress_bar) = self.progress_bar.take() else {
            return;
        };

        progress_bar.finish_and_clear();
        if succeeded {
            if let Some(line) =
                render_progress_line(self.style, "install", 100, Some(self.started_at.elapsed()))
            {
                println!("{line}");
            }
        }
    }
}

/// Plain-mode rendering of one worker event.
pub(crate) fn render_progress_event(event: &ProgressEvent) -> String {
    format!("[{:>3}%] {}", event.whole_percent(), event.label)
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => format!("{} {message}", status_badge(status)),
    }
}

fn status_badge(status: &str) -> String {
    match status {
        "ok" => "[OK]".to_string(),
        "warn" => "[WARN]".to_string(),
        "error" => "[FAIL]".to_string(),
        "step" => "[..]".to_string(),
        other => format!("[{}]", other.to_ascii_uppercase()),
    }
}

pub(crate) fn render_progress_line(
    style: OutputStyle,
    label: &str,
    percent: u64,
    elapsed: Option<Duration>,
) -> Option<String> {
    if style == OutputStyle::Plain {
        return None;
    }

    let width = 18_usize;
    let bounded = percent.min(100);
    let filled = (bounded as usize * width) / 100;
    let bar = format!(
        "{}{}",
        "=".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    let suffix = elapsed
        .map(|value| format!(" complete in {}", format_elapsed(value)))
        .unwrap_or_default();

    Some(format!(
        "{} [{}] {:>3}%{}",
        colorize(progress_label_style(), label),
        colorize(progress_bar_style(), &bar),
        bounded,
        suffix
    ))
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    format!("{secs}.{millis:03}s")
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn progress_label_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightCyan.into()))
        .effects(Effects::BOLD)
}

fn progress_bar_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::BrightBlue.into()))
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
