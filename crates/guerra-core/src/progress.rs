/// A status line plus completion percentage for the current stage.
///
/// Percentages are not monotonic across stages: the download stage restarts
/// at 0 after the pre-flight stage has already reported progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub label: String,
    pub percent: f64,
}

impl ProgressEvent {
    pub fn new(label: impl Into<String>, percent: f64) -> Self {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            label: label.into(),
            percent,
        }
    }

    pub fn whole_percent(&self) -> u64 {
        self.percent as u64
    }
}
