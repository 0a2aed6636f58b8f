use std::sync::mpsc::Sender;

use guerra_core::ProgressEvent;

use crate::InstallMessage;

/// Receives progress from the install worker. Implementations are invoked
/// from the worker thread and must hand events to their owner themselves.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);

    fn status(&self, label: &str, percent: f64) {
        self.report(ProgressEvent::new(label, percent));
    }
}

/// Posts events onto the channel drained by the presentation thread.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: Sender<InstallMessage>,
}

impl ChannelReporter {
    pub fn new(sender: Sender<InstallMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, event: ProgressEvent) {
        // The receiver going away only means nobody is watching anymore.
        let _ = self.sender.send(InstallMessage::Progress(event));
    }
}

pub struct FnReporter<F>(pub F);

impl<F> ProgressReporter for FnReporter<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        (self.0)(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}
