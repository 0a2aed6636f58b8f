use std::io;

use thiserror::Error;

/// Fatal download/extract failures. `diagnostic()` is what the user sees.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("archive is corrupt or unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("installation cancelled")]
    Cancelled,
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// `Display` plus every underlying cause not already part of the message.
    pub fn diagnostic(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}
