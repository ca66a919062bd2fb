//! Run mode selection.
//!
//! A run either checks exactly one request given by `url`/`context`/`type`, or
//! streams JSON records from a file or stdin. Supplying only part of the
//! triplet is a configuration error.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::CheckRecord;

/// Resolved command-line options.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub url: Option<String>,
    pub context: Option<String>,
    pub request_type: Option<String>,
    /// Record file; stdin when absent
    pub requests: Option<PathBuf>,
    /// Rule files; the built-in lists when empty
    pub rules: Vec<PathBuf>,
    pub verbose: bool,
}

/// Where streamed records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    SingleRequest(CheckRecord),
    Streaming(RecordSource),
}

pub fn select_mode(options: &CheckOptions) -> Result<RunMode, ConfigError> {
    match (&options.url, &options.context, &options.request_type) {
        (Some(url), Some(context), Some(request_type)) => {
            if let Some(path) = &options.requests {
                return Err(ConfigError::ConflictingSource(path.clone()));
            }
            Ok(RunMode::SingleRequest(CheckRecord::new(
                url.as_str(),
                context.as_str(),
                request_type.as_str(),
            )))
        }
        (None, None, None) => {
            let source = match &options.requests {
                Some(path) => RecordSource::File(path.clone()),
                None => RecordSource::Stdin,
            };
            Ok(RunMode::Streaming(source))
        }
        _ => Err(ConfigError::PartialRequest),
    }
}
