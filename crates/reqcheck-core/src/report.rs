//! Result reporting.
//!
//! Each checked request produces exactly one output line: `true`/`false`, the
//! JSON detail object in verbose mode, or `null` when the engine could not
//! evaluate the request.

use log::warn;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::engine::RequestChecker;
use crate::error::StreamError;
use crate::types::{CheckDetail, CheckRecord};

/// Outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CheckResult {
    Matched(bool),
    Detail(CheckDetail),
    /// The engine failed to evaluate the request
    Failed,
}

impl CheckResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Whether the request matched; `None` when evaluation failed.
    pub fn matched(&self) -> Option<bool> {
        match self {
            Self::Matched(matched) => Some(*matched),
            Self::Detail(detail) => Some(detail.matched),
            Self::Failed => None,
        }
    }
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// At least one engine evaluation failed
    Failure,
}

impl RunStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Normalize the record's type and run it through the checker.
///
/// Engine errors are logged and turned into [`CheckResult::Failed`].
pub fn check_record<C>(checker: &C, record: &CheckRecord, verbose: bool) -> CheckResult
where
    C: RequestChecker + ?Sized,
{
    match checker.check(&record.url, &record.context, record.unified_type()) {
        Ok(detail) if verbose => CheckResult::Detail(detail),
        Ok(detail) => CheckResult::Matched(detail.matched),
        Err(e) => {
            warn!(
                "check failed for url={} context={} type={}: {}",
                record.url, record.context, record.request_type, e
            );
            CheckResult::Failed
        }
    }
}

/// Write one result as a single line.
pub async fn write_result<W>(out: &mut W, result: &CheckResult) -> Result<(), StreamError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut line = serde_json::to_vec(result)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    Ok(())
}
