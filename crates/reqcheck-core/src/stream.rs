//! Newline-delimited record processing.
//!
//! Records are read, checked and reported one at a time. A malformed line
//! ends the run; an engine failure on a well-formed record only marks that
//! record as failed.

use log::debug;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::engine::RequestChecker;
use crate::error::StreamError;
use crate::report::{check_record, write_result, CheckResult, RunStatus};
use crate::types::CheckRecord;

/// Counters for a streaming run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub processed: usize,
    pub matched: usize,
    pub failed: usize,
}

impl StreamSummary {
    fn record(&mut self, result: &CheckResult) {
        self.processed += 1;
        match result.matched() {
            Some(true) => self.matched += 1,
            Some(false) => {}
            None => self.failed += 1,
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.failed == 0 {
            RunStatus::Success
        } else {
            RunStatus::Failure
        }
    }
}

/// Parse one line into a record. `line_no` is 1-based and only used for errors.
pub fn parse_record(line: &str, line_no: usize) -> Result<CheckRecord, StreamError> {
    let value: Value = serde_json::from_str(line).map_err(|source| StreamError::Syntax {
        line: line_no,
        raw: line.to_string(),
        source,
    })?;

    let field = |key: &str| value.get(key).and_then(Value::as_str);
    match (field("url"), field("context"), field("type")) {
        (Some(url), Some(context), Some(request_type)) => {
            Ok(CheckRecord::new(url, context, request_type))
        }
        _ => Err(StreamError::MissingKeys {
            line: line_no,
            raw: line.to_string(),
        }),
    }
}

/// Decode one raw line, without its `\n` or `\r\n` terminator.
fn decode_line(bytes: &[u8], line_no: usize) -> Result<&str, StreamError> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|source| StreamError::Encoding {
        line: line_no,
        raw: String::from_utf8_lossy(bytes).into_owned(),
        source,
    })
}

/// Check every record from `reader`, writing one result line per record to
/// `out` in input order.
pub async fn process_records<R, W, C>(
    mut reader: R,
    checker: &C,
    verbose: bool,
    out: &mut W,
) -> Result<StreamSummary, StreamError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
    C: RequestChecker + ?Sized,
{
    let mut summary = StreamSummary::default();
    let mut line_no = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;
        let line = decode_line(&buf, line_no)?;
        let record = parse_record(line, line_no)?;
        let result = check_record(checker, &record, verbose);
        summary.record(&result);
        write_result(out, &result).await?;
    }

    out.flush().await?;
    debug!("reached end of input after {} line(s)", line_no);
    Ok(summary)
}
