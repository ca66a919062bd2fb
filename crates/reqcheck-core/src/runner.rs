//! End-to-end run: select the mode, open the input, build the checker, report.

use log::{debug, info};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::engine::RequestChecker;
use crate::error::{ConfigError, Result, StreamError};
use crate::mode::{select_mode, CheckOptions, RecordSource, RunMode};
use crate::report::{check_record, write_result, RunStatus};
use crate::stream::process_records;

/// Run one invocation.
///
/// `build_checker` is only called once the options are known to be valid and
/// the record source is open, so configuration errors never touch the engine.
pub async fn run<C, F, W>(options: &CheckOptions, build_checker: F, out: &mut W) -> Result<RunStatus>
where
    C: RequestChecker,
    F: FnOnce() -> std::result::Result<C, ConfigError>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mode = select_mode(options)?;
    debug!("run mode: {:?}", mode);

    match mode {
        RunMode::SingleRequest(record) => {
            let checker = build_checker()?;
            let result = check_record(&checker, &record, options.verbose);
            write_result(out, &result).await?;
            out.flush().await.map_err(StreamError::from)?;

            Ok(if result.is_failed() {
                RunStatus::Failure
            } else {
                RunStatus::Success
            })
        }
        RunMode::Streaming(source) => {
            let reader = open_source(source).await?;
            let checker = build_checker()?;
            let summary = process_records(reader, &checker, options.verbose, out).await?;

            info!(
                "checked {} request(s): {} matched, {} failed",
                summary.processed, summary.matched, summary.failed
            );
            Ok(summary.status())
        }
    }
}

async fn open_source(
    source: RecordSource,
) -> std::result::Result<Box<dyn AsyncBufRead + Unpin + Send>, ConfigError> {
    match source {
        RecordSource::Stdin => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
        RecordSource::File(path) => {
            let file = File::open(&path)
                .await
                .map_err(|source| ConfigError::OpenRequests { path, source })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
