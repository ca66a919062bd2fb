//! reqcheck Core Library
//!
//! Checks HTTP(S) requests against filter lists using the `adblock` engine,
//! either one request at a time or as a stream of newline-delimited JSON
//! records.
//!
//! # Modules
//!
//! - `types`: Request type vocabularies and records
//! - `engine`: Blocking engine adapter
//! - `mode`: Single-request vs. streaming selection
//! - `stream`: Record stream processing
//! - `report`: Result rendering and run status
//! - `runner`: End-to-end invocation
//! - `error`: Error types

pub mod engine;
pub mod error;
pub mod mode;
pub mod report;
pub mod runner;
pub mod stream;
pub mod types;

// Re-export commonly used types
pub use engine::{AdblockEngine, RequestChecker, BUILTIN_RULE_LISTS};
pub use error::{CheckError, ConfigError, EngineError, StreamError};
pub use mode::{select_mode, CheckOptions, RecordSource, RunMode};
pub use report::{CheckResult, RunStatus};
pub use runner::run;
pub use stream::{parse_record, process_records, StreamSummary};
pub use types::{all_tokens, normalize, CheckDetail, CheckRecord, UnifiedType, VendorType};
