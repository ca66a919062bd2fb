//! reqcheck CLI
//!
//! Checks whether requests would be blocked by filter lists. Pass `--url`,
//! `--context` and `--type` to check one request, or feed newline-delimited
//! JSON records (`{"url": ..., "context": ..., "type": ...}`) through
//! `--requests` or stdin.

use std::path::PathBuf;
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Parser};

use reqcheck_core::{all_tokens, run, AdblockEngine, CheckOptions};

/// Exit code for configuration and input errors.
const EXIT_USAGE: i32 = 2;

#[derive(Parser)]
#[command(name = "reqcheck")]
#[command(about = "Check requests against content-filtering rules")]
#[command(version, disable_version_flag = true)]
#[command(arg(
    Arg::new("version")
        .short('v')
        .long("version")
        .action(ArgAction::Version)
        .help("Print version")
))]
struct Cli {
    /// Newline-delimited JSON records to check (defaults to stdin)
    #[arg(long, value_name = "PATH")]
    requests: Option<PathBuf>,

    /// URL of a single request
    #[arg(long, value_name = "URI")]
    url: Option<String>,

    /// URL of the page issuing the request
    #[arg(long, value_name = "URI")]
    context: Option<String>,

    /// Request type, engine or browser vocabulary
    #[arg(
        long = "type",
        value_name = "TOKEN",
        value_parser = PossibleValuesParser::new(all_tokens()),
        hide_possible_values = true
    )]
    request_type: Option<String>,

    /// Filter list files (defaults to the built-in ad and tracking lists)
    #[arg(long, value_name = "PATH", num_args = 1..)]
    rules: Vec<PathBuf>,

    /// Print the full match detail instead of true/false
    #[arg(long)]
    verbose: bool,
}

impl From<Cli> for CheckOptions {
    fn from(cli: Cli) -> Self {
        Self {
            url: cli.url,
            context: cli.context,
            request_type: cli.request_type,
            requests: cli.requests,
            rules: cli.rules,
            verbose: cli.verbose,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = CheckOptions::from(Cli::parse());

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to start tokio runtime: {}", e);
            process::exit(EXIT_USAGE);
        }
    };

    let result = runtime.block_on(async {
        let mut stdout = tokio::io::stdout();
        run(
            &options,
            || AdblockEngine::from_rule_files(&options.rules, options.verbose),
            &mut stdout,
        )
        .await
    });

    match result {
        Ok(status) => process::exit(status.exit_code()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_USAGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_v_prints_version() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["reqcheck", flag]).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::DisplayVersion, "{flag}");
        }
    }

    #[test]
    fn parses_single_request() {
        let cli = Cli::try_parse_from([
            "reqcheck",
            "--url",
            "https://ads.test/a.js",
            "--context",
            "https://site.test/",
            "--type",
            "CSS stylesheet",
            "--verbose",
        ])
        .unwrap();
        let options = CheckOptions::from(cli);
        assert_eq!(options.request_type.as_deref(), Some("CSS stylesheet"));
        assert!(options.verbose);
        assert!(options.rules.is_empty());
    }

    #[test]
    fn rejects_unknown_types() {
        let err = Cli::try_parse_from(["reqcheck", "--type", "bogus"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn accepts_several_rule_files() {
        let cli = Cli::try_parse_from(["reqcheck", "--rules", "a.txt", "b.txt"]).unwrap();
        assert_eq!(CheckOptions::from(cli).rules.len(), 2);
    }
}
