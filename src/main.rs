use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tweet_capture::{ToExitCode, capture, logging};

#[derive(Debug, Parser)]
#[command(name = "tweet-capture", version, about)]
struct Cli {
    /// JSON config file; config.json in the working directory is used when
    /// missing or unreadable
    config: Option<PathBuf>,

    /// Turn on the debug log level.
    ///
    /// If off only reports ERROR, WARN, and INFO
    /// If on also reports DEBUG and TRACE
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing_subscriber(cli.debug);

    match capture::run_from(cli.config.as_deref()).await {
        Ok(report) => {
            tracing::info!(
                status = %report.fetch.status,
                path = %report.path.display(),
                bytes_written = report.fetch.bytes_written,
                elapsed_ms = report.fetch.elapsed.as_millis() as u64,
                "capture finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                code = e.error_code(),
                exit_code = e.exit_code(),
                pre_flight = e.is_pre_flight(),
                "capture failed"
            );
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_argument_is_optional() {
        let cli = Cli::try_parse_from(["tweet-capture"]).unwrap();
        assert_eq!(cli.config, None);
        assert!(!cli.debug);

        let cli = Cli::try_parse_from(["tweet-capture", "mine.json", "--debug"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("mine.json")));
        assert!(cli.debug);
    }

    #[test]
    fn more_than_one_config_is_a_usage_error() {
        let result = Cli::try_parse_from(["tweet-capture", "a.json", "b.json"]);
        let error = result.unwrap_err();
        assert_eq!(error.exit_code(), 2);
    }
}
