use std::time::Duration;

use artgrid_engine::{FetchSettings, DEFAULT_BASE_URL};
use clap::Parser;
use log::LevelFilter;

use crate::logging::LogDestination;

/// Command-line arguments for the artgrid terminal browser
#[derive(Parser, Debug)]
#[command(name = "artgrid")]
#[command(about = "Page through the Art Institute of Chicago artworks API and select rows")]
#[command(version)]
pub struct Cli {
    /// API root; `/artworks?page=N` is appended to it
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "ARTGRID_BASE_URL")]
    pub base_url: String,

    /// Seconds allowed for establishing a connection
    #[arg(long, default_value_t = 10, env = "ARTGRID_CONNECT_TIMEOUT")]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole request; unlimited when omitted
    #[arg(long, env = "ARTGRID_REQUEST_TIMEOUT")]
    pub request_timeout_secs: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api() {
        let cli = Cli::parse_from(["artgrid"]);
        let settings = cli.fetch_settings();

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, None);
        assert_eq!(cli.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "artgrid",
            "--base-url",
            "http://localhost:8080/v1",
            "--request-timeout-secs",
            "3",
            "--log",
            "terminal",
            "-v",
        ]);

        assert_eq!(cli.fetch_settings().base_url, "http://localhost:8080/v1");
        assert_eq!(
            cli.fetch_settings().request_timeout,
            Some(Duration::from_secs(3))
        );
        assert_eq!(cli.log, LogDestination::Terminal);
        assert_eq!(cli.log_level(), LevelFilter::Debug);
    }
}
