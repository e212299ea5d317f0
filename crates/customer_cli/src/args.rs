//! Command-line and environment configuration.

use clap::Parser;
use customer_core::{StoreUri, DEFAULT_STORE_URI};

/// Clears the customer collection, seeds two customers and logs three lookups.
#[derive(Parser, Debug)]
#[command(name = "customer-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Document store connection URI (`sqlite://<path>` or `sqlite::memory:`)
    #[arg(long, env = "CUSTOMER_STORE_URI", default_value = DEFAULT_STORE_URI)]
    pub store_uri: StoreUri,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "CUSTOMER_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Absolute directory for rotating log files, in addition to stderr
    #[arg(long, env = "CUSTOMER_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};
    use customer_core::StoreUri;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_explicit_options() {
        let cli = Cli::try_parse_from([
            "customer-demo",
            "--store-uri",
            "sqlite:///tmp/customers.db",
            "--log-level",
            "info",
            "--log-dir",
            "/tmp/customer-logs",
        ])
        .unwrap();

        assert_eq!(
            cli.store_uri,
            StoreUri::File(PathBuf::from("/tmp/customers.db"))
        );
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/customer-logs"));
    }

    #[test]
    fn rejects_unsupported_store_scheme() {
        let err = Cli::try_parse_from([
            "customer-demo",
            "--store-uri",
            "mongodb://localhost:27017/test",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("unsupported store uri scheme"));
    }
}
