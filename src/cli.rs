use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};

use burrowstat::config::{
    DEFAULT_API_PREFIX, DEFAULT_MAX_CONCURRENT_CONNECTIONS, DEFAULT_WORKER_QUEUE_LENGTH,
};
use burrowstat::BurrowConfig;

/// Command Line Interface, defined via the declarative,
/// `derive` based functionality of the `clap` crate.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("logging_flags")
        .required(false)
        .multiple(false)
        .args(["verbose", "quiet"]),
))]
pub struct Cli {
    // --------------------------------------------------------------- Burrow servers configuration
    /// Burrow server to collect from (format: 'http[s]://[user:pass@]HOST:PORT').
    ///
    /// To collect from multiple servers, use this argument multiple times.
    #[arg(short, long = "server", value_name = "URL", required = true)]
    pub servers: Vec<String>,

    /// Path prefix of the Burrow HTTP API.
    #[arg(long = "api-prefix", value_name = "PATH", default_value = DEFAULT_API_PREFIX)]
    pub api_prefix: String,

    /// Per-request timeout, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 5)]
    pub timeout: u64,

    /// Username for HTTP basic auth.
    ///
    /// Credentials embedded in a server URL take precedence over this pair.
    #[arg(long, value_name = "USERNAME", env = "BURROWSTAT_USERNAME")]
    pub username: Option<String>,

    /// Password for HTTP basic auth.
    #[arg(long, value_name = "PASSWORD", env = "BURROWSTAT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// PEM file with the CA certificate(s) used to verify the servers.
    #[arg(long = "ssl-ca", value_name = "PEM_FILE")]
    pub ssl_ca: Option<PathBuf>,

    /// PEM file with the client certificate, for mutual TLS.
    #[arg(long = "ssl-cert", value_name = "PEM_FILE", requires = "ssl_key")]
    pub ssl_cert: Option<PathBuf>,

    /// PEM file with the client key, for mutual TLS.
    #[arg(long = "ssl-key", value_name = "PEM_FILE", requires = "ssl_cert")]
    pub ssl_key: Option<PathBuf>,

    /// Skip verification of the server certificate chain and host name.
    #[arg(long)]
    pub insecure_skip_verify: bool,

    // ------------------------------------------------------------------- Traversal configuration
    /// Cap on concurrent in-flight requests towards a single server.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_MAX_CONCURRENT_CONNECTIONS)]
    pub max_concurrent_connections: usize,

    /// Capacity of the path queue feeding each pool of fetch workers.
    #[arg(long, value_name = "LENGTH", default_value_t = DEFAULT_WORKER_QUEUE_LENGTH)]
    pub worker_queue_length: usize,

    /// Only traverse clusters matching this glob (repeatable).
    #[arg(long = "cluster", value_name = "GLOB")]
    pub clusters_include: Vec<String>,

    /// Skip clusters matching this glob (repeatable).
    #[arg(long = "exclude-cluster", value_name = "GLOB")]
    pub clusters_exclude: Vec<String>,

    /// Only traverse consumer groups matching this glob (repeatable).
    #[arg(long = "group", value_name = "GLOB")]
    pub groups_include: Vec<String>,

    /// Skip consumer groups matching this glob (repeatable).
    #[arg(long = "exclude-group", value_name = "GLOB")]
    pub groups_exclude: Vec<String>,

    /// Only traverse topics matching this glob (repeatable).
    #[arg(long = "topic", value_name = "GLOB")]
    pub topics_include: Vec<String>,

    /// Skip topics matching this glob (repeatable).
    #[arg(long = "exclude-topic", value_name = "GLOB")]
    pub topics_exclude: Vec<String>,

    // ----------------------------------------------------------------------- Host configuration
    /// Seconds between collection rounds.
    ///
    /// `0` collects once and exits.
    #[arg(short, long, value_name = "SECONDS", default_value_t = 0)]
    pub interval: u64,

    /// Verbose logging.
    ///
    /// * none    = 'WARN'
    /// * '-v'    = 'INFO'
    /// * '-vv'   = 'DEBUG'
    /// * '-vvv'  = 'TRACE'
    ///
    /// Alternatively, set environment variable 'BURROWSTAT_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub verbose: u8,

    /// Quiet logging.
    ///
    /// * none    = 'WARN'
    /// * '-q'    = 'ERROR'
    /// * '-qq'   = 'OFF'
    ///
    /// Alternatively, set environment variable 'BURROWSTAT_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub quiet: u8,
}

impl Cli {
    pub fn verbosity_level(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    pub fn to_config(&self) -> BurrowConfig {
        BurrowConfig {
            servers: self.servers.clone(),
            api_prefix: self.api_prefix.clone(),
            timeout: Duration::from_secs(self.timeout),
            username: self.username.clone(),
            password: self.password.clone(),
            ssl_ca: self.ssl_ca.clone(),
            ssl_cert: self.ssl_cert.clone(),
            ssl_key: self.ssl_key.clone(),
            insecure_skip_verify: self.insecure_skip_verify,
            max_concurrent_connections: self.max_concurrent_connections,
            worker_queue_length: self.worker_queue_length,
            clusters_include: self.clusters_include.clone(),
            clusters_exclude: self.clusters_exclude.clone(),
            groups_include: self.groups_include.clone(),
            groups_exclude: self.groups_exclude.clone(),
            topics_include: self.topics_include.clone(),
            topics_exclude: self.topics_exclude.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_config_from_arguments() {
        let cli = Cli::parse_from([
            "burrowstat",
            "--server",
            "http://burrow01:8000",
            "--timeout",
            "10",
            "--topic",
            "topic[AB]",
            "--exclude-group",
            "internal-*",
        ]);

        let config = cli.to_config();

        assert_eq!(config.servers, vec!["http://burrow01:8000"]);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.topics_include, vec!["topic[AB]"]);
        assert_eq!(config.groups_exclude, vec!["internal-*"]);
        assert_eq!(config.api_prefix, "/v2/kafka");
    }
}
