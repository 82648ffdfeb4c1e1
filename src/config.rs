use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Default path prefix of the Burrow HTTP API.
pub const DEFAULT_API_PREFIX: &str = "/v2/kafka";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default cap on concurrent in-flight requests towards a single server.
pub const DEFAULT_MAX_CONCURRENT_CONNECTIONS: usize = 10;

/// Default capacity of the path queue feeding each pool of fetch workers.
pub const DEFAULT_WORKER_QUEUE_LENGTH: usize = 5;

/// Configuration of the Burrow collection engine.
///
/// Every field besides `servers` has a default, so a host can deserialize
/// this from its own configuration file with only the server list set:
///
/// ```toml
/// servers = ["http://burrow01:8000"]
/// timeout = "10s"
/// topics_exclude = ["__consumer_offsets"]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BurrowConfig {
    /// Burrow servers to collect from (format: 'http[s]://[user:pass@]host:port').
    pub servers: Vec<String>,

    /// Path prefix of the Burrow HTTP API.
    pub api_prefix: String,

    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Username for HTTP basic auth.
    ///
    /// Applied to every server that does not embed its own credentials in
    /// the address; embedded credentials win.
    pub username: Option<String>,

    /// Password for HTTP basic auth.
    pub password: Option<String>,

    /// PEM file with the CA certificate(s) used to verify the servers.
    pub ssl_ca: Option<PathBuf>,

    /// PEM file with the client certificate, for mutual TLS. Paired with `ssl_key`.
    pub ssl_cert: Option<PathBuf>,

    /// PEM file with the client key, for mutual TLS. Paired with `ssl_cert`.
    pub ssl_key: Option<PathBuf>,

    /// Skip verification of the server certificate chain and host name.
    pub insecure_skip_verify: bool,

    /// Cap on concurrent in-flight requests towards a single server.
    ///
    /// The cap is shared by the topic and the consumer-group traversal of
    /// that server.
    pub max_concurrent_connections: usize,

    /// Capacity of the path queue feeding each pool of fetch workers.
    pub worker_queue_length: usize,

    /// Only traverse clusters matching at least one of these globs.
    /// An empty list admits every cluster.
    pub clusters_include: Vec<String>,

    /// Skip clusters matching any of these globs. Exclusion always wins.
    pub clusters_exclude: Vec<String>,

    /// Only traverse consumer groups matching at least one of these globs.
    pub groups_include: Vec<String>,

    /// Skip consumer groups matching any of these globs.
    pub groups_exclude: Vec<String>,

    /// Only traverse topics matching at least one of these globs.
    pub topics_include: Vec<String>,

    /// Skip topics matching any of these globs.
    pub topics_exclude: Vec<String>,
}

impl Default for BurrowConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: DEFAULT_TIMEOUT,
            username: None,
            password: None,
            ssl_ca: None,
            ssl_cert: None,
            ssl_key: None,
            insecure_skip_verify: false,
            max_concurrent_connections: DEFAULT_MAX_CONCURRENT_CONNECTIONS,
            worker_queue_length: DEFAULT_WORKER_QUEUE_LENGTH,
            clusters_include: Vec::new(),
            clusters_exclude: Vec::new(),
            groups_include: Vec::new(),
            groups_exclude: Vec::new(),
            topics_include: Vec::new(),
            topics_exclude: Vec::new(),
        }
    }
}
