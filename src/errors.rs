use thiserror::Error;

/// Possible errors raised while collecting from Burrow servers.
///
/// None of these abort a whole collection round: each one is scoped to the
/// server or resource branch it was raised for, and reaches the host through
/// the accumulator's error sink.
#[derive(Error, Debug)]
pub enum GatherError {
    /// The configured server address could not be turned into a usable base URL.
    /// Fatal for that server only.
    #[error("Invalid server address '{address}': {reason}")]
    Address { address: String, reason: String },

    /// A filter glob could not be compiled.
    #[error("Invalid filter pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// No servers were configured at all.
    #[error("No Burrow servers configured")]
    NoServers,

    /// The per-server HTTP client could not be built (unreadable or invalid TLS material).
    #[error("Unable to build HTTP client: {reason}")]
    Client { reason: String },

    /// The HTTP round-trip itself failed (connection refused, timeout, ...).
    #[error("Request to '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status code.
    #[error("Request to '{path}' returned status {status}")]
    Status { path: String, status: u16 },

    /// The response body was not the JSON shape the endpoint is documented to return.
    #[error("Unable to decode response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Burrow itself flagged the request as failed (`error: true` envelope).
    #[error("Burrow error for '{path}': {message}")]
    Api { path: String, message: String },

    /// Collection was interrupted by the shutdown token.
    #[error("Collection cancelled")]
    Cancelled,
}

pub type GatherResult<T> = Result<T, GatherError>;
