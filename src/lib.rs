//! Consumer-lag and throughput telemetry for Apache Kafka, collected by
//! querying the [Burrow](https://github.com/linkedin/Burrow) HTTP API.
//!
//! This crate is the retrieval engine only: it walks the Burrow resource
//! tree (clusters → topics → partitions; clusters → consumer groups →
//! per-partition status) with bounded concurrency, translates the
//! responses into flat tagged metric records, and hands records and errors
//! to an [`Accumulator`] owned by the host. Scheduling of polling rounds
//! and shipping of the records are the host's business.

#[macro_use]
extern crate log;

// Inner modules
mod consumers;
mod dispatch;
mod session;
mod topics;

pub mod accumulator;
pub mod api;
pub mod collector;
pub mod config;
pub mod errors;
pub mod filter;

// Exports
pub use accumulator::{Accumulator, Fields, Metric, RecordingAccumulator, Tags};
pub use collector::BurrowCollector;
pub use config::BurrowConfig;
pub use consumers::CONSUMER_MEASUREMENT;
pub use errors::{GatherError, GatherResult};
pub use topics::TOPIC_MEASUREMENT;
