//! Shapes of the Burrow v2 HTTP API responses.
//!
//! Each endpoint gets its own payload struct, decoded by the caller that
//! knows which endpoint it requested; the only shared piece is the
//! [`ApiStatus`] prelude carried by every response.

use serde::Deserialize;

/// Status prelude present in every Burrow response.
///
/// It is probed from the body before the endpoint-specific payload is
/// decoded, so an API-level failure never masquerades as a decode failure.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
}

/// Identifiers echoed back by Burrow, correlating a response with the
/// request that produced it. Metric tags are built from these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub host: String,
}

/// `GET {prefix}`: the clusters known to Burrow.
#[derive(Debug, Deserialize)]
pub struct ClusterList {
    #[serde(default)]
    pub clusters: Vec<String>,
}

/// `GET {prefix}/{cluster}/topic`: the topics of one cluster.
#[derive(Debug, Deserialize)]
pub struct TopicList {
    #[serde(default)]
    pub topics: Vec<String>,
}

/// `GET {prefix}/{cluster}/consumer`: the consumer groups of one cluster.
#[derive(Debug, Deserialize)]
pub struct ConsumerList {
    #[serde(default)]
    pub consumers: Vec<String>,
}

/// `GET {prefix}/{cluster}/topic/{topic}`: latest offsets of one topic,
/// indexed by partition id.
#[derive(Debug, Deserialize)]
pub struct TopicOffsets {
    #[serde(default)]
    pub offsets: Vec<i64>,
    #[serde(default)]
    pub request: ResourceRef,
}

/// `GET {prefix}/{cluster}/consumer/{group}/status`: evaluated status of
/// one consumer group.
#[derive(Debug, Deserialize)]
pub struct GroupStatusResponse {
    #[serde(default)]
    pub status: GroupStatus,
    #[serde(default)]
    pub request: ResourceRef,
}

/// Evaluation of a consumer group, one entry per consumed partition.
#[derive(Debug, Default, Deserialize)]
pub struct GroupStatus {
    #[serde(default)]
    pub partitions: Vec<PartitionLag>,
}

/// Lag evaluation of a single partition consumed by a group.
#[derive(Debug, Deserialize)]
pub struct PartitionLag {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub partition: i32,
    #[serde(default)]
    pub status: String,
    pub start: Option<OffsetWindow>,
    pub end: Option<OffsetWindow>,
}

/// One end of the offset window Burrow evaluates a partition over.
#[derive(Debug, Deserialize)]
pub struct OffsetWindow {
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub lag: i64,
}
