use std::sync::Arc;

use crate::accumulator::{Accumulator, Fields, Tags};
use crate::api::{TopicList, TopicOffsets};
use crate::dispatch::WorkerPool;
use crate::filter::ResourceFilter;
use crate::session::ServerSession;

/// Measurement emitted for every partition of every traversed topic.
pub const TOPIC_MEASUREMENT: &str = "burrow_topic";

/// Walk `cluster → topic → per-partition offsets` over the given clusters,
/// emitting one [`TOPIC_MEASUREMENT`] record per offset index.
///
/// Two nested worker pools share the session, so the per-server semaphore
/// still caps the combined number of in-flight requests, including the ones
/// issued by the consumer-group traversal running next to this one.
pub(crate) async fn collect(
    session: Arc<ServerSession>,
    clusters: &[String],
    topics: Arc<ResourceFilter>,
    acc: Arc<dyn Accumulator>,
) {
    let offsets_pool = WorkerPool::spawn(
        session.worker_count(),
        session.queue_length(),
        session.shutdown_token(),
        {
            let session = session.clone();
            move |path: String| {
                let session = session.clone();
                let acc = acc.clone();
                async move {
                    if let Some(offsets) = session.fetch_or_report::<TopicOffsets>(&path).await {
                        emit_offsets(&offsets, acc.as_ref());
                    }
                }
            }
        },
    );

    let offsets_tx = offsets_pool.sender();
    let clusters_pool = WorkerPool::spawn(
        session.worker_count(),
        session.queue_length(),
        session.shutdown_token(),
        {
            let session = session.clone();
            move |cluster: String| {
                let session = session.clone();
                let topics = topics.clone();
                let offsets_tx = offsets_tx.clone();
                async move {
                    let path = format!("{cluster}/topic");
                    let Some(list) = session.fetch_or_report::<TopicList>(&path).await else {
                        return;
                    };

                    for topic in topics.filter(list.topics) {
                        let _ = offsets_tx.send(format!("{cluster}/topic/{topic}")).await;
                    }
                }
            }
        },
    );

    for cluster in clusters {
        clusters_pool.dispatch(cluster.clone()).await;
    }

    // Once the cluster level is fully joined, no producer for the offsets
    // queue remains and the inner level can drain to completion.
    clusters_pool.join().await;
    offsets_pool.join().await;
}

fn emit_offsets(offsets: &TopicOffsets, acc: &dyn Accumulator) {
    for (partition, offset) in offsets.offsets.iter().enumerate() {
        let mut tags = Tags::new();
        tags.insert("cluster".to_string(), offsets.request.cluster.clone());
        tags.insert("topic".to_string(), offsets.request.topic.clone());
        tags.insert("partition".to_string(), partition.to_string());

        let mut fields = Fields::new();
        fields.insert("offset".to_string(), *offset);

        acc.add_fields(TOPIC_MEASUREMENT, fields, tags);
    }
}
