use std::sync::Arc;

use crate::accumulator::{Accumulator, Fields, Tags};
use crate::api::{ConsumerList, GroupStatusResponse};
use crate::dispatch::WorkerPool;
use crate::filter::ResourceFilter;
use crate::session::ServerSession;

/// Measurement emitted for every partition consumed by a traversed group.
pub const CONSUMER_MEASUREMENT: &str = "burrow_consumer";

/// Walk `cluster → consumer group → per-partition status` over the given
/// clusters, emitting one [`CONSUMER_MEASUREMENT`] record per reported
/// partition.
///
/// Mirrors the topic traversal: two nested worker pools, one shared
/// session, one shared per-server request cap.
pub(crate) async fn collect(
    session: Arc<ServerSession>,
    clusters: &[String],
    groups: Arc<ResourceFilter>,
    acc: Arc<dyn Accumulator>,
) {
    let status_pool = WorkerPool::spawn(
        session.worker_count(),
        session.queue_length(),
        session.shutdown_token(),
        {
            let session = session.clone();
            move |path: String| {
                let session = session.clone();
                let acc = acc.clone();
                async move {
                    if let Some(status) =
                        session.fetch_or_report::<GroupStatusResponse>(&path).await
                    {
                        emit_status(&status, acc.as_ref());
                    }
                }
            }
        },
    );

    let status_tx = status_pool.sender();
    let clusters_pool = WorkerPool::spawn(
        session.worker_count(),
        session.queue_length(),
        session.shutdown_token(),
        {
            let session = session.clone();
            move |cluster: String| {
                let session = session.clone();
                let groups = groups.clone();
                let status_tx = status_tx.clone();
                async move {
                    let path = format!("{cluster}/consumer");
                    let Some(list) = session.fetch_or_report::<ConsumerList>(&path).await else {
                        return;
                    };

                    for group in groups.filter(list.consumers) {
                        let _ = status_tx
                            .send(format!("{cluster}/consumer/{group}/status"))
                            .await;
                    }
                }
            }
        },
    );

    for cluster in clusters {
        clusters_pool.dispatch(cluster.clone()).await;
    }

    clusters_pool.join().await;
    status_pool.join().await;
}

fn emit_status(response: &GroupStatusResponse, acc: &dyn Accumulator) {
    for partition in &response.status.partitions {
        let mut tags = Tags::new();
        tags.insert("cluster".to_string(), response.request.cluster.clone());
        tags.insert("group".to_string(), response.request.group.clone());
        tags.insert("topic".to_string(), partition.topic.clone());
        tags.insert("partition".to_string(), partition.partition.to_string());

        let mut fields = Fields::new();
        fields.insert("status_code".to_string(), status_code(&partition.status));
        if let Some(start) = &partition.start {
            fields.insert("start.offset".to_string(), start.offset);
            fields.insert("start.lag".to_string(), start.lag);
            fields.insert("start.timestamp".to_string(), start.timestamp);
        }
        if let Some(end) = &partition.end {
            fields.insert("end.offset".to_string(), end.offset);
            fields.insert("end.lag".to_string(), end.lag);
            fields.insert("end.timestamp".to_string(), end.timestamp);
        }

        acc.add_fields(CONSUMER_MEASUREMENT, fields, tags);
    }
}

/// Numeric rendition of Burrow's partition status strings.
///
/// Anything outside the known set (including an absent status) maps to `0`.
fn status_code(status: &str) -> i64 {
    match status {
        "OK" => 1,
        "NOT_FOUND" => 2,
        "WARN" => 3,
        "ERR" => 4,
        "STOP" => 5,
        "STALL" => 6,
        _ => 0,
    }
}
