use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::accumulator::Accumulator;
use crate::api::ClusterList;
use crate::config::BurrowConfig;
use crate::errors::{GatherError, GatherResult};
use crate::filter::ResourceFilter;
use crate::session::ServerSession;
use crate::{consumers, topics};

/// Compiled per-resource filters, shared by every server of a round.
#[derive(Debug, Clone)]
struct Filters {
    clusters: Arc<ResourceFilter>,
    groups: Arc<ResourceFilter>,
    topics: Arc<ResourceFilter>,
}

/// The collection engine.
///
/// One [`BurrowCollector::gather`] call walks every configured server once:
/// it opens a fresh [`ServerSession`] per server, bootstraps the cluster
/// list, and runs the topic and consumer-group traversals concurrently over
/// the filtered clusters. Records and errors flow to the [`Accumulator`];
/// nothing is kept between rounds.
#[derive(Debug)]
pub struct BurrowCollector {
    config: BurrowConfig,
    filters: Filters,
}

impl BurrowCollector {
    /// Validate `config` and build a collector.
    ///
    /// Fails if no server is configured or a filter glob does not compile.
    /// Per-server address problems are not caught here: they surface during
    /// [`Self::gather`], fatal for the offending server only.
    pub fn new(config: BurrowConfig) -> GatherResult<Self> {
        if config.servers.is_empty() {
            return Err(GatherError::NoServers);
        }

        let filters = Filters {
            clusters: Arc::new(ResourceFilter::new(
                &config.clusters_include,
                &config.clusters_exclude,
            )?),
            groups: Arc::new(ResourceFilter::new(
                &config.groups_include,
                &config.groups_exclude,
            )?),
            topics: Arc::new(ResourceFilter::new(
                &config.topics_include,
                &config.topics_exclude,
            )?),
        };

        Ok(Self { config, filters })
    }

    /// Collect every configured server once.
    ///
    /// Returns only after every task spawned at every fan-out level, across
    /// all servers, has terminated and every error has been drained into
    /// `acc`. Cancelling `shutdown` aborts in-flight work promptly.
    pub async fn gather(&self, acc: Arc<dyn Accumulator>, shutdown: CancellationToken) {
        debug!("Collecting from {} server(s)", self.config.servers.len());

        let (err_tx, mut err_rx) = mpsc::unbounded_channel();

        let mut servers = JoinSet::new();
        for address in &self.config.servers {
            match ServerSession::open(address, &self.config, err_tx.clone(), shutdown.clone()) {
                Ok(session) => {
                    servers.spawn(collect_server(
                        Arc::new(session),
                        self.filters.clone(),
                        acc.clone(),
                    ));
                },
                Err(error) => {
                    // Fatal for this server only; siblings are still collected.
                    let _ = err_tx.send(error);
                },
            }
        }

        while let Some(joined) = servers.join_next().await {
            if let Err(e) = joined {
                error!("Server collection task failed: {e}");
            }
        }

        // Every session died with its tasks above; dropping our own sender
        // closes the channel, so the drain below observes end-of-stream
        // rather than blocking forever.
        drop(err_tx);
        while let Some(error) = err_rx.recv().await {
            acc.add_error(error);
        }
    }
}

async fn collect_server(session: Arc<ServerSession>, filters: Filters, acc: Arc<dyn Accumulator>) {
    // Bootstrap: the one request of a round that is not semaphore-gated.
    let list = match session.fetch_bootstrap::<ClusterList>("").await {
        Ok(list) => list,
        Err(error) => {
            session.report(error);
            return;
        },
    };

    let clusters = filters.clusters.filter(list.clusters);
    if clusters.is_empty() {
        debug!("No clusters left after filtering");
        return;
    }
    trace!("Traversing clusters: {clusters:?}");

    tokio::join!(
        topics::collect(
            session.clone(),
            &clusters,
            filters.topics.clone(),
            acc.clone()
        ),
        consumers::collect(session.clone(), &clusters, filters.groups.clone(), acc),
    );
}
