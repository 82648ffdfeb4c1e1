use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// A bounded fan-out worker pool draining a queue of resource paths.
///
/// `workers` tasks share the receiving half of a bounded channel and run the
/// handler once per queued path. Workers terminate when the channel is
/// closed (every sender dropped) and drained, or when the shutdown token is
/// cancelled; [`WorkerPool::join`] closes the pool's own sender and then
/// awaits every worker. No ordering is guaranteed among workers.
pub(crate) struct WorkerPool {
    queue: mpsc::Sender<String>,
    workers: JoinSet<()>,
}

impl WorkerPool {
    pub(crate) fn spawn<H, Fut>(
        workers: usize,
        queue_length: usize,
        shutdown: CancellationToken,
        handler: H,
    ) -> Self
    where
        H: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<String>(queue_length.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let handler = Arc::new(handler);

        let mut set = JoinSet::new();
        for _ in 0..workers.max(1) {
            let rx = rx.clone();
            let handler = handler.clone();
            let shutdown = shutdown.clone();

            set.spawn(async move {
                loop {
                    // The receiver lock is held only while waiting for the
                    // next path, never across the handler invocation.
                    let next = {
                        let mut guard = rx.lock().await;
                        tokio::select! {
                            path = guard.recv() => path,
                            _ = shutdown.cancelled() => None,
                        }
                    };

                    match next {
                        Some(path) => (*handler)(path).await,
                        None => break,
                    }
                }
            });
        }

        Self {
            queue: tx,
            workers: set,
        }
    }

    /// A sender other producers (e.g. a parent fan-out level) can feed
    /// paths through. The pool drains only once every clone is dropped.
    pub(crate) fn sender(&self) -> mpsc::Sender<String> {
        self.queue.clone()
    }

    /// Queue one path, waiting if the queue is at capacity.
    pub(crate) async fn dispatch(&self, path: String) {
        // A send only fails when every worker is already gone, which means
        // shutdown: the path can be dropped.
        let _ = self.queue.send(path).await;
    }

    /// Close the pool's sender and wait for every worker to terminate.
    pub(crate) async fn join(mut self) {
        drop(self.queue);

        while let Some(joined) = self.workers.join_next().await {
            if let Err(e) = joined {
                error!("Fan-out worker failed: {e}");
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn processes_every_path_exactly_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let pool = {
            let seen = seen.clone();
            WorkerPool::spawn(4, 2, CancellationToken::new(), move |path: String| {
                let seen = seen.clone();
                async move {
                    // Force genuine interleaving among workers
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    seen.lock().await.push(path);
                }
            })
        };

        for i in 0..10 {
            pool.dispatch(format!("path-{i}")).await;
        }
        pool.join().await;

        let mut seen = seen.lock().await.clone();
        seen.sort();
        let expected: Vec<String> = (0..10).map(|i| format!("path-{i}")).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn join_waits_for_queued_paths() {
        let done = Arc::new(Mutex::new(0usize));

        let pool = {
            let done = done.clone();
            WorkerPool::spawn(1, 5, CancellationToken::new(), move |_path: String| {
                let done = done.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    *done.lock().await += 1;
                }
            })
        };

        for i in 0..5 {
            pool.dispatch(i.to_string()).await;
        }
        pool.join().await;

        assert_eq!(*done.lock().await, 5);
    }

    #[tokio::test]
    async fn cancellation_stops_idle_workers() {
        let shutdown = CancellationToken::new();
        let pool = WorkerPool::spawn(2, 2, shutdown.clone(), |_path: String| async {});

        // Keep a sender alive so the channel never closes on its own
        let _producer = pool.sender();
        shutdown.cancel();

        // Workers must exit even though the queue was never closed.
        tokio::time::timeout(Duration::from_secs(1), pool.join())
            .await
            .expect("workers did not stop after cancellation");
    }
}
