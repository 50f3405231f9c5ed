// src/crawl/scheduler.rs
// =============================================================================
// The worker pool that runs crawl tasks.
//
// Under the hood this is a multi-threaded tokio runtime with a fixed number
// of worker threads. tokio's scheduler is work-stealing: an idle worker takes
// queued tasks from a busy one, so a deep chain of links on one site doesn't
// leave the other workers sitting around.
//
// Callers are ordinary (non-async) code. run_to_completion() and run_all()
// block the calling thread until every task in the tree(s) has finished.
// They must not be called from inside another tokio runtime.
//
// Rust concepts:
// - tokio::runtime::Runtime: An executor we own and can block on
// - anyhow::Context: Adds a human-readable message to an error
// =============================================================================

use super::task::CrawlTask;
use anyhow::{Context, Result};
use std::num::NonZeroUsize;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub struct Scheduler {
    runtime: Runtime,
    workers: usize,
}

impl Scheduler {
    // Creates a pool with min(requested, available cores) workers, at least 1
    //
    // `requested == 0` means "as many as there are cores". If the runtime
    // can't be created at that size we fall back to a single worker.
    pub fn new(requested: usize) -> Result<Self> {
        let available = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let workers = worker_count(requested, available);

        match build_runtime(workers) {
            Ok(runtime) => {
                debug!(workers, requested, available, "started crawl worker pool");
                Ok(Self { runtime, workers })
            }
            Err(error) if workers > 1 => {
                warn!(workers, %error, "could not start worker pool, falling back to 1 worker");
                let runtime = build_runtime(1).context("Failed to create crawl worker pool")?;
                Ok(Self { runtime, workers: 1 })
            }
            Err(error) => Err(error).context("Failed to create crawl worker pool"),
        }
    }

    // Number of worker threads in the pool
    pub fn workers(&self) -> usize {
        self.workers
    }

    // Runs one task tree and blocks until all of it has finished
    //
    // Returns whether the root task fetched its page.
    pub fn run_to_completion(&self, root: CrawlTask) -> bool {
        self.run_all(vec![root]) == 1
    }

    // Runs several task trees side by side on the same workers
    //
    // Blocks until every tree has finished and returns how many roots
    // fetched their page.
    pub fn run_all(&self, roots: Vec<CrawlTask>) -> usize {
        self.runtime.block_on(async move {
            // Spawn rather than poll here, so roots run on the workers
            // instead of on the calling thread
            let mut trees = JoinSet::new();
            for root in roots {
                trees.spawn(root.compute());
            }

            let mut productive = 0;
            while let Some(joined) = trees.join_next().await {
                match joined {
                    Ok(true) => productive += 1,
                    Ok(false) => {}
                    Err(error) => warn!(%error, "root crawl task did not complete"),
                }
            }
            productive
        })
    }
}

// Clamps the requested parallelism to what the machine has, never below 1
fn worker_count(requested: usize, available: usize) -> usize {
    let available = available.max(1);
    if requested == 0 {
        available
    } else {
        requested.min(available)
    }
}

fn build_runtime(workers: usize) -> std::io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(workers)
        .thread_name("crawl-worker")
        .enable_all()
        .build()
}
