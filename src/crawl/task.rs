// src/crawl/task.rs
// =============================================================================
// One unit of crawl work: "visit this URL with this much depth left".
//
// How it works:
// 1. Give up if there's no depth left
// 2. Give up if the crawl's deadline has passed
// 3. Give up if the URL matches an ignore pattern
// 4. Claim the URL in the visited set (give up if someone else already did)
// 5. Fetch the page and add its word counts to the shared tally
// 6. Spawn one child task per link, with one less level of depth,
//    and wait for every child to finish before returning
//
// Step 4 happens before step 5, so a page is downloaded at most once per
// crawl even when several tasks reach it at the same time.
//
// The deadline is only checked when a task starts. A fetch that is already
// running is never interrupted; its children will see the deadline has passed
// and stop straight away.
//
// Rust concepts:
// - Arc: Shared ownership of the crawl context across threads
// - BoxFuture: A heap-allocated future, needed because a task spawns tasks
// - JoinSet: A group of spawned tasks we can wait on one by one
// =============================================================================

use super::filter::UrlFilter;
use super::tally::WordTally;
use super::visited::VisitedSet;
use crate::fetcher::PageFetcher;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, warn};

// State shared by every task of one crawl
//
// Built fresh for each crawl. Tasks only read `filter` and `deadline`, and
// only touch `visited` and `tally` through their atomic operations.
pub struct CrawlContext {
    pub fetcher: Arc<dyn PageFetcher>,
    pub filter: UrlFilter,
    pub visited: VisitedSet,
    pub tally: WordTally,
    // None when the timeout was too large to turn into an Instant
    pub deadline: Option<Instant>,
}

impl CrawlContext {
    pub fn new(fetcher: Arc<dyn PageFetcher>, filter: UrlFilter, deadline: Option<Instant>) -> Self {
        Self {
            fetcher,
            filter,
            visited: VisitedSet::new(),
            tally: WordTally::new(),
            deadline,
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

pub struct CrawlTask {
    url: String,
    remaining_depth: usize,
    context: Arc<CrawlContext>,
}

impl CrawlTask {
    pub fn new(url: String, remaining_depth: usize, context: Arc<CrawlContext>) -> Self {
        Self {
            url,
            remaining_depth,
            context,
        }
    }

    // Runs this task and its whole subtree
    //
    // Resolves to true if this task fetched its page. Must be polled inside
    // the scheduler's runtime, because children are spawned onto it.
    pub fn compute(self) -> BoxFuture<'static, bool> {
        self.run().boxed()
    }

    async fn run(self) -> bool {
        let context = &self.context;

        if self.remaining_depth == 0 {
            return false;
        }
        if context.deadline_passed() {
            debug!(url = %self.url, "deadline passed, not fetching");
            return false;
        }
        if context.filter.is_ignored(&self.url) {
            debug!(url = %self.url, "ignored by pattern");
            return false;
        }
        if !context.visited.try_claim(&self.url) {
            return false;
        }

        debug!(url = %self.url, depth = self.remaining_depth, "fetching page");
        let page = match context.fetcher.fetch(&self.url).await {
            Ok(page) => page,
            Err(error) => {
                // This branch ends here; siblings and the parent carry on
                warn!(url = %self.url, %error, "could not fetch page");
                return false;
            }
        };

        context.tally.merge_all(&page.word_counts);

        let mut children = JoinSet::new();
        for link in page.links {
            let child = CrawlTask::new(link, self.remaining_depth - 1, Arc::clone(context));
            children.spawn(child.compute());
        }

        // Structured concurrency: this call outlives every child it spawned
        while let Some(joined) = children.join_next().await {
            if let Err(error) = joined {
                warn!(parent = %self.url, %error, "child crawl task did not complete");
            }
        }

        true
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does compute() return a BoxFuture instead of being an async fn?
//    - An async fn's future contains the futures of everything it awaits
//    - A task that spawns copies of itself would need a type of infinite size
//    - Boxing puts the child future on the heap, so its size is just a pointer
//
// 2. Why Arc<CrawlContext> and not &CrawlContext?
//    - tokio::spawn may run the task on any worker thread, at any time
//    - So spawned futures must own their data ('static), not borrow it
//    - Arc gives every task shared ownership of the same context
//
// 3. What does JoinSet::join_next() return?
//    - Some(Ok(value)) when a child finished normally
//    - Some(Err(e)) when a child panicked (or was cancelled)
//    - None once every child has been joined
// -----------------------------------------------------------------------------
