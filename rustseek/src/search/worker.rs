use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use super::channel::ResultSender;
use super::matcher::NameMatcher;
use super::walker::TreeWalker;
use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::results::{ResultMessage, WorkerOutcome};

/// One worker thread searching the tree for one target name.
///
/// The worker owns its walk from spawn to join. It emits one match line
/// per hit, or exactly one not-found line when the walk yields nothing,
/// and hands back a [`WorkerOutcome`] when joined.
pub struct SearchWorker {
    id: usize,
    target: String,
    handle: Option<JoinHandle<WorkerOutcome>>,
}

impl SearchWorker {
    /// Spawns the search thread for one target name.
    pub fn spawn(
        id: usize,
        target: String,
        config: Arc<SearchConfig>,
        sender: ResultSender,
    ) -> Result<Self, SearchError> {
        let thread_target = target.clone();
        let handle = thread::Builder::new()
            .name(format!("seeker-{}", id))
            .spawn(move || search_target(id, &thread_target, &config, &sender))
            .map_err(|e| SearchError::worker_launch(&target, e))?;

        Ok(Self {
            id,
            target,
            handle: Some(handle),
        })
    }

    /// Worker ordinal, also the prefix of its output lines
    pub fn id(&self) -> usize {
        self.id
    }

    /// The name this worker searches for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Waits for the worker to finish. A panicked thread is folded into a
    /// failed outcome for its target instead of tearing down the run.
    pub fn join(mut self) -> WorkerOutcome {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!(worker = self.id, name = %self.target, "worker thread panicked");
                    WorkerOutcome::failed(self.id, self.target)
                }
            },
            None => WorkerOutcome::failed(self.id, self.target),
        }
    }
}

/// Body of one worker thread.
fn search_target(
    id: usize,
    target: &str,
    config: &SearchConfig,
    sender: &ResultSender,
) -> WorkerOutcome {
    debug!(worker = id, name = %target, "worker starting");

    let matcher = NameMatcher::new(target, config.case_sensitive);
    let mut walker = match TreeWalker::open(&config.root_path, matcher, config.recursive) {
        Ok(walker) => walker,
        Err(e) => {
            // Failing to open the root is the one error that fails the
            // worker itself. It still answers over the channel so the
            // output stream stays complete.
            error!(
                worker = id,
                name = %target,
                "cannot open {}: {}",
                config.root_path.display(),
                e
            );
            sender.send(ResultMessage::worker_error(
                id,
                target,
                &format!("cannot open directory {}: {}", config.root_path.display(), e),
            ));
            sender.send(ResultMessage::not_found(id, target));
            return WorkerOutcome::failed(id, target);
        }
    };

    let mut matches = 0;
    for path in walker.by_ref() {
        sender.send(ResultMessage::matched(id, target, &path));
        matches += 1;
    }
    if matches == 0 {
        sender.send(ResultMessage::not_found(id, target));
    }

    let stats = *walker.stats();
    debug!(
        worker = id,
        dirs = stats.dirs_visited,
        entries = stats.entries_examined,
        skipped = stats.dirs_skipped + stats.entries_skipped,
        "walk finished"
    );
    info!(worker = id, name = %target, matches, "worker finished");

    WorkerOutcome {
        worker_id: id,
        target: target.to_string(),
        found: matches > 0,
        failed: false,
        matches,
        stats,
    }
}
