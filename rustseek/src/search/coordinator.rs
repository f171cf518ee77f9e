use std::sync::Arc;

use tracing::{error, info};

use super::channel::{result_channel, ResultSender};
use super::worker::SearchWorker;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::results::{ResultMessage, SearchSummary, WorkerOutcome};

/// Runs the whole search: validates the request, spawns one worker per
/// target, waits for all of them and drains the shared channel into a
/// [`SearchSummary`].
///
/// The phases are strictly ordered. Every worker is spawned before any is
/// joined; the coordinator's own sender is dropped before the wait so only
/// worker threads keep the channel open; the drain runs after the last
/// producer has exited, so one non-blocking sweep sees every message.
///
/// A target whose worker cannot be started is recorded as a failed outcome
/// and the remaining targets still run to completion.
pub fn run_search(config: &SearchConfig) -> SearchResult<SearchSummary> {
    run_search_with(config, SearchWorker::spawn)
}

/// Same run with the worker spawn step supplied by the caller.
fn run_search_with<S>(config: &SearchConfig, spawn: S) -> SearchResult<SearchSummary>
where
    S: Fn(usize, String, Arc<SearchConfig>, ResultSender) -> Result<SearchWorker, SearchError>,
{
    config.validate()?;

    let config = Arc::new(config.clone());
    let (sender, receiver) = result_channel();

    info!(
        root = %config.root_path.display(),
        targets = config.targets.len(),
        recursive = config.recursive,
        "starting search"
    );

    let mut workers = Vec::with_capacity(config.targets.len());
    let mut outcomes = Vec::with_capacity(config.targets.len());
    for (index, target) in config.targets.iter().enumerate() {
        let id = index + 1;
        match spawn(id, target.clone(), Arc::clone(&config), sender.clone()) {
            Ok(worker) => workers.push(worker),
            Err(e) => {
                // One unlaunchable worker must not starve the rest.
                error!(worker = id, name = %target, "{}", e);
                sender.send(ResultMessage::worker_error(
                    id,
                    target,
                    "failed to start worker",
                ));
                outcomes.push(WorkerOutcome::failed(id, target.clone()));
            }
        }
    }

    // Only worker threads hold senders from here on.
    drop(sender);

    for worker in workers {
        outcomes.push(worker.join());
    }

    let mut summary = SearchSummary::new();
    summary.messages = receiver.drain();
    outcomes.sort_by_key(|outcome| outcome.worker_id);
    for outcome in outcomes {
        summary.add_outcome(outcome);
    }

    info!(
        found = summary.targets_found,
        missing = summary.targets_missing,
        failed = summary.workers_failed,
        matches = summary.total_matches,
        "search complete"
    );

    Ok(summary)
}
