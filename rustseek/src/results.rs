/// This module implements the result types that cross the worker boundary,
/// demonstrating how Rust's ownership system replaces the shared mutable
/// state a .NET implementation would lean on.
///
/// # Rust Ownership vs .NET References
///
/// 1. **Result lines as owned values**
///    .NET typically shares a collection between producers:
///    ```csharp
///    public class ResultSink {
///        public ConcurrentQueue<string> Lines { get; } = new();
///        // Any thread holding the reference can mutate at any time
///    }
///    ```
///
///    Rust moves each finished message into the channel:
///    ```rust,ignore
///    let msg = ResultMessage::matched(id, target, &path);
///    sender.send(msg); // ownership transferred, no further mutation possible
///    ```
///
/// 2. **Invariants enforced by construction**
///    A message payload must be exactly one newline-terminated line so
///    that concurrently produced results can never interleave mid-line.
///    The payload field is private and every constructor funnels through
///    the same formatter, so an ill-formed message is unrepresentable:
///    ```rust,ignore
///    pub struct ResultMessage {
///        kind: ResultKind,
///        payload: String, // private: only builders can set it
///    }
///    ```
///
/// 3. **Deterministic cleanup**
///    The summary owns its messages and outcomes outright. When it is
///    dropped everything is freed at a known point, with no garbage
///    collector deciding when queue memory goes away.
use std::path::Path;

/// Longest payload a single message may carry, in bytes, including the
/// trailing newline. Matches the classic PATH_MAX transport buffer so a
/// pathological path cannot bloat the channel.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Classification of a single result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// A matching file was found
    Match,
    /// A worker finished without finding its target
    NotFound,
    /// A worker-level diagnostic (root unreadable, launch failure)
    Error,
}

/// One fully formatted result line produced by a worker.
///
/// The payload is always a single newline-terminated line of at most
/// [`MAX_MESSAGE_LEN`] bytes. Consumers print it verbatim.
#[derive(Debug, Clone)]
pub struct ResultMessage {
    kind: ResultKind,
    payload: String,
}

impl ResultMessage {
    /// Builds a match line: `<worker>: <target>: <path>`
    pub fn matched(worker_id: usize, target: &str, path: &Path) -> Self {
        Self {
            kind: ResultKind::Match,
            payload: format_payload(format!("{}: {}: {}", worker_id, target, path.display())),
        }
    }

    /// Builds the single not-found line a worker emits when its walk
    /// yields no match: `<worker>: <target>: not found`
    pub fn not_found(worker_id: usize, target: &str) -> Self {
        Self {
            kind: ResultKind::NotFound,
            payload: format_payload(format!("{}: {}: not found", worker_id, target)),
        }
    }

    /// Builds a worker-level diagnostic line in the same `<worker>:
    /// <target>: <detail>` shape as the result lines.
    pub fn worker_error(worker_id: usize, target: &str, detail: &str) -> Self {
        Self {
            kind: ResultKind::Error,
            payload: format_payload(format!("{}: {}: {}", worker_id, target, detail)),
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    /// The formatted line, newline included
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Collapses `body` to one line, bounds it to [`MAX_MESSAGE_LEN`] bytes and
/// terminates it with a newline. File names may legally contain newlines;
/// escaping them keeps the one-line-per-message contract.
fn format_payload(body: String) -> String {
    let mut line = if body.contains('\n') {
        body.replace('\n', "\\n")
    } else {
        body
    };
    line.push('\n');
    if line.len() > MAX_MESSAGE_LEN {
        let mut cut = MAX_MESSAGE_LEN - 1;
        while cut > 0 && !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
        line.push('\n');
    }
    line
}

/// Counters collected during one worker's tree walk
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStats {
    /// Directories successfully opened and enumerated
    pub dirs_visited: u64,
    /// Directories that could not be opened and were skipped whole
    pub dirs_skipped: u64,
    /// Directory entries examined
    pub entries_examined: u64,
    /// Entries skipped because their metadata was unavailable
    pub entries_skipped: u64,
    /// Matches dropped because the path could not be canonicalized
    pub resolve_failures: u64,
}

impl WalkStats {
    /// Adds another walk's counters into this one
    pub fn merge(&mut self, other: &WalkStats) {
        self.dirs_visited += other.dirs_visited;
        self.dirs_skipped += other.dirs_skipped;
        self.entries_examined += other.entries_examined;
        self.entries_skipped += other.entries_skipped;
        self.resolve_failures += other.resolve_failures;
    }
}

/// What one worker reported back after its walk ended
#[derive(Debug, Clone)]
pub struct WorkerOutcome {
    /// Ordinal of the worker, also the prefix of its output lines
    pub worker_id: usize,
    /// The name this worker searched for
    pub target: String,
    /// Whether at least one match was found anywhere in the tree
    pub found: bool,
    /// Whether the worker failed (root unreadable or thread lost)
    pub failed: bool,
    /// Number of match lines the worker emitted
    pub matches: usize,
    /// Walk counters for this worker
    pub stats: WalkStats,
}

impl WorkerOutcome {
    /// Outcome for a worker that never produced a usable walk
    pub fn failed(worker_id: usize, target: impl Into<String>) -> Self {
        Self {
            worker_id,
            target: target.into(),
            found: false,
            failed: true,
            matches: 0,
            stats: WalkStats::default(),
        }
    }
}

/// Aggregated result of a whole search run
#[derive(Debug, Clone, Default)]
pub struct SearchSummary {
    /// Every line the workers produced, in channel delivery order
    pub messages: Vec<ResultMessage>,
    /// Per-worker outcomes, ordered by worker id
    pub outcomes: Vec<WorkerOutcome>,
    /// Number of targets found at least once
    pub targets_found: usize,
    /// Number of targets never found
    pub targets_missing: usize,
    /// Number of workers that failed
    pub workers_failed: usize,
    /// Total number of match lines across all workers
    pub total_matches: usize,
}

impl SearchSummary {
    /// Creates a new empty summary
    pub fn new() -> Self {
        Default::default()
    }

    /// Records one worker outcome and updates the aggregate counters
    pub fn add_outcome(&mut self, outcome: WorkerOutcome) {
        if outcome.failed {
            self.workers_failed += 1;
        }
        if outcome.found {
            self.targets_found += 1;
        } else {
            self.targets_missing += 1;
        }
        self.total_matches += outcome.matches;
        self.outcomes.push(outcome);
    }

    /// A run succeeds only when every target was found and every worker
    /// completed its walk
    pub fn overall_success(&self) -> bool {
        self.workers_failed == 0 && self.targets_missing == 0
    }

    /// Walk counters summed over all workers
    pub fn walk_stats(&self) -> WalkStats {
        let mut total = WalkStats::default();
        for outcome in &self.outcomes {
            total.merge(&outcome.stats);
        }
        total
    }
}
