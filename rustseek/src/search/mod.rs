/// This module implements the concurrent name search, demonstrating Rust's
/// thread and channel primitives compared to .NET's Task Parallel Library.
///
/// # .NET vs Rust Concurrency
///
/// In .NET, one search task per name might look like:
/// ```csharp
/// var tasks = names.Select(name => Task.Run(() => SearchTree(root, name)));
/// await Task.WhenAll(tasks);
/// ```
///
/// Here each name gets a dedicated OS thread whose lifetime is explicit.
/// A thread is spawned, owns its walk, and is joined exactly once:
/// ```rust,ignore
/// let worker = SearchWorker::spawn(id, name, config, sender)?;
/// let outcome = worker.join();
/// ```
///
/// # Result Collection
///
/// .NET would usually funnel results through a `BlockingCollection` or
/// `ConcurrentQueue` shared by reference:
/// ```csharp
/// var results = new BlockingCollection<string>();
/// // every task writes, someone eventually calls CompleteAdding()
/// ```
///
/// Rust expresses the same funnel as a channel whose sender halves are
/// moved into the workers. There is no completion flag to forget: the
/// channel closes by itself when the last sender is dropped, and the
/// receiver side stays alive until the coordinator has drained it.
///
/// # Error Handling
///
/// A worker that cannot even open its root does not throw across the
/// thread boundary. It reports a failed outcome and the coordinator
/// aggregates all outcomes into one [`SearchSummary`](crate::SearchSummary):
/// ```rust,ignore
/// match run_search(&config) {
///     Ok(summary) => // inspect summary.overall_success(),
///     Err(e) => // the request itself was invalid
/// }
/// ```
pub mod channel;
pub mod coordinator;
pub mod matcher;
pub mod walker;
pub mod worker;

pub use coordinator::run_search;
pub use matcher::NameMatcher;
pub use walker::TreeWalker;
pub use worker::SearchWorker;
