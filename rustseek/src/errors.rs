/// This module defines custom error types for rustseek, demonstrating Rust's error handling
/// compared to .NET's exception system.
///
/// # Rust vs .NET Error Handling
///
/// .NET uses exceptions for error handling:
/// ```csharp
/// try {
///     var finder = new FileFinder();
///     finder.Run(rootPath, names);
/// } catch (DirectoryNotFoundException ex) {
///     // Handle missing root
/// } catch (ArgumentException ex) {
///     // Handle empty target list
/// } catch (Exception ex) {
///     // Handle other errors
/// }
/// ```
///
/// Rust uses Result types with custom errors:
/// ```rust,ignore
/// match run_search(&config) {
///     Ok(summary) => // Process summary,
///     Err(SearchError::RootNotFound(path)) => // Handle missing root,
///     Err(SearchError::NoTargets) => // Handle empty target list,
///     Err(e) => // Handle other errors
/// }
/// ```
///
/// # Benefits of Rust's Approach
///
/// 1. **Explicit Error Handling**
///    - .NET lets an exception escape unnoticed
///    - Rust requires every `SearchError` to be handled or propagated
///
/// 2. **Zero-Cost Abstractions**
///    - .NET exceptions carry stack-unwinding machinery
///    - Rust's Result type compiles down to an ordinary return value
///
/// 3. **Type Safety**
///    - .NET exception contracts live in documentation only
///    - Rust encodes the whole failure set in the enum itself
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while setting up or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),
    #[error("Root path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("No target names given")]
    NoTargets,
    #[error("Failed to start worker for '{target}': {reason}")]
    WorkerLaunch { target: String, reason: String },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn worker_launch(target: impl Into<String>, reason: impl ToString) -> Self {
        Self::WorkerLaunch {
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}
