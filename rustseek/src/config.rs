use std::fs;
use std::io;
use std::path::PathBuf;

use crate::errors::{SearchError, SearchResult};

/// Configuration for one search run, demonstrating Rust's strong typing
/// compared to .NET's optional configuration pattern.
///
/// # Rust vs .NET Configuration
///
/// .NET's options pattern:
/// ```csharp
/// public class FinderOptions
/// {
///     public string RootPath { get; set; }
///     public List<string> Targets { get; set; }
///     // No compile-time guarantees for null values
/// }
/// ```
///
/// Rust's strongly-typed configuration:
/// ```rust,ignore
/// pub struct SearchConfig {
///     pub root_path: PathBuf,
///     pub targets: Vec<String>,
///     // Every field always holds a value
/// }
/// ```
///
/// The configuration is built once from command-line arguments, validated
/// before any worker starts, and never mutated afterwards. Workers observe
/// it through a shared reference.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Root directory to start the search from
    pub root_path: PathBuf,

    /// File names to search for, one worker per entry.
    /// Duplicates are allowed and searched independently.
    pub targets: Vec<String>,

    /// Whether to descend into subdirectories
    pub recursive: bool,

    /// Whether name comparison distinguishes ASCII letter case
    pub case_sensitive: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl SearchConfig {
    /// Creates a configuration with the default flags: non-recursive,
    /// case-sensitive matching.
    pub fn new(root_path: impl Into<PathBuf>, targets: Vec<String>) -> Self {
        Self {
            root_path: root_path.into(),
            targets,
            recursive: false,
            case_sensitive: true,
            log_level: default_log_level(),
        }
    }

    /// Checks that the request can be searched at all. Called by
    /// [`run_search`](crate::search::run_search) before any worker is
    /// spawned, so an invalid request produces no output lines.
    ///
    /// A root that exists but cannot be statted (say, an unsearchable
    /// parent directory) surfaces the underlying IO error rather than
    /// claiming the path does not exist.
    pub fn validate(&self) -> SearchResult<()> {
        if self.targets.is_empty() {
            return Err(SearchError::NoTargets);
        }
        let metadata = match fs::metadata(&self.root_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SearchError::root_not_found(&self.root_path));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(SearchError::not_a_directory(&self.root_path));
        }
        Ok(())
    }
}
