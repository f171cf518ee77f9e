/// Strategy for file name comparison
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Byte-for-byte equality
    Exact(String),
    /// ASCII-insensitive equality, holding the target pre-folded to lowercase
    AsciiFold(String),
}

/// Decides whether a directory entry name equals the requested target
#[derive(Debug, Clone)]
pub struct NameMatcher {
    strategy: MatchStrategy,
}

impl NameMatcher {
    /// Creates a matcher for one target name. The fold for the
    /// case-insensitive strategy is computed once, not per entry.
    pub fn new(target: &str, case_sensitive: bool) -> Self {
        let strategy = if case_sensitive {
            MatchStrategy::Exact(target.to_string())
        } else {
            MatchStrategy::AsciiFold(target.to_ascii_lowercase())
        };
        Self { strategy }
    }

    /// Tests a file name against the target.
    ///
    /// Folding is ASCII-only: `A`..`Z` compare equal to `a`..`z`, every
    /// other byte (non-ASCII UTF-8 included) must match exactly.
    pub fn is_match(&self, name: &str) -> bool {
        match &self.strategy {
            MatchStrategy::Exact(target) => name == target,
            MatchStrategy::AsciiFold(target) => name.eq_ignore_ascii_case(target),
        }
    }
}
