//! Include/exclude glob filtering of candidate file names.
//!
//! Patterns use the usual glob syntax (`*`, `?`, character classes) and
//! are matched case-sensitively against the whole file name, not as a
//! substring search. Exclude patterns always win over include patterns.

use glob::Pattern;
use thiserror::Error;
use tracing::debug;

/// Compiled include/exclude patterns, immutable for the duration of a crawl.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

/// Errors produced while compiling filter patterns.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A pattern is not valid glob syntax.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern as given on the command line.
        pattern: String,
        /// The underlying glob parse error.
        #[source]
        source: glob::PatternError,
    },
}

impl FilterSpec {
    /// Compiles include and exclude patterns into a filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] naming the first pattern
    /// that fails to compile.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, FilterError> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// Returns true when no patterns were specified at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Decides whether a file name passes the filter.
    ///
    /// Decision policy, in order: with no patterns at all, everything is
    /// included; any exclude match rejects the name regardless of include
    /// matches; with include patterns present, at least one must match;
    /// otherwise (only excludes were given and none matched) the name is
    /// included.
    #[must_use]
    pub fn should_include(&self, file_name: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        if let Some(pattern) = self.exclude.iter().find(|p| p.matches(file_name)) {
            debug!(
                file = %file_name,
                pattern = %pattern.as_str(),
                "excluded by pattern"
            );
            return false;
        }

        if !self.include.is_empty() {
            let matched = self.include.iter().any(|p| p.matches(file_name));
            if !matched {
                debug!(file = %file_name, "matches no include pattern");
            }
            return matched;
        }

        true
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, FilterError> {
    patterns
        .iter()
        .map(|raw| {
            Pattern::new(raw).map_err(|source| FilterError::InvalidPattern {
                pattern: raw.clone(),
                source,
            })
        })
        .collect()
}
