//! Property name patterns.
//!
//! A pattern is one or more alternatives separated by `|`. Inside an
//! alternative `*` matches any run of characters, including none; every other
//! character matches itself. Whitespace around an alternative is ignored, so
//! `"sec:role-* | jcr:uuid"` is two alternatives.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use strata_core::{RepositoryError, RepositoryResult};

/// A compiled property name pattern.
#[derive(Debug, Clone)]
pub struct NamePattern {
    set: GlobSet,
}

impl NamePattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// `RepositoryError::InvalidPattern` if an alternative cannot be compiled.
    pub fn new(pattern: &str) -> RepositoryResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for alternative in pattern.split('|').map(str::trim) {
            let glob = GlobBuilder::new(&to_glob(alternative))
                .literal_separator(false)
                .backslash_escape(false)
                .build()
                .map_err(|e| RepositoryError::invalid_pattern(pattern, e))?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| RepositoryError::invalid_pattern(pattern, e))?;
        Ok(Self { set })
    }

    /// Returns `true` if `name` matches any alternative.
    pub fn is_match(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// Rewrites one alternative as a glob where only `*` is special.
fn to_glob(alternative: &str) -> String {
    alternative
        .split('*')
        .map(|literal| {
            globset::escape(literal)
                .replace('{', "[{]")
                .replace('}', "[}]")
        })
        .collect::<Vec<_>>()
        .join("*")
}
