//! Class-name inclusion filter
//!
//! Provides [`ClassNameFilter`], the per-request package/name filter applied
//! by the container resolver before any class is considered.

use regex::Regex;

/// Regex-based class-name filter
///
/// With no include patterns every name is accepted; otherwise a name must
/// match at least one include pattern. Exclude patterns veto matches either
/// way.
#[derive(Debug, Clone, Default)]
pub struct ClassNameFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl ClassNameFilter {
    /// Filter accepting every class name
    #[inline]
    #[must_use]
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Filter accepting names matching any of the given patterns
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidPattern`] for an unparseable pattern.
    pub fn include_patterns(
        patterns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            include: compile(patterns)?,
            exclude: Vec::new(),
        })
    }

    /// Add exclude patterns vetoing otherwise-included names
    ///
    /// # Errors
    /// Returns [`FilterError::InvalidPattern`] for an unparseable pattern.
    pub fn and_exclude_patterns(
        mut self,
        patterns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, FilterError> {
        self.exclude = compile(patterns)?;
        Ok(self)
    }

    /// Test a fully qualified class name
    #[must_use]
    pub fn matches(&self, class_name: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|pattern| pattern.is_match(class_name));
        included && !self.exclude.iter().any(|pattern| pattern.is_match(class_name))
    }
}

fn compile(patterns: impl IntoIterator<Item = impl AsRef<str>>) -> Result<Vec<Regex>, FilterError> {
    patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref()).map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

/// Errors for class-name filters
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Pattern failed to compile
    #[error("invalid class name pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_all_matches_everything() {
        let filter = ClassNameFilter::accept_all();
        assert!(filter.matches("com.acme.Bench"));
        assert!(filter.matches("anything"));
    }

    #[test]
    fn include_pattern_restricts() {
        let filter = ClassNameFilter::include_patterns([r"^com\.acme\..*"]).unwrap();
        assert!(filter.matches("com.acme.Bench"));
        assert!(!filter.matches("org.other.Bench"));
    }

    #[test]
    fn exact_quoted_pattern() {
        let filter =
            ClassNameFilter::include_patterns([regex::escape("com.acme.Bench")]).unwrap();
        assert!(filter.matches("com.acme.Bench"));
        assert!(!filter.matches("com.acme.BenchOther"));
    }

    #[test]
    fn exclude_pattern_vetoes() {
        let filter = ClassNameFilter::include_patterns([r"^com\.acme\..*"])
            .unwrap()
            .and_exclude_patterns([r".*Slow.*"])
            .unwrap();
        assert!(filter.matches("com.acme.Bench"));
        assert!(!filter.matches("com.acme.SlowBench"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let result = ClassNameFilter::include_patterns(["("]);
        assert!(matches!(result, Err(FilterError::InvalidPattern { .. })));
    }
}
