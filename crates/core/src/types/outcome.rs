//! Resolution outcomes and generation results

use crate::errors::Error;

/// Result of resolving a single variable
#[derive(Debug)]
pub enum ResolutionOutcome {
    /// A concrete value (possibly empty)
    Value(String),
    /// No value and no default
    Absent,
    /// Unrecoverable error with no default to fall back on
    Failed(Error),
}

impl ResolutionOutcome {
    /// `Value(v)` if a value was found, otherwise fall back to `default`, otherwise `Absent`
    #[must_use]
    pub fn or_default(found: Option<String>, default: Option<&String>) -> Self {
        match found.or_else(|| default.cloned()) {
            Some(value) => ResolutionOutcome::Value(value),
            None => ResolutionOutcome::Absent,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            ResolutionOutcome::Value(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, ResolutionOutcome::Absent)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, ResolutionOutcome::Failed(_))
    }
}

/// Outcome of one content generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// True iff `errors` is empty
    pub success: bool,
    /// Every failure, in template order
    pub errors: Vec<String>,
    /// The rendered env file
    pub content: String,
    /// Number of `KEY=VALUE` entries in `content`
    pub emitted: usize,
}

impl GenerationResult {
    #[must_use]
    pub fn new(content: String, emitted: usize, errors: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            content,
            emitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_default_prefers_found_value() {
        let default = "fallback".to_string();
        let outcome = ResolutionOutcome::or_default(Some(String::new()), Some(&default));
        assert_eq!(outcome.value(), Some(""));
    }

    #[test]
    fn test_or_default_falls_back() {
        let default = "fallback".to_string();
        let outcome = ResolutionOutcome::or_default(None, Some(&default));
        assert_eq!(outcome.value(), Some("fallback"));
        assert!(ResolutionOutcome::or_default(None, None).is_absent());
    }

    #[test]
    fn test_generation_result_success_tracks_errors() {
        assert!(GenerationResult::new(String::new(), 0, vec![]).success);
        assert!(!GenerationResult::new("A=1\n".to_string(), 1, vec!["x".to_string()]).success);
    }
}
