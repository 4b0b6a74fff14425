//! Content matchers for cell search.

use regex::Regex;

/// Something a cell's text content can be tested against.
///
/// Implemented for literal strings (substring containment), compiled
/// [`Regex`] values, and arbitrary predicates wrapped in [`Matching`].
pub trait ContentPattern {
    /// Test the given content.
    fn matches(&self, content: &str) -> bool;
}

impl ContentPattern for str {
    fn matches(&self, content: &str) -> bool {
        content.contains(self)
    }
}

impl ContentPattern for String {
    fn matches(&self, content: &str) -> bool {
        content.contains(self.as_str())
    }
}

impl ContentPattern for Regex {
    fn matches(&self, content: &str) -> bool {
        self.is_match(content)
    }
}

impl<T: ContentPattern + ?Sized> ContentPattern for &T {
    fn matches(&self, content: &str) -> bool {
        (**self).matches(content)
    }
}

/// A predicate used as a content pattern.
///
/// ```
/// use latent_grid::Matching;
/// use latent_grid::ContentPattern;
///
/// let numeric = Matching(|s: &str| s.parse::<f64>().is_ok());
/// assert!(numeric.matches("3.5"));
/// assert!(!numeric.matches("n/a"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Matching<F>(pub F);

impl<F: Fn(&str) -> bool> ContentPattern for Matching<F> {
    fn matches(&self, content: &str) -> bool {
        (self.0)(content)
    }
}
