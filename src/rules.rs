//! First-matching-rule cascades.
//!
//! The header parser resolves separators, date formats and timezone names
//! by trying an ordered list of rules and keeping the first success.

use std::fmt;
use tracing::trace;

type RuleFn<'r, I, O> = Box<dyn Fn(&I) -> Option<O> + Send + Sync + 'r>;

/// Ordered list of fallible rules evaluated with first-success-wins semantics
pub struct Cascade<'r, I: ?Sized, O> {
    name: &'static str,
    rules: Vec<(&'static str, RuleFn<'r, I, O>)>,
}

impl<'r, I: ?Sized, O> Cascade<'r, I, O> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Append a rule; rules run in insertion order
    pub fn rule<F>(mut self, label: &'static str, rule: F) -> Self
    where
        F: Fn(&I) -> Option<O> + Send + Sync + 'r,
    {
        self.rules.push((label, Box::new(rule)));
        self
    }

    /// Run the rules in order and return the first result produced
    pub fn apply(&self, input: &I) -> Option<O> {
        self.rules.iter().find_map(|(label, rule)| {
            let result = rule(input);
            if result.is_some() {
                trace!("{} matched rule '{}'", self.name, label);
            }
            result
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<I: ?Sized, O> fmt::Debug for Cascade<'_, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.rules.iter().map(|(label, _)| *label).collect();
        f.debug_struct("Cascade")
            .field("name", &self.name)
            .field("rules", &labels)
            .finish()
    }
}
